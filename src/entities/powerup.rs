use super::Bounds;
use crate::config::Size;

/// Multi-shot pickup rising from the floor
#[derive(Debug, Clone)]
pub struct PowerUp {
    pub x: i32,
    pub y: i32,
    pub size: Size,
}

impl PowerUp {
    pub fn new(x: i32, y: i32, size: Size) -> Self {
        Self { x, y, size }
    }

    pub fn below_floor(x: i32, size: Size) -> Self {
        Self::new(x, -size.height, size)
    }

    pub fn rise(&mut self, amount: i32) {
        self.y += amount;
    }

    pub fn is_out_of_bounds(&self, playfield_height: i32) -> bool {
        self.y > playfield_height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.size.width, self.size.height)
    }

    pub fn get_char(&self) -> char {
        '★'
    }
}
