use super::Bounds;
use crate::config::Size;

#[derive(Debug, Clone)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
    pub size: Size,
}

impl Bullet {
    pub fn new(x: i32, y: i32, size: Size) -> Self {
        Self { x, y, size }
    }

    pub fn update(&mut self, speed: i32) {
        self.y += speed;
    }

    /// Past the far (top) edge of the playfield
    pub fn is_out_of_bounds(&self, playfield_height: i32) -> bool {
        self.y > playfield_height
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.size.width, self.size.height)
    }
}
