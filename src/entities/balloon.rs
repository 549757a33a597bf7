use rand::Rng;
use ratatui::style::Color;

use super::Bounds;
use crate::config::Size;

/// Fixed palette shared by balloons and pop particles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Palette {
    Red,
    Blue,
    Green,
    Yellow,
    Pink,
    Purple,
}

impl Palette {
    pub const ALL: [Palette; 6] = [
        Palette::Red,
        Palette::Blue,
        Palette::Green,
        Palette::Yellow,
        Palette::Pink,
        Palette::Purple,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn get_color(&self) -> Color {
        match self {
            Palette::Red => Color::Red,
            Palette::Blue => Color::Blue,
            Palette::Green => Color::Green,
            Palette::Yellow => Color::Yellow,
            Palette::Pink => Color::LightMagenta,
            Palette::Purple => Color::Magenta,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Balloon {
    pub x: i32,
    pub y: i32,
    pub size: Size,
    pub color: Palette,
}

impl Balloon {
    pub fn new(x: i32, y: i32, size: Size, color: Palette) -> Self {
        Self { x, y, size, color }
    }

    /// New balloon just below the floor, fully hidden
    pub fn below_floor(x: i32, size: Size, color: Palette) -> Self {
        Self::new(x, -size.height, size, color)
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

    /// Middle of the balloon, where the pop effect is drawn
    pub fn center(&self) -> (i32, i32) {
        (self.x + self.size.width / 2, self.y + self.size.height / 2)
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        vec!["(@)", " | "]
    }
}
