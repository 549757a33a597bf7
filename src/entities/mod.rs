mod balloon;
mod bullet;
mod particle;
mod player;
mod powerup;

// Re-export all public types
pub use balloon::{Balloon, Palette};
pub use bullet::Bullet;
pub use particle::{Particle, create_pop_particles};
pub use player::{Direction, Player};
pub use powerup::PowerUp;

use rand::Rng;

/// Axis-aligned bounding box in world units, `y` is the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn left(&self) -> i32 {
        self.x
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y
    }

    pub fn top(&self) -> i32 {
        self.y + self.height
    }

    /// Boxes collide unless they are disjoint on an axis. Shared edges count.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        !(self.right() < other.left()
            || self.left() > other.right()
            || self.top() < other.bottom()
            || self.bottom() > other.top())
    }
}

/// Random left edge for an entity of `width` so it fits inside `playfield_width`
pub fn random_x<R: Rng + ?Sized>(rng: &mut R, playfield_width: i32, width: i32) -> i32 {
    let span = playfield_width - width;
    if span <= 0 {
        return 0;
    }
    rng.random_range(0..span)
}
