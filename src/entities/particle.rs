use rand::Rng;

use super::balloon::Palette;

/// Decorative fragment left behind when a balloon pops
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: i32,
    pub y: i32,
    pub color: Palette,
    pub expires_at_ms: u64,
}

impl Particle {
    pub fn new(x: i32, y: i32, color: Palette, expires_at_ms: u64) -> Self {
        Self {
            x,
            y,
            color,
            expires_at_ms,
        }
    }

    pub fn is_expired(&self, now_ms: u64) -> bool {
        now_ms >= self.expires_at_ms
    }

    pub fn get_char(&self) -> char {
        '*'
    }
}

/// Scatters `count` particles within `spread` units of the impact point
pub fn create_pop_particles<R: Rng + ?Sized>(
    rng: &mut R,
    center_x: i32,
    center_y: i32,
    count: usize,
    spread: i32,
    expires_at_ms: u64,
) -> Vec<Particle> {
    (0..count)
        .map(|_| {
            let dx = rng.random_range(-spread..=spread);
            let dy = rng.random_range(-spread..=spread);
            Particle::new(
                center_x + dx,
                center_y + dy,
                Palette::random(rng),
                expires_at_ms,
            )
        })
        .collect()
}
