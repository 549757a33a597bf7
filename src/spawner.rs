use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Balloon, Palette, PowerUp, random_x};

/// Delay until the next balloon, shrinking by level down to the floor
pub fn balloon_interval_ms(level: u32, config: &GameConfig) -> u64 {
    config
        .balloon_interval_base_ms
        .saturating_sub(u64::from(level) * config.balloon_interval_per_level_ms)
        .max(config.balloon_interval_floor_ms)
}

pub fn powerup_interval_ms(config: &GameConfig) -> u64 {
    config.powerup_interval_ms
}

/// Balloon at a random column with a random colour, hidden below the floor
pub fn spawn_balloon<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Balloon {
    let size = config.balloon_size;
    let x = random_x(rng, config.playfield_width, size.width);
    Balloon::below_floor(x, size, Palette::random(rng))
}

pub fn spawn_powerup<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> PowerUp {
    let size = config.powerup_size;
    let x = random_x(rng, config.playfield_width, size.width);
    PowerUp::below_floor(x, size)
}
