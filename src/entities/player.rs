use super::Bounds;
use super::bullet::Bullet;
use crate::config::{GameConfig, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub size: Size,
}

impl Player {
    pub fn new(x: i32, y: i32, size: Size) -> Self {
        Self { x, y, size }
    }

    /// Player centred on the floor of the configured playfield
    pub fn spawn(config: &GameConfig) -> Self {
        Self::new(
            config.player_max_x() / 2,
            config.player_y,
            config.player_size,
        )
    }

    /// Moves one step and clamps to `[0, max_x]`
    pub fn step(&mut self, direction: Direction, step: i32, max_x: i32) {
        self.x = (self.x + direction.sign() * step).clamp(0, max_x.max(0));
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.size.width / 2
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.size.width, self.size.height)
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        vec![" /^\\ ", "<|||>"]
    }

    /// Bullets for one fire command, three when multi-shot is active
    pub fn fire(&self, multi_shot: bool, config: &GameConfig) -> Vec<Bullet> {
        let offsets: &[i32] = if multi_shot {
            &config.multi_shot_offsets
        } else {
            &[0]
        };
        let left = self.center_x() - config.bullet_size.width / 2;

        offsets
            .iter()
            .map(|offset| Bullet::new(left + offset, config.bullet_start_y, config.bullet_size))
            .collect()
    }
}
