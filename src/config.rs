use color_eyre::{Result, eyre::eyre};

/// Width and height of an entity's bounding box in world units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Every tunable of a game session.
///
/// World coordinates have `x` growing rightward from the left wall and `y`
/// measuring an entity's bottom edge upward from the floor.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub playfield_width: i32,
    pub playfield_height: i32,

    pub player_size: Size,
    /// Fixed bottom edge of the player
    pub player_y: i32,
    pub player_step: i32,

    pub bullet_size: Size,
    pub bullet_start_y: i32,
    pub bullet_speed: i32,
    /// Horizontal offsets of the three multi-shot bullets
    pub multi_shot_offsets: [i32; 3],

    pub balloon_size: Size,
    /// Base rise per frame, level is added on top
    pub rise_base: i32,
    pub balloon_interval_base_ms: u64,
    pub balloon_interval_per_level_ms: u64,
    pub balloon_interval_floor_ms: u64,

    pub powerup_size: Size,
    pub powerup_interval_ms: u64,
    pub multi_shot_duration_ms: u64,

    pub pop_particle_count: usize,
    pub pop_particle_spread: i32,
    pub pop_particle_lifetime_ms: u64,

    pub points_per_balloon: u32,
    /// Score needed per level: level N ends at N * points_per_level
    pub points_per_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: 400,
            playfield_height: 600,

            player_size: Size::new(50, 50),
            player_y: 10,
            player_step: 20,

            bullet_size: Size::new(10, 20),
            bullet_start_y: 70,
            bullet_speed: 5,
            multi_shot_offsets: [-15, 0, 15],

            balloon_size: Size::new(40, 60),
            rise_base: 2,
            balloon_interval_base_ms: 1000,
            balloon_interval_per_level_ms: 100,
            balloon_interval_floor_ms: 300,

            powerup_size: Size::new(30, 30),
            powerup_interval_ms: 10_000,
            multi_shot_duration_ms: 5_000,

            pop_particle_count: 5,
            pop_particle_spread: 10,
            pop_particle_lifetime_ms: 500,

            points_per_balloon: 10,
            points_per_level: 100,
        }
    }
}

impl GameConfig {
    /// Playfield of a custom size with every other setting at its default
    pub fn with_playfield(width: i32, height: i32) -> Self {
        Self {
            playfield_width: width,
            playfield_height: height,
            ..Self::default()
        }
    }

    /// Checks that every entity fits inside the playfield
    pub fn validate(&self) -> Result<()> {
        if self.playfield_width <= 0 || self.playfield_height <= 0 {
            return Err(eyre!(
                "playfield must have a positive size, got {}x{}",
                self.playfield_width,
                self.playfield_height
            ));
        }

        let sizes = [
            ("player", self.player_size),
            ("bullet", self.bullet_size),
            ("balloon", self.balloon_size),
            ("power-up", self.powerup_size),
        ];
        for (name, size) in sizes {
            if size.width <= 0 || size.height <= 0 {
                return Err(eyre!("{name} must have a positive size"));
            }
            if size.width > self.playfield_width {
                return Err(eyre!(
                    "{name} is {} wide but the playfield is only {}",
                    size.width,
                    self.playfield_width
                ));
            }
        }

        if self.player_y + self.player_size.height > self.playfield_height {
            return Err(eyre!("player does not fit vertically in the playfield"));
        }
        if self.player_step <= 0 || self.bullet_speed <= 0 {
            return Err(eyre!("player step and bullet speed must be positive"));
        }
        if self.points_per_level == 0 {
            return Err(eyre!("points per level must be positive"));
        }
        if self.balloon_interval_floor_ms == 0 || self.powerup_interval_ms == 0 {
            return Err(eyre!("spawn intervals must be positive"));
        }

        Ok(())
    }

    /// Rightmost valid player position
    pub fn player_max_x(&self) -> i32 {
        self.playfield_width - self.player_size.width
    }
}
