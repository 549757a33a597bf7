use color_eyre::Result;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::entities::{
    Balloon, Bullet, Direction, Particle, Player, PowerUp, create_pop_particles,
};
use crate::events::GameEvent;
use crate::scheduler::{Scheduler, TimerEvent};
use crate::spawner;

/// All state of one game: entities, score, timers and the running flag.
///
/// Time is passed in explicitly as milliseconds so the session can be driven
/// by any [`Clock`](crate::clock::Clock).
pub struct Session {
    config: GameConfig,
    player: Player,
    balloons: Vec<Balloon>,
    bullets: Vec<Bullet>,
    powerups: Vec<PowerUp>,
    particles: Vec<Particle>,
    score: u32,
    level: u32,
    multi_shot: bool,
    /// Deadline of the most recent power-up, older expiries are ignored
    multi_shot_deadline_ms: u64,
    running: bool,
    scheduler: Scheduler,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl Session {
    /// Creates a stopped session. A `seed` makes spawning reproducible.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        config.validate()?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            player: Player::spawn(&config),
            config,
            balloons: Vec::new(),
            bullets: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            score: 0,
            level: 1,
            multi_shot: false,
            multi_shot_deadline_ms: 0,
            running: false,
            scheduler: Scheduler::new(),
            rng,
            events: Vec::new(),
        })
    }

    /// Starts the update loop and both spawners. No-op while running.
    pub fn start(&mut self, now_ms: u64) {
        if self.running {
            return;
        }
        self.running = true;
        info!(score = self.score, level = self.level, "session started");
        self.events.push(GameEvent::Started);

        // First spawns happen immediately, then each timer reschedules itself
        self.spawn_balloon(now_ms);
        self.spawn_powerup(now_ms);
    }

    /// Halts the update loop and cancels pending spawns
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.scheduler.cancel_where(TimerEvent::is_spawn);
        info!(score = self.score, level = self.level, "session stopped");
        self.events.push(GameEvent::Stopped);
    }

    /// Runs every timer due by `now_ms`, then one update frame if running
    pub fn tick(&mut self, now_ms: u64) {
        self.run_due_timers(now_ms);
        if self.running {
            self.update_frame(now_ms);
        }
    }

    /// Moves the player one step; ignored while stopped
    pub fn move_player(&mut self, direction: Direction) {
        if !self.running {
            return;
        }
        let max_x = self.config.player_max_x();
        self.player.step(direction, self.config.player_step, max_x);
    }

    /// Fires one bullet, or three with multi-shot. Returns how many were fired.
    pub fn shoot(&mut self, now_ms: u64) -> usize {
        if !self.running {
            return 0;
        }
        // A multi-shot that ran out before this command must not apply
        self.run_due_timers(now_ms);

        let new_bullets = self.player.fire(self.multi_shot, &self.config);
        let count = new_bullets.len();
        self.bullets.extend(new_bullets);
        self.events.push(GameEvent::Shot { bullets: count });
        count
    }

    /// Takes the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn run_due_timers(&mut self, now_ms: u64) {
        while let Some((_, event)) = self.scheduler.pop_due(now_ms) {
            match event {
                // Spawns reschedule from when they actually ran, so a late
                // tick yields one spawn rather than a burst of missed ones
                TimerEvent::SpawnBalloon => self.spawn_balloon(now_ms),
                TimerEvent::SpawnPowerUp => self.spawn_powerup(now_ms),
                TimerEvent::MultiShotExpired { deadline_ms } => {
                    if self.multi_shot && deadline_ms == self.multi_shot_deadline_ms {
                        self.multi_shot = false;
                        debug!("multi-shot expired");
                        self.events.push(GameEvent::MultiShotExpired);
                    }
                }
            }
        }

        self.particles.retain(|p| !p.is_expired(now_ms));
    }

    fn spawn_balloon(&mut self, now_ms: u64) {
        if !self.running {
            return;
        }
        let balloon = spawner::spawn_balloon(&mut self.rng, &self.config);
        debug!(x = balloon.x, color = ?balloon.color, "balloon spawned");
        self.balloons.push(balloon);
        self.events.push(GameEvent::BalloonSpawned);

        let delay = spawner::balloon_interval_ms(self.level, &self.config);
        self.scheduler
            .schedule(now_ms + delay, TimerEvent::SpawnBalloon);
    }

    fn spawn_powerup(&mut self, now_ms: u64) {
        if !self.running {
            return;
        }
        let powerup = spawner::spawn_powerup(&mut self.rng, &self.config);
        debug!(x = powerup.x, "power-up spawned");
        self.powerups.push(powerup);
        self.events.push(GameEvent::PowerUpSpawned);

        let delay = spawner::powerup_interval_ms(&self.config);
        self.scheduler
            .schedule(now_ms + delay, TimerEvent::SpawnPowerUp);
    }

    fn activate_multi_shot(&mut self, now_ms: u64) {
        let deadline_ms = now_ms + self.config.multi_shot_duration_ms;
        self.multi_shot = true;
        self.multi_shot_deadline_ms = deadline_ms;
        self.scheduler
            .schedule(deadline_ms, TimerEvent::MultiShotExpired { deadline_ms });
        info!(until_ms = deadline_ms, "multi-shot collected");
        self.events
            .push(GameEvent::PowerUpCollected { until_ms: deadline_ms });
    }

    /// One frame: move everything, resolve collisions, drop spent entities
    fn update_frame(&mut self, now_ms: u64) {
        let rise = self.config.rise_base + self.level as i32;
        let height = self.config.playfield_height;

        // Balloons rise and are checked against bullets that have not moved yet
        let mut bullet_spent = vec![false; self.bullets.len()];
        let mut balloon_spent = vec![false; self.balloons.len()];
        for (b_idx, balloon) in self.balloons.iter_mut().enumerate() {
            balloon.rise(rise);
            if balloon.is_out_of_bounds(height) {
                balloon_spent[b_idx] = true;
                continue;
            }

            let balloon_bounds = balloon.bounds();
            let hit = self
                .bullets
                .iter()
                .enumerate()
                .find(|(p_idx, bullet)| {
                    !bullet_spent[*p_idx] && bullet.bounds().overlaps(&balloon_bounds)
                })
                .map(|(p_idx, _)| p_idx);

            if let Some(p_idx) = hit {
                bullet_spent[p_idx] = true;
                balloon_spent[b_idx] = true;

                let (center_x, center_y) = balloon.center();
                self.particles.extend(create_pop_particles(
                    &mut self.rng,
                    center_x,
                    center_y,
                    self.config.pop_particle_count,
                    self.config.pop_particle_spread,
                    now_ms + self.config.pop_particle_lifetime_ms,
                ));

                self.score += self.config.points_per_balloon;
                self.events.push(GameEvent::BalloonPopped {
                    x: center_x,
                    y: center_y,
                });
                self.events.push(GameEvent::ScoreChanged(self.score));
            }
        }
        retain_unmarked(&mut self.balloons, &balloon_spent);

        // Surviving bullets fly on
        for (p_idx, bullet) in self.bullets.iter_mut().enumerate() {
            if bullet_spent[p_idx] {
                continue;
            }
            bullet.update(self.config.bullet_speed);
            if bullet.is_out_of_bounds(height) {
                bullet_spent[p_idx] = true;
            }
        }
        retain_unmarked(&mut self.bullets, &bullet_spent);

        // Power-ups rise and may be caught by the player
        let player_bounds = self.player.bounds();
        let mut collected = false;
        let mut powerup_spent = vec![false; self.powerups.len()];
        for (idx, powerup) in self.powerups.iter_mut().enumerate() {
            powerup.rise(rise);
            if powerup.is_out_of_bounds(height) {
                powerup_spent[idx] = true;
            } else if powerup.bounds().overlaps(&player_bounds) {
                powerup_spent[idx] = true;
                collected = true;
            }
        }
        retain_unmarked(&mut self.powerups, &powerup_spent);
        if collected {
            self.activate_multi_shot(now_ms);
        }

        // At most one level per frame
        if self.score >= self.level * self.config.points_per_level {
            self.level += 1;
            info!(level = self.level, score = self.score, "level up");
            self.events.push(GameEvent::LevelUp(self.level));
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn powerups(&self) -> &[PowerUp] {
        &self.powerups
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_multi_shot_active(&self) -> bool {
        self.multi_shot
    }

    /// Mutable access for tests and scripted scenarios
    pub fn balloons_mut(&mut self) -> &mut Vec<Balloon> {
        &mut self.balloons
    }

    pub fn bullets_mut(&mut self) -> &mut Vec<Bullet> {
        &mut self.bullets
    }

    pub fn powerups_mut(&mut self) -> &mut Vec<PowerUp> {
        &mut self.powerups
    }

    pub fn set_score(&mut self, score: u32) {
        self.score = score;
    }
}

/// Keeps items whose flag is false; `marked` is parallel to `items`
fn retain_unmarked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let mut flags = marked.iter();
    items.retain(|_| !flags.next().copied().unwrap_or(false));
}
