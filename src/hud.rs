use crate::events::GameEvent;

/// How long the score stays highlighted after it changes
pub const SCORE_PULSE_MS: u64 = 100;

/// Text display of score and level, updated from session events
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub level: u32,
    pub multi_shot: bool,
    score_pulse_until_ms: u64,
}

impl Hud {
    pub fn new() -> Self {
        Self {
            level: 1,
            ..Self::default()
        }
    }

    /// Reflects one session event into the display
    pub fn apply(&mut self, event: &GameEvent, now_ms: u64) {
        match *event {
            GameEvent::ScoreChanged(score) => {
                self.score = score;
                self.score_pulse_until_ms = now_ms + SCORE_PULSE_MS;
            }
            GameEvent::LevelUp(level) => self.level = level,
            GameEvent::PowerUpCollected { .. } => self.multi_shot = true,
            GameEvent::MultiShotExpired => self.multi_shot = false,
            _ => {}
        }
    }

    pub fn is_score_pulsing(&self, now_ms: u64) -> bool {
        now_ms < self.score_pulse_until_ms
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn level_text(&self) -> String {
        format!("Level: {}", self.level)
    }
}
