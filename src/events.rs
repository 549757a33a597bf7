/// Things that happened inside a session, drained by the presentation layer
/// to drive sound, the HUD and the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Stopped,
    Shot { bullets: usize },
    BalloonSpawned,
    PowerUpSpawned,
    BalloonPopped { x: i32, y: i32 },
    ScoreChanged(u32),
    PowerUpCollected { until_ms: u64 },
    MultiShotExpired,
    LevelUp(u32),
}
