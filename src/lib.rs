// Library exports for testing
pub use app::App;
pub use audio::{AudioManager, SoundEffect};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use config::{GameConfig, Size};
pub use entities::{
    Balloon, Bounds, Bullet, Direction, Palette, Particle, Player, PowerUp,
};
pub use events::GameEvent;
pub use hud::Hud;
pub use scheduler::{Scheduler, TimerEvent};
pub use session::Session;

pub mod app;
pub mod audio;
pub mod clock;
pub mod config;
pub mod entities;
pub mod events;
pub mod hud;
pub mod input;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod spawner;
