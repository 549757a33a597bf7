use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::audio::{AudioManager, SoundEffect};
use crate::clock::Clock;
use crate::entities::Direction;
use crate::events::GameEvent;
use crate::hud::Hud;
use crate::input::{InputAction, InputManager};
use crate::renderer::{GameRenderer, RenderView};
use crate::session::Session;

/// The main application: owns the session and wires it to the terminal,
/// the keyboard and the speakers.
pub struct App<C: Clock> {
    running: bool,
    session: Session,
    hud: Hud,
    clock: C,
    frame_duration: Duration,
    last_frame_time: Instant,
    fps: u32,
    /// internal components
    input_manager: InputManager,
    renderer: GameRenderer,
    audio_manager: AudioManager,
}

impl<C: Clock> App<C> {
    /// Construct a new instance of [`App`].
    pub fn new(session: Session, clock: C, audio_manager: AudioManager, target_fps: u32) -> Self {
        Self {
            running: true,
            session,
            hud: Hud::new(),
            clock,
            frame_duration: Duration::from_secs(1) / target_fps.max(1),
            last_frame_time: Instant::now(),
            fps: 0,
            input_manager: InputManager::new(),
            renderer: GameRenderer::new(),
            audio_manager,
        }
    }

    /// Run the application's main loop.
    pub fn run<B: Backend>(mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!(
            width = self.session.config().playfield_width,
            height = self.session.config().playfield_height,
            "entering game loop"
        );

        while self.running {
            let frame_start = Instant::now();

            // Calculate FPS
            let frame_time = frame_start.duration_since(self.last_frame_time);
            self.last_frame_time = frame_start;
            if frame_time.as_micros() > 0 {
                self.fps = (1_000_000 / frame_time.as_micros()) as u32;
            }

            self.input_manager.poll_events()?;
            let actions = self.input_manager.take_actions();
            self.process_actions(&actions);

            let now_ms = self.clock.now_ms();
            self.session.tick(now_ms);
            self.sync_presentation(now_ms);

            terminal.draw(|frame| {
                let view = RenderView {
                    session: &self.session,
                    hud: &self.hud,
                    now_ms,
                    area: frame.area(),
                    fps: self.fps,
                };
                self.renderer.render(frame, &view);
            })?;

            // Sleep out the rest of the frame to prevent CPU spinning
            if let Some(remaining) = self.frame_duration.checked_sub(frame_start.elapsed()) {
                std::thread::sleep(remaining);
            }
        }

        info!(
            score = self.session.score(),
            level = self.session.level(),
            "leaving game loop"
        );
        Ok(())
    }

    /// Process input actions and update game state accordingly
    pub fn process_actions(&mut self, actions: &[InputAction]) {
        for action in actions {
            match action {
                InputAction::Quit => {
                    self.running = false;
                }
                InputAction::Start => {
                    self.session.start(self.clock.now_ms());
                }
                InputAction::Stop => {
                    self.session.stop();
                }
                InputAction::MoveLeft => {
                    self.session.move_player(Direction::Left);
                }
                InputAction::MoveRight => {
                    self.session.move_player(Direction::Right);
                }
                InputAction::Fire => {
                    self.session.shoot(self.clock.now_ms());
                }
            }
        }
    }

    /// Reflects session events into the HUD and plays their sounds
    pub fn sync_presentation(&mut self, now_ms: u64) {
        for event in self.session.drain_events() {
            self.hud.apply(&event, now_ms);
            match event {
                GameEvent::Shot { bullets } => {
                    debug!(bullets, "shot fired");
                    self.audio_manager.play(SoundEffect::Shoot);
                }
                GameEvent::BalloonPopped { .. } => self.audio_manager.play(SoundEffect::Pop),
                GameEvent::PowerUpCollected { .. } => {
                    self.audio_manager.play(SoundEffect::PowerUp)
                }
                _ => {}
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn hud(&self) -> &Hud {
        &self.hud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::GameConfig;

    fn app() -> App<ManualClock> {
        let session = Session::new(GameConfig::default(), Some(9)).unwrap();
        App::new(session, ManualClock::new(0), AudioManager::silent(), 60)
    }

    #[test]
    fn test_start_fire_and_quit_actions() {
        let mut app = app();
        app.process_actions(&[InputAction::Start, InputAction::Fire]);
        assert!(app.session().is_running());
        assert_eq!(app.session().bullets().len(), 1);

        app.process_actions(&[InputAction::Stop]);
        assert!(!app.session().is_running());

        app.process_actions(&[InputAction::Quit]);
        assert!(!app.is_running());
    }

    #[test]
    fn test_moves_reach_the_session() {
        let mut app = app();
        app.process_actions(&[InputAction::Start]);
        let x = app.session().player().x;

        app.process_actions(&[InputAction::MoveRight, InputAction::MoveRight]);
        assert_eq!(app.session().player().x, x + 40);
        app.process_actions(&[InputAction::MoveLeft]);
        assert_eq!(app.session().player().x, x + 20);
    }

    #[test]
    fn test_score_reaches_hud_after_sync() {
        let mut app = app();
        app.process_actions(&[InputAction::Start]);
        app.session.set_score(90);
        app.session.tick(16);
        app.sync_presentation(16);
        // Level threshold not reached yet, nothing was popped
        assert_eq!(app.hud().level, 1);

        app.session.set_score(100);
        app.session.tick(32);
        app.sync_presentation(32);
        assert_eq!(app.hud().level, 2);
    }
}
