/// Integration tests for game logic
///
/// These drive whole sessions with a manual clock and a fixed seed and check
/// the gameplay rules: rising, popping, power-ups, levels and start/stop.
use balloon_pop::spawner::balloon_interval_ms;
use balloon_pop::{
    Balloon, Bullet, Clock, GameConfig, GameEvent, ManualClock, Palette, PowerUp, Session, Size,
};
use proptest::prelude::*;

const FRAME_MS: u64 = 16;

/// Started session with an empty field and the given clock time
fn empty_running_session(clock: &ManualClock) -> Session {
    let mut session = Session::new(GameConfig::default(), Some(1234)).unwrap();
    session.start(clock.now_ms());
    session.balloons_mut().clear();
    session.powerups_mut().clear();
    session.drain_events();
    session
}

fn balloon_at(x: i32, y: i32) -> Balloon {
    Balloon::new(x, y, Size::new(40, 60), Palette::Blue)
}

fn step(session: &mut Session, clock: &ManualClock) {
    clock.advance(FRAME_MS);
    session.tick(clock.now_ms());
}

#[test]
fn test_balloons_rise_by_two_plus_level() {
    let clock = ManualClock::new(0);
    let mut session = empty_running_session(&clock);
    session.balloons_mut().push(balloon_at(10, 0));
    session.balloons_mut().push(balloon_at(200, 100));

    step(&mut session, &clock);
    assert_eq!(session.balloons()[0].y, 3);
    assert_eq!(session.balloons()[1].y, 103);

    session.set_score(100);
    step(&mut session, &clock);
    // The level changes at the end of the frame, so this frame still rises by 3
    assert_eq!(session.level(), 2);
    assert_eq!(session.balloons()[0].y, 6);

    step(&mut session, &clock);
    assert_eq!(session.balloons()[0].y, 10);
}

#[test]
fn test_balloon_leaves_at_the_top() {
    let clock = ManualClock::new(0);
    let mut session = empty_running_session(&clock);
    session.balloons_mut().push(balloon_at(10, 597));

    step(&mut session, &clock);
    assert_eq!(session.balloons()[0].y, 600);

    step(&mut session, &clock);
    assert!(session.balloons().is_empty());
    assert_eq!(session.score(), 0);
}

#[test]
fn test_powerup_leaves_at_the_top() {
    let clock = ManualClock::new(0);
    let mut session = empty_running_session(&clock);
    // Far from the player's column so it cannot be collected
    session
        .powerups_mut()
        .push(PowerUp::new(0, 597, Size::new(30, 30)));

    step(&mut session, &clock);
    assert_eq!(session.powerups().len(), 1);
    assert_eq!(session.powerups()[0].y, 600);

    step(&mut session, &clock);
    assert!(session.powerups().is_empty());
    assert!(!session.is_multi_shot_active());
}

#[test]
fn test_shot_balloon_pops_with_events() {
    let clock = ManualClock::new(0);
    let mut session = empty_running_session(&clock);
    session.balloons_mut().push(balloon_at(175, 40));

    // Player centre is 200, a single bullet spans x 195..205 from y 70
    assert_eq!(session.shoot(clock.now_ms()), 1);
    step(&mut session, &clock);

    assert_eq!(session.score(), 10);
    assert!(session.balloons().is_empty());
    assert!(session.bullets().is_empty());

    let events = session.drain_events();
    assert!(events.contains(&GameEvent::Shot { bullets: 1 }));
    assert!(events.contains(&GameEvent::BalloonPopped { x: 195, y: 73 }));
    assert!(events.contains(&GameEvent::ScoreChanged(10)));
}

#[test]
fn test_multi_shot_pops_three_balloons_at_once() {
    let clock = ManualClock::new(0);
    let mut session = empty_running_session(&clock);
    let player_x = session.player().x;
    session
        .powerups_mut()
        .push(PowerUp::new(player_x, 0, Size::new(30, 30)));
    step(&mut session, &clock);
    assert!(session.is_multi_shot_active());

    // Narrow balloons so each bullet of the fan hits its own
    for x in [180, 195, 210] {
        session
            .balloons_mut()
            .push(Balloon::new(x, 80, Size::new(10, 20), Palette::Red));
    }
    assert_eq!(session.shoot(clock.now_ms()), 3);
    step(&mut session, &clock);

    assert_eq!(session.score(), 30);
    assert!(session.balloons().is_empty());
    assert!(session.bullets().is_empty());
}

#[test]
fn test_multi_shot_lasts_five_seconds() {
    let clock = ManualClock::new(0);
    let mut session = empty_running_session(&clock);
    let player_x = session.player().x;
    session
        .powerups_mut()
        .push(PowerUp::new(player_x, 0, Size::new(30, 30)));
    step(&mut session, &clock);
    let collected_at = clock.now_ms();

    while clock.now_ms() < collected_at + 4_990 {
        step(&mut session, &clock);
        assert_eq!(session.shoot(clock.now_ms()), 3);
    }

    clock.set(collected_at + 5_000);
    assert_eq!(session.shoot(clock.now_ms()), 1);
    assert!(
        session
            .drain_events()
            .contains(&GameEvent::MultiShotExpired)
    );
}

#[test]
fn test_level_up_only_once_for_big_jump() {
    let clock = ManualClock::new(0);
    let mut session = empty_running_session(&clock);
    session.set_score(250);

    step(&mut session, &clock);
    assert_eq!(session.level(), 2);
    let level_ups = session
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, GameEvent::LevelUp(_)))
        .count();
    assert_eq!(level_ups, 1);
}

#[test]
fn test_spawn_interval_table() {
    let config = GameConfig::default();
    assert_eq!(balloon_interval_ms(5, &config), 500);
    assert_eq!(balloon_interval_ms(8, &config), 300);
}

#[test]
fn test_balloons_spawn_on_schedule() {
    let clock = ManualClock::new(0);
    let mut session = Session::new(GameConfig::default(), Some(99)).unwrap();
    session.start(0);
    assert_eq!(session.balloons().len(), 1);

    session.tick(899);
    assert_eq!(session.balloons().len(), 1);
    session.tick(900);
    assert_eq!(session.balloons().len(), 2);
    session.tick(1_800);
    assert_eq!(session.balloons().len(), 3);

    // One power-up at start, the next after ten seconds
    assert_eq!(session.powerups().len(), 1);
    clock.set(10_000);
    session.tick(clock.now_ms());
    let spawned = session
        .drain_events()
        .into_iter()
        .filter(|e| *e == GameEvent::PowerUpSpawned)
        .count();
    assert_eq!(spawned, 2);
}

#[test]
fn test_faster_spawns_after_level_up() {
    let mut session = Session::new(GameConfig::default(), Some(5)).unwrap();
    session.start(0);
    session.balloons_mut().clear();
    session.powerups_mut().clear();
    session.set_score(400);
    for frame in 1..=4 {
        session.tick(frame);
    }
    assert_eq!(session.level(), 5);
    session.drain_events();

    // Next balloon was booked at level 1 for t=900, then every 500 ms
    session.tick(900);
    session.tick(1_399);
    session.tick(1_400);
    let spawned = session
        .drain_events()
        .into_iter()
        .filter(|e| *e == GameEvent::BalloonSpawned)
        .count();
    assert_eq!(spawned, 2);
}

#[test]
fn test_stop_halts_everything() {
    let clock = ManualClock::new(0);
    let mut session = empty_running_session(&clock);
    session.balloons_mut().push(balloon_at(10, 100));
    session
        .bullets_mut()
        .push(Bullet::new(300, 70, Size::new(10, 20)));
    session.stop();
    session.drain_events();

    for _ in 0..1_000 {
        step(&mut session, &clock);
    }

    assert_eq!(session.balloons().len(), 1);
    assert_eq!(session.balloons()[0].y, 100);
    assert_eq!(session.bullets()[0].y, 70);
    assert!(session.powerups().is_empty());
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_restart_after_stop_resumes_spawning() {
    let clock = ManualClock::new(0);
    let mut session = empty_running_session(&clock);
    session.stop();
    clock.set(5_000);
    session.tick(clock.now_ms());
    assert!(session.balloons().is_empty());

    session.start(clock.now_ms());
    assert_eq!(session.balloons().len(), 1);
    session.tick(5_900);
    assert_eq!(session.balloons().len(), 2);
}

proptest! {
    #[test]
    fn test_balloon_rise_without_collisions(
        xs in prop::collection::vec(0i32..360, 1..8),
        frames in 1usize..60,
    ) {
        let clock = ManualClock::new(0);
        let mut session = empty_running_session(&clock);
        for x in &xs {
            session.balloons_mut().push(balloon_at(*x, 0));
        }

        for frame in 1..=frames {
            let before: Vec<i32> = session.balloons().iter().map(|b| b.y).collect();
            let rise = 2 + session.level() as i32;
            step(&mut session, &clock);
            // Spawned balloons are appended at the end
            for (idx, y) in before.iter().enumerate() {
                prop_assert_eq!(session.balloons()[idx].y, y + rise, "frame {}", frame);
            }
        }
    }

    #[test]
    fn test_score_is_ten_per_pop(hits in 0usize..20) {
        let clock = ManualClock::new(0);
        let mut session = empty_running_session(&clock);
        for i in 0..hits {
            let x = (i as i32 % 8) * 45;
            session.balloons_mut().push(balloon_at(x, 300));
            session.bullets_mut().push(Bullet::new(x + 10, 320, Size::new(10, 20)));
        }
        step(&mut session, &clock);
        prop_assert_eq!(session.score(), hits as u32 * 10);
    }
}
