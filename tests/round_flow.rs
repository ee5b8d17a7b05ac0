//! Whole-round runs through the headless simulator

use brick_breaker::audio::{AudioFeedback, AudioOutput};
use brick_breaker::config::GameConfig;
use brick_breaker::input::InputSample;
use brick_breaker::physics::{BodyRole, HeadlessWorld, PhysicsWorld};
use brick_breaker::sim::RoundOutcome;
use brick_breaker::{Game, GameEvent, GameStatus};

const FRAME_MS: f32 = 1000.0 / 60.0;

fn new_game(config: GameConfig, seed: u64) -> (HeadlessWorld, Game) {
    let mut world = HeadlessWorld::new();
    let audio = AudioFeedback::with_opener(
        &config.audio,
        Box::new(|| None::<Box<dyn AudioOutput>>),
    );
    let game = Game::with_audio(&mut world, config, seed, audio);
    (world, game)
}

fn ball_speed(world: &HeadlessWorld, game: &Game) -> Option<f32> {
    let body = game.ball().ball()?.body;
    world.velocity(body).map(|v| v.length())
}

fn track_ball(world: &mut HeadlessWorld, game: &mut Game) {
    let x = game
        .ball()
        .ball()
        .and_then(|b| world.position(b.body))
        .map(|p| p.x);
    if let Some(x) = x {
        game.handle_input(
            world,
            InputSample {
                raw_x: x,
                drag_active: true,
            },
        );
    }
}

#[test]
fn speed_limit_holds_every_frame() {
    let (mut world, mut game) = new_game(GameConfig::default(), 1234);
    game.start(&mut world);

    let limit = game.config().ball.speed_limit;
    for _ in 0..3000 {
        track_ball(&mut world, &mut game);
        game.frame(&mut world, FRAME_MS);
        if let Some(speed) = ball_speed(&world, &game) {
            assert!(speed <= limit + 1e-3, "ball speed {} over limit", speed);
        }
        if game.status() != GameStatus::Playing {
            break;
        }
    }
}

#[test]
fn score_matches_destroyed_rows() {
    let (mut world, mut game) = new_game(GameConfig::default(), 99);
    game.start(&mut world);

    let mut from_events = 0;
    for _ in 0..3000 {
        track_ball(&mut world, &mut game);
        game.frame(&mut world, FRAME_MS);
        for event in game.drain_events() {
            if let GameEvent::BrickDestroyed { row, points, .. } = event {
                assert_eq!(points, 10 * (6 - row as u32));
                from_events += points;
            }
        }
        if game.status() != GameStatus::Playing {
            break;
        }
    }

    let expected: u32 = game
        .bricks()
        .bricks()
        .iter()
        .filter(|b| !b.alive)
        .map(|b| 10 * (6 - b.row as u32))
        .sum();
    assert_eq!(game.score(), expected);
    assert_eq!(game.score(), from_events);
    assert_eq!(
        world.count_role(BodyRole::Brick),
        game.bricks().remaining_count()
    );
}

#[test]
fn missing_every_ball_ends_in_game_over() {
    // Paddle parked below the out-of-bounds line, so nothing ever returns the ball.
    // Straight-up launches only dig one column, so the grid can not be cleared.
    let mut config = GameConfig::default();
    config.paddle.bottom_offset = -200.0;
    config.ball.launch_jitter = 0.0;
    let (mut world, mut game) = new_game(config, 5);
    game.start(&mut world);
    game.drain_events();

    let mut events = Vec::new();
    let mut frames = 0;
    while game.status() == GameStatus::Playing && frames < 60 * 600 {
        game.frame(&mut world, FRAME_MS);
        events.extend(game.drain_events());
        frames += 1;
    }

    assert_eq!(game.status(), GameStatus::GameOver);
    assert_eq!(game.lives(), 0);
    assert_eq!(game.pending_tasks(), 0);

    let lives_lost: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            GameEvent::LifeLost { lives } => Some(*lives),
            _ => None,
        })
        .collect();
    assert_eq!(lives_lost, vec![4, 3, 2, 1, 0]);

    let ended: Vec<&GameEvent> = events
        .iter()
        .filter(|e| matches!(e, GameEvent::RoundEnded { .. }))
        .collect();
    assert_eq!(ended.len(), 1);
    assert!(matches!(
        ended[0],
        GameEvent::RoundEnded {
            outcome: RoundOutcome::Lost,
            ..
        }
    ));
    assert!(matches!(events.last(), Some(GameEvent::RoundEnded { .. })));

    // Four respawns, never more than one ball at a time
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, GameEvent::BallLaunched))
            .count(),
        4
    );
    assert_eq!(world.count_role(BodyRole::Ball), 1);
}

#[test]
fn restart_mid_round_resets_everything() {
    let (mut world, mut game) = new_game(GameConfig::default(), 77);
    game.start(&mut world);
    for _ in 0..600 {
        track_ball(&mut world, &mut game);
        game.frame(&mut world, FRAME_MS);
    }

    game.restart(&mut world);
    assert_eq!(game.status(), GameStatus::Playing);
    assert_eq!(game.score(), 0);
    assert_eq!(game.lives(), 5);
    assert_eq!(game.bricks().remaining_count(), 48);
    assert_eq!(world.count_role(BodyRole::Brick), 48);
    assert_eq!(world.count_role(BodyRole::Ball), 1);
    assert!(game.particles().is_empty());
    assert!((ball_speed(&world, &game).unwrap() - 10.0).abs() < 1e-3);
}

#[test]
fn same_seed_same_round() {
    let run = |seed| {
        let (mut world, mut game) = new_game(GameConfig::default(), seed);
        game.start(&mut world);
        for _ in 0..900 {
            track_ball(&mut world, &mut game);
            game.frame(&mut world, FRAME_MS);
        }
        (game.score(), game.lives(), game.bricks().remaining_count())
    };
    assert_eq!(run(2024), run(2024));
}
