//! Brick Breaker entry point
//!
//! Native builds run a headless autoplay session against the reference
//! simulator and log how the round went. On the web the library is embedded
//! by the page, which supplies the physics engine and presentation.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::config::GameConfig;
    use brick_breaker::input::InputSample;
    use brick_breaker::physics::{HeadlessWorld, PhysicsWorld};
    use brick_breaker::{Game, GameEvent, platform};

    /// Frames before the demo gives up (about three minutes at 60 Hz)
    const MAX_FRAMES: u32 = 60 * 180;
    const FRAME_MS: f32 = 1000.0 / 60.0;

    platform::init_logging();
    log::info!("Brick Breaker (native) starting...");

    let mut config_path = None;
    let mut seed = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--seed" => seed = args.next().and_then(|s| s.parse::<u64>().ok()),
            _ => config_path = Some(arg),
        }
    }

    let config = match config_path {
        Some(path) => match GameConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };

    let mut world = HeadlessWorld::new();
    let mut game = match seed {
        Some(seed) => Game::with_seed(&mut world, config, seed),
        None => Game::new(&mut world, config),
    };
    game.start(&mut world);

    for frame in 0..MAX_FRAMES {
        // Autoplay: keep the paddle under the ball
        let ball_x = game
            .ball()
            .ball()
            .and_then(|b| world.position(b.body))
            .map(|p| p.x);
        if let Some(x) = ball_x {
            game.handle_input(
                &mut world,
                InputSample {
                    raw_x: x,
                    drag_active: true,
                },
            );
        }

        let sprites = game.frame(&mut world, FRAME_MS).len();

        for event in game.drain_events() {
            match event {
                GameEvent::HudChanged { score, lives } => {
                    log::debug!("score {} lives {} particles {}", score, lives, sprites)
                }
                GameEvent::RoundEnded { title, score, .. } => {
                    log::info!("{} - final score {} after {} frames", title, score, frame + 1);
                    return;
                }
                _ => {}
            }
        }
    }

    log::info!(
        "Demo stopped: score {}, lives {}, {} bricks left",
        game.score(),
        game.lives(),
        game.bricks().remaining_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM builds are driven by the host page through the library
}
