//! The game aggregate: one owner for session, ball, bricks and feedback
//!
//! All mutation happens through `&mut Game` on the frame loop's thread, so
//! collision handlers, per-step checks and deferred respawns all see one
//! consistent state.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::ball::BallController;
use super::bricks::{Brick, BrickField, BrickLayout};
use super::schedule::Scheduler;
use super::state::{GameEvent, GameSession, GameStatus, LifeOutcome, RoundOutcome, brick_points};
use crate::audio::AudioFeedback;
use crate::colors;
use crate::config::GameConfig;
use crate::consts::MAX_FRAME_MS;
use crate::input::{InputController, InputSample};
use crate::particles::{ParticleSystem, Sprites};
use crate::physics::{self, BodyDesc, BodyRole, PhysicsWorld};

/// Work scheduled for later on the game clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deferred {
    /// Replace the lost ball and launch it, if `round` is still the current one
    Respawn { round: u64 },
}

/// Complete game: rules, bodies it owns, and feedback subsystems
#[derive(Debug)]
pub struct Game {
    pub(super) config: GameConfig,
    pub(super) session: GameSession,
    pub(super) ball: BallController,
    pub(super) bricks: BrickField,
    pub(super) layout: BrickLayout,
    pub(super) input: InputController,
    pub(super) particles: ParticleSystem,
    pub(super) audio: AudioFeedback,
    pub(super) scheduler: Scheduler<Deferred>,
    pub(super) rng: Pcg32,
    pub(super) events: Vec<GameEvent>,
}

impl Game {
    /// Create a game with an unseeded RNG and the platform audio output
    pub fn new(world: &mut dyn PhysicsWorld, config: GameConfig) -> Self {
        Self::with_seed(world, config, crate::platform::entropy_seed())
    }

    /// Create a game whose launch angles and particle bursts follow `seed`
    pub fn with_seed(world: &mut dyn PhysicsWorld, config: GameConfig, seed: u64) -> Self {
        let audio = AudioFeedback::new(&config.audio);
        Self::with_audio(world, config, seed, audio)
    }

    /// Create a game with an explicit audio backend
    pub fn with_audio(
        world: &mut dyn PhysicsWorld,
        config: GameConfig,
        seed: u64,
        audio: AudioFeedback,
    ) -> Self {
        spawn_walls(world, &config);
        let paddle = world.add_body(
            BodyDesc::rect(
                BodyRole::Paddle,
                config.paddle.width,
                config.paddle.height,
                colors::PADDLE,
            ),
            config.paddle_home(),
        );

        let layout = BrickLayout::from_config(&config);
        let mut bricks = BrickField::new();
        bricks.generate(world, &layout);

        let mut ball = BallController::new(&config);
        ball.create(world);

        log::info!("Game created with seed: {}", seed);

        Self {
            input: InputController::new(paddle, &config),
            particles: ParticleSystem::new(config.particles.clone(), config.field.height),
            session: GameSession::new(),
            scheduler: Scheduler::new(),
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            ball,
            bricks,
            layout,
            audio,
            config,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn status(&self) -> GameStatus {
        self.session.status
    }

    pub fn score(&self) -> u32 {
        self.session.score
    }

    pub fn lives(&self) -> u32 {
        self.session.lives
    }

    pub fn bricks(&self) -> &BrickField {
        &self.bricks
    }

    pub fn ball(&self) -> &BallController {
        &self.ball
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn input(&self) -> &InputController {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputController {
        &mut self.input
    }

    pub fn audio_mut(&mut self) -> &mut AudioFeedback {
        &mut self.audio
    }

    /// Deferred actions (respawns) still waiting to fire
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.pending()
    }

    /// Hand queued presentation events to the caller
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit_hud(&mut self) {
        self.events.push(GameEvent::HudChanged {
            score: self.session.score,
            lives: self.session.lives,
        });
    }

    /// Begin a round from `Idle`, `GameOver` or `Won`
    pub fn start(&mut self, world: &mut dyn PhysicsWorld) {
        if !self.session.status.can_start() {
            log::debug!("start() ignored: round already in progress");
            return;
        }
        let dropped = self.scheduler.cancel_all();
        if dropped > 0 {
            log::debug!("Cancelled {} pending task(s)", dropped);
        }
        // A cleared grid would end the new round on its first step
        if self.bricks.remaining_count() == 0 {
            self.bricks.generate(world, &self.layout);
        }

        self.session.begin(self.config.rules.initial_lives);
        self.events.push(GameEvent::PanelsHidden);
        self.emit_hud();
        log::info!("Round {} started", self.session.round);

        self.ball.ensure_at_spawn(world);
        self.launch(world);
    }

    /// Tear everything down and start a fresh round, from any state
    pub fn restart(&mut self, world: &mut dyn PhysicsWorld) {
        self.scheduler.cancel_all();
        self.bricks.clear(world);
        self.ball.destroy(world);
        self.particles.clear();
        self.session.reset(self.config.rules.initial_lives);
        self.bricks.generate(world, &self.layout);
        self.input.center_paddle(world);
        log::info!("Game restarted");
        self.start(world);
    }

    fn launch(&mut self, world: &mut dyn PhysicsWorld) {
        let active = self.session.is_playing();
        if self.ball.launch(world, &mut self.rng, active).is_some() {
            self.events.push(GameEvent::BallLaunched);
        }
    }

    /// Score a destroyed brick and end the round if it was the last one
    pub fn brick_destroyed(&mut self, world: &mut dyn PhysicsWorld, brick: &Brick) {
        let points = brick_points(
            self.config.rules.points_per_row,
            self.bricks.total_rows(),
            brick.row,
        );
        if !self.session.award(points) {
            log::debug!("brick_destroyed() ignored: not playing");
            return;
        }
        self.events.push(GameEvent::BrickDestroyed {
            row: brick.row,
            col: brick.col,
            points,
        });
        self.emit_hud();
        self.check_cleared(world);
    }

    /// Won transition shared by the collision path and the per-step fallback.
    /// Returns true only for the call that actually ended the round.
    pub(super) fn check_cleared(&mut self, world: &mut dyn PhysicsWorld) -> bool {
        if self.bricks.remaining_count() != 0 || !self.session.win() {
            return false;
        }
        self.end_round(world, RoundOutcome::Won);
        true
    }

    /// The ball fell out of the field
    pub fn ball_lost(&mut self, world: &mut dyn PhysicsWorld) {
        let Some(outcome) = self.session.lose_life() else {
            log::debug!("ball_lost() ignored: not playing");
            return;
        };
        self.events.push(GameEvent::LifeLost {
            lives: self.session.lives,
        });
        self.emit_hud();

        match outcome {
            LifeOutcome::GameOver => self.end_round(world, RoundOutcome::Lost),
            LifeOutcome::Respawn { lives } => {
                log::info!("Ball lost, {} lives left", lives);
                self.scheduler.schedule(
                    self.config.rules.respawn_delay_ms,
                    Deferred::Respawn {
                        round: self.session.round,
                    },
                );
            }
        }
    }

    fn end_round(&mut self, world: &mut dyn PhysicsWorld, outcome: RoundOutcome) {
        self.scheduler.cancel_all();
        self.ball.freeze(world);
        log::info!(
            "Round {} ended: {} (score {})",
            self.session.round,
            outcome.title(),
            self.session.score
        );
        self.events.push(GameEvent::RoundEnded {
            outcome,
            title: outcome.title().to_string(),
            score: self.session.score,
        });
    }

    fn run_deferred(&mut self, world: &mut dyn PhysicsWorld, task: Deferred) {
        match task {
            Deferred::Respawn { round } => {
                if !self.session.is_playing() || round != self.session.round {
                    log::debug!("Stale respawn for round {} dropped", round);
                    return;
                }
                self.ball.destroy(world);
                self.ball.create(world);
                self.launch(world);
            }
        }
    }

    /// Feed one pointer/touch sample
    pub fn handle_input(&mut self, world: &mut dyn PhysicsWorld, sample: InputSample) {
        self.input.apply(world, sample);
    }

    /// Run one frame: due deferred work, one simulator step with collision
    /// resolution, then particle animation. Returns this frame's particle
    /// draw calls.
    pub fn frame(&mut self, world: &mut dyn PhysicsWorld, dt_ms: f32) -> Sprites<'_> {
        let dt_ms = dt_ms.clamp(0.0, MAX_FRAME_MS);

        for task in self.scheduler.advance(dt_ms) {
            self.run_deferred(world, task);
        }

        physics::run_step(world, self, dt_ms);

        self.particles.step()
    }
}

/// Left, right and top walls just outside the field; the bottom stays open
fn spawn_walls(world: &mut dyn PhysicsWorld, config: &GameConfig) {
    let (w, h, t) = (config.field.width, config.field.height, config.field.wall_thickness);
    let walls = [
        (Vec2::new(-t / 2.0, h / 2.0), Vec2::new(t, h + 2.0 * t)),
        (Vec2::new(w + t / 2.0, h / 2.0), Vec2::new(t, h + 2.0 * t)),
        (Vec2::new(w / 2.0, -t / 2.0), Vec2::new(w + 2.0 * t, t)),
    ];
    for (center, size) in walls {
        world.add_body(BodyDesc::rect(BodyRole::Wall, size.x, size.y, colors::WALL), center);
    }
}
