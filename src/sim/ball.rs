//! Ball lifecycle: creation, respawn, launch and speed regulation

use glam::Vec2;
use rand::Rng;

use crate::colors;
use crate::config::GameConfig;
use crate::physics::{BodyDesc, BodyId, BodyRole, Material, PhysicsWorld};

/// Ball state - in play or already counted as lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallState {
    Live,
    /// Fell out of the field; waiting for respawn or end of round
    Lost,
}

/// The single ball in play
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub body: BodyId,
    pub state: BallState,
}

/// Launch velocity for a uniform sample `u` in [0, 1): straight up plus
/// up to `jitter` radians either side
pub fn launch_velocity(u: f32, speed: f32, jitter: f32) -> Vec2 {
    let angle = -std::f32::consts::FRAC_PI_2 + (u - 0.5) * 2.0 * jitter;
    Vec2::from_angle(angle) * speed
}

/// Scale `velocity` down to `max_speed` if it is faster, keeping its direction
#[inline]
pub fn clamp_velocity(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed && speed > 0.0 {
        velocity * (max_speed / speed)
    } else {
        velocity
    }
}

/// Owns the ball body and its tuning
#[derive(Debug, Clone)]
pub struct BallController {
    ball: Option<Ball>,
    spawn: Vec2,
    radius: f32,
    material: Material,
    launch_speed: f32,
    speed_limit: f32,
    launch_jitter: f32,
}

impl BallController {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            ball: None,
            spawn: config.ball_spawn(),
            radius: config.ball.radius,
            material: Material {
                restitution: config.ball.restitution,
                friction: config.ball.friction,
                friction_air: config.ball.friction_air,
            },
            launch_speed: config.ball.launch_speed,
            speed_limit: config.ball.speed_limit,
            launch_jitter: config.ball.launch_jitter,
        }
    }

    pub fn ball(&self) -> Option<&Ball> {
        self.ball.as_ref()
    }

    pub fn exists(&self) -> bool {
        self.ball.is_some()
    }

    pub fn speed_limit(&self) -> f32 {
        self.speed_limit
    }

    /// Create a resting ball at the spawn point. Returns false if one already exists.
    pub fn create(&mut self, world: &mut dyn PhysicsWorld) -> bool {
        if self.ball.is_some() {
            log::debug!("Ball already exists, not creating another");
            return false;
        }
        let desc = BodyDesc::circle(BodyRole::Ball, self.radius, self.material, colors::BALL);
        let body = world.add_body(desc, self.spawn);
        world.set_velocity(body, Vec2::ZERO);
        self.ball = Some(Ball {
            body,
            state: BallState::Live,
        });
        true
    }

    /// Remove the ball body, if any
    pub fn destroy(&mut self, world: &mut dyn PhysicsWorld) {
        if let Some(ball) = self.ball.take() {
            world.remove_body(ball.body);
        }
    }

    /// Make sure exactly one live ball rests at the spawn point
    pub fn ensure_at_spawn(&mut self, world: &mut dyn PhysicsWorld) {
        match self.ball.as_mut() {
            Some(ball) => {
                world.set_position(ball.body, self.spawn);
                world.set_velocity(ball.body, Vec2::ZERO);
                ball.state = BallState::Live;
            }
            None => {
                self.create(world);
            }
        }
    }

    /// Give the ball its launch velocity. Does nothing unless `round_active`.
    pub fn launch<R: Rng + ?Sized>(
        &mut self,
        world: &mut dyn PhysicsWorld,
        rng: &mut R,
        round_active: bool,
    ) -> Option<Vec2> {
        if !round_active {
            log::debug!("Launch ignored: no active round");
            return None;
        }
        let ball = self.ball.as_ref()?;
        let velocity = launch_velocity(rng.random::<f32>(), self.launch_speed, self.launch_jitter);
        world.set_velocity(ball.body, velocity);
        Some(velocity)
    }

    /// Clamp the ball speed to `max_speed`. Returns true if it had to slow down.
    pub fn clamp_speed(&self, world: &mut dyn PhysicsWorld, max_speed: f32) -> bool {
        let Some(ball) = self.ball.as_ref() else {
            return false;
        };
        let Some(velocity) = world.velocity(ball.body) else {
            return false;
        };
        let clamped = clamp_velocity(velocity, max_speed);
        if clamped != velocity {
            world.set_velocity(ball.body, clamped);
            true
        } else {
            false
        }
    }

    /// Clamp to the configured speed limit
    pub fn enforce_speed_limit(&self, world: &mut dyn PhysicsWorld) -> bool {
        self.clamp_speed(world, self.speed_limit)
    }

    /// True if the ball is live and has fallen past `limit_y`
    pub fn is_out_of_bounds(&self, world: &dyn PhysicsWorld, limit_y: f32) -> bool {
        match self.ball {
            Some(Ball {
                body,
                state: BallState::Live,
            }) => world.position(body).is_some_and(|p| p.y > limit_y),
            _ => false,
        }
    }

    /// Stop a live ball and mark it lost. Returns false if it was not live.
    pub fn mark_lost(&mut self, world: &mut dyn PhysicsWorld) -> bool {
        match self.ball.as_mut() {
            Some(ball) if ball.state == BallState::Live => {
                world.set_velocity(ball.body, Vec2::ZERO);
                ball.state = BallState::Lost;
                true
            }
            _ => false,
        }
    }

    /// Zero the ball's velocity without changing its state
    pub fn freeze(&self, world: &mut dyn PhysicsWorld) {
        if let Some(ball) = self.ball.as_ref() {
            world.set_velocity(ball.body, Vec2::ZERO);
        }
    }
}
