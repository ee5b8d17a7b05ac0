//! Collision resolution: turns simulator events into rule changes
//!
//! `Game` is registered as the simulator's [`StepListener`]. Collision pairs
//! are classified by role and dispatched. The per-step hook checks for a lost
//! ball, re-applies the speed limit, and runs the fallback win check. The
//! speed limit is applied again after collisions and at the end of each step.

use crate::physics::{BodyId, BodyRole, CollisionPair, PhysicsWorld, StepListener};

use super::game::Game;

/// What a collision pair means for the rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairKind {
    BallBrick { ball: BodyId, brick: BodyId },
    BallPaddle { ball: BodyId, paddle: BodyId },
    /// Walls, or anything else the rules do not care about
    Other,
}

pub fn classify(pair: &CollisionPair) -> PairKind {
    if let Some((ball, brick)) = pair.match_roles(BodyRole::Ball, BodyRole::Brick) {
        PairKind::BallBrick { ball, brick }
    } else if let Some((ball, paddle)) = pair.match_roles(BodyRole::Ball, BodyRole::Paddle) {
        PairKind::BallPaddle { ball, paddle }
    } else {
        PairKind::Other
    }
}

impl Game {
    fn on_ball_brick(&mut self, world: &mut dyn PhysicsWorld, body: BodyId) {
        if !self.session.is_playing() {
            return;
        }
        // Pairs can be reported again for a brick that is already gone
        let Some(brick) = self.bricks.alive_by_body(body).copied() else {
            return;
        };

        self.audio.play_brick_explosion();
        let count = self.config.particles.burst_count;
        self.particles
            .spawn_burst(&mut self.rng, brick.position, brick.color, count);

        if let Some(removed) = self.bricks.remove(world, body) {
            self.brick_destroyed(world, &removed);
        }

        // Restitution > 1 just added energy
        self.ball.enforce_speed_limit(world);
    }
}

impl StepListener for Game {
    fn before_update(&mut self, world: &mut dyn PhysicsWorld) {
        if self.session.is_playing()
            && self
                .ball
                .is_out_of_bounds(world, self.config.out_of_bounds_y())
        {
            self.ball.mark_lost(world);
            self.ball_lost(world);
        }

        // Wall bounces gain energy too
        self.ball.enforce_speed_limit(world);

        if self.session.is_playing() && self.bricks.remaining_count() == 0 {
            self.check_cleared(world);
        }
    }

    fn collision_start(&mut self, world: &mut dyn PhysicsWorld, pairs: &[CollisionPair]) {
        for pair in pairs {
            match classify(pair) {
                PairKind::BallBrick { brick, .. } => self.on_ball_brick(world, brick),
                PairKind::BallPaddle { .. } => self.audio.play_paddle_hit(),
                PairKind::Other => {}
            }
        }
        // Paddle and wall bounces gain energy as well
        self.ball.enforce_speed_limit(world);
    }

    fn after_update(&mut self, world: &mut dyn PhysicsWorld) {
        self.ball.enforce_speed_limit(world);
    }
}
