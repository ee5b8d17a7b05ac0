//! Game rules
//!
//! Everything that decides what happens in a round lives here:
//! - Session status, score and lives
//! - Ball and brick lifetimes (as simulator bodies)
//! - Collision resolution and deferred respawns
//!
//! Nothing here renders, touches the DOM, or integrates physics.

pub mod ball;
pub mod bricks;
pub mod game;
pub mod resolver;
pub mod schedule;
pub mod state;

pub use ball::{Ball, BallController, BallState, clamp_velocity, launch_velocity};
pub use bricks::{Brick, BrickField, BrickLayout};
pub use game::{Deferred, Game};
pub use resolver::{PairKind, classify};
pub use schedule::{Scheduler, TaskToken};
pub use state::{GameEvent, GameSession, GameStatus, LifeOutcome, RoundOutcome, brick_points};
