//! Brick Breaker - arcade brick-breaking rules over a 2D rigid-body simulator
//!
//! Core modules:
//! - `sim`: Round lifecycle, scoring, ball and brick management, collision resolution
//! - `physics`: The simulator contract plus a headless reference world
//! - `particles`: Debris bursts on brick destruction
//! - `audio`: Synthesized paddle/explosion cues
//! - `input`: Pointer/touch to paddle position mapping
//! - `config`: Data-driven game tuning
//! - `platform`: Browser/native differences (logging, audio output)

pub mod audio;
pub mod config;
pub mod error;
pub mod input;
pub mod particles;
pub mod physics;
pub mod platform;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;
pub use sim::{Game, GameEvent, GameStatus};

/// RGBA color, components in 0..=1
pub type Rgba = [f32; 4];

/// Fixed constants shared by the simulator and the rules
pub mod consts {
    /// Duration of one base physics step in milliseconds (60 Hz).
    /// Velocities are expressed in units per base step.
    pub const BASE_STEP_MS: f32 = 1000.0 / 60.0;

    /// Largest frame delta fed to the simulator, prevents tunnelling after a stall
    pub const MAX_FRAME_MS: f32 = 50.0;

    /// Particles fade below this alpha are treated as gone
    pub const ALPHA_EPSILON: f32 = 1e-4;
}

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    pub const BALL: Rgba = [1.0, 1.0, 1.0, 1.0];
    pub const PADDLE: Rgba = [0.2, 0.8, 0.4, 1.0];
    pub const WALL: Rgba = [0.3, 0.3, 0.4, 1.0];

    /// Brick palette, indexed by row (top row first)
    pub const BRICK_ROWS: [Rgba; 6] = [
        [0.91, 0.30, 0.24, 1.0], // red
        [0.90, 0.49, 0.13, 1.0], // orange
        [0.95, 0.77, 0.06, 1.0], // yellow
        [0.18, 0.80, 0.44, 1.0], // green
        [0.20, 0.60, 0.86, 1.0], // blue
        [0.61, 0.35, 0.71, 1.0], // purple
    ];

    /// Palette color for a brick row
    #[inline]
    pub fn for_row(row: usize) -> Rgba {
        BRICK_ROWS[row % BRICK_ROWS.len()]
    }
}
