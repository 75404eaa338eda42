//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per animation frame, no wall-clock reads
//! - Seeded RNG only
//! - Stable iteration order (brick insertion order)
//! - No rendering, audio or platform dependencies; effects leave as signals

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, ball_rect_overlap};
pub use state::{
    Ball, BallOutcome, Board, Brick, GamePhase, GameState, Paddle, Particle, RenderFrame, Signal,
};
pub use tick::{TickInput, generate_bricks, tick};
