//! Neon Breaker - a brick-breaker arcade game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `dispatch`: Signal fan-out to external sound/visual handlers
//! - `tuning`: Data-driven game balance
//!
//! Rendering, UI screens and audio synthesis are external collaborators:
//! the core exposes a [`sim::RenderFrame`] snapshot per tick and emits
//! [`sim::Signal`]s for presentation layers to react to.

pub mod dispatch;
pub mod sim;
pub mod tuning;

pub use dispatch::{Dispatcher, SignalHandler};
pub use tuning::Tuning;

/// Game configuration constants
///
/// These are the stock values; [`tuning::Tuning`] carries the same knobs
/// as runtime-loadable data and defaults to them.
pub mod consts {
    /// Paddle dimensions (pixels)
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 15.0;
    /// Distance of the paddle's top edge from the board bottom
    pub const PADDLE_OFFSET: f32 = 50.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 8.0;
    /// Speed at serve (pixels per tick)
    pub const BALL_SPEED_BASE: f32 = 6.0;
    /// Speed cap; paddle hits can never push past this
    pub const BALL_SPEED_MAX: f32 = 12.0;
    /// Multiplicative speed-up per paddle contact
    pub const PADDLE_SPEEDUP: f32 = 1.05;
    /// Horizontal velocity per pixel of offset from paddle center
    pub const PADDLE_SPIN: f32 = 0.15;
    /// Half-width of the launch cone around straight-up (radians)
    pub const LAUNCH_CONE: f32 = 0.4;

    /// Brick field layout
    pub const BRICK_ROWS: usize = 5;
    pub const BRICK_COLS: usize = 8;
    pub const BRICK_GAP: f32 = 10.0;
    pub const BRICK_HEIGHT: f32 = 25.0;
    /// Horizontal padding between the field and the board edges
    pub const FIELD_PADDING: f32 = 20.0;
    /// Y coordinate of the first brick row
    pub const FIELD_TOP: f32 = 80.0;

    /// Score per destroyed brick
    pub const BRICK_SCORE: u64 = 10;
    /// Lives at round start
    pub const START_LIVES: u8 = 3;

    /// Particle burst sizes
    pub const PADDLE_BURST: usize = 8;
    pub const BRICK_BURST: usize = 12;
    pub const DEATH_BURST: usize = 20;
    pub const WIN_BURST: usize = 100;

    /// Row colors, cycled by row index (0xRRGGBB)
    pub const BRICK_PALETTE: [u32; 5] = [
        0xbc13fe, // Purple
        0x00f3ff, // Cyan
        0x00ff88, // Green
        0xffff00, // Yellow
        0xff0055, // Red
    ];

    /// Paddle spark color
    pub const SPARK_COLOR: u32 = 0xffffff;
    /// Ball-loss burst color
    pub const DEATH_COLOR: u32 = 0xff0055;
    /// Win celebration burst color
    pub const WIN_COLOR: u32 = 0x00ff88;
}
