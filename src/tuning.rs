//! Data-driven game balance
//!
//! Every gameplay constant, loadable from JSON so balance passes don't need
//! a recompile. Defaults match [`crate::consts`]. Unknown knobs in the JSON
//! are rejected; missing ones fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable gameplay parameters for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    // Paddle
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Distance of the paddle's top edge from the board bottom
    pub paddle_offset: f32,

    // Ball
    pub ball_radius: f32,
    /// Speed at serve (pixels per tick)
    pub ball_speed_base: f32,
    /// Hard speed cap
    pub ball_speed_max: f32,
    /// Multiplicative speed-up per paddle contact
    pub paddle_speedup: f32,
    /// Horizontal velocity per pixel of offset from paddle center
    pub paddle_spin: f32,
    /// Half-width of the launch cone around straight-up (radians)
    pub launch_cone: f32,

    // Brick field
    pub brick_rows: usize,
    pub brick_cols: usize,
    pub brick_gap: f32,
    pub brick_height: f32,
    pub field_padding: f32,
    pub field_top: f32,

    // Scoring
    pub brick_score: u64,
    pub start_lives: u8,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_offset: PADDLE_OFFSET,
            ball_radius: BALL_RADIUS,
            ball_speed_base: BALL_SPEED_BASE,
            ball_speed_max: BALL_SPEED_MAX,
            paddle_speedup: PADDLE_SPEEDUP,
            paddle_spin: PADDLE_SPIN,
            launch_cone: LAUNCH_CONE,
            brick_rows: BRICK_ROWS,
            brick_cols: BRICK_COLS,
            brick_gap: BRICK_GAP,
            brick_height: BRICK_HEIGHT,
            field_padding: FIELD_PADDING,
            field_top: FIELD_TOP,
            brick_score: BRICK_SCORE,
            start_lives: START_LIVES,
        }
    }
}

impl Tuning {
    /// Parse a tuning override from JSON; absent fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Brick width for a given board width: the field fills the available
    /// width minus padding, split evenly with fixed gaps between columns.
    pub fn brick_width(&self, board_width: f32) -> f32 {
        let available = board_width - self.field_padding * 2.0;
        (available - (self.brick_cols as f32 - 1.0) * self.brick_gap) / self.brick_cols as f32
    }
}
