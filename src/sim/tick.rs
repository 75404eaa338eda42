//! Per-frame simulation tick
//!
//! Core game loop that advances one session deterministically. One call per
//! animation frame; no dt scaling, velocities are in pixels per tick.
//!
//! Collision resolution is pure state transition; every side effect the
//! outside world cares about comes back as a [`Signal`] for the dispatcher.

use glam::Vec2;

use super::collision::{Rect, ball_rect_overlap};
use super::state::{BallOutcome, Brick, GamePhase, GameState, Signal};
use crate::consts::*;

/// Input sampled for a single tick
///
/// The pointer position is the last sample before the tick; one-shot action
/// flags are cleared by the caller after each tick.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer horizontal position for paddle control
    pub pointer_x: Option<f32>,
    /// Launch the ball (click while playing and ball not launched)
    pub launch: bool,
    /// Start a game from the menu
    pub start: bool,
    /// Restart after game over or win (full re-initialization)
    pub restart: bool,
    /// Idle/demo mode - a scripted paddle plays the game
    pub idle_mode: bool,
}

/// Advance the session by one tick, returning the signals it emitted.
pub fn tick(state: &mut GameState, input: &TickInput) -> Vec<Signal> {
    let mut signals = Vec::new();

    let mut input = input.clone();
    if input.idle_mode {
        drive_idle(state, &mut input);
    }
    let input = &input;

    match state.phase {
        GamePhase::Menu => {
            // Paddle already responds on the attract screen
            if let Some(pointer_x) = input.pointer_x {
                state.paddle.track(pointer_x, state.board.width);
            }
            if input.start {
                state.start_round();
            }
        }

        GamePhase::Playing => {
            state.time_ticks += 1;

            if let Some(pointer_x) = input.pointer_x {
                state.paddle.track(pointer_x, state.board.width);
            }
            if input.launch {
                state.ball.launch();
            }

            advance_ball(state, &mut signals);
            if state.phase == GamePhase::Playing {
                check_brick_collision(state, &mut signals);
            }
        }

        GamePhase::GameOver | GamePhase::Win => {
            if input.restart || input.start {
                state.start_round();
            }
        }
    }

    // Particles keep animating in every phase so loss and win bursts decay
    // on the end screens
    for particle in state.particles.iter_mut() {
        particle.update();
    }
    state.particles.retain(|p| p.life > 0.0);

    signals
}

/// Advance the ball and resolve the driver-level consequences of a loss.
fn advance_ball(state: &mut GameState, signals: &mut Vec<Signal>) {
    let (board, tuning) = (state.board, state.tuning.clone());
    let paddle = state.paddle.clone();
    let outcome = state.ball.advance(&board, &paddle, &tuning, signals);

    // Contact sparks at the paddle hit point
    if let Some(Signal::PaddleHit { pos }) = signals
        .iter()
        .rev()
        .find(|s| matches!(s, Signal::PaddleHit { .. }))
        .copied()
    {
        state.spawn_particles(pos, SPARK_COLOR, PADDLE_BURST);
    }

    if outcome == BallOutcome::BottomOut {
        lose_life(state, signals);
    }
}

/// Bottom-wall contact: decrement lives, burst, then either reset the ball
/// or end the round.
fn lose_life(state: &mut GameState, signals: &mut Vec<Signal>) {
    state.lives = state.lives.saturating_sub(1);
    let loss_pos = state.ball.pos;
    state.spawn_particles(loss_pos, DEATH_COLOR, DEATH_BURST);
    signals.push(Signal::LifeLost { lives: state.lives });
    log::debug!("life lost, {} remaining", state.lives);

    if state.lives == 0 {
        // Ball deliberately not reset; the round is over
        state.phase = GamePhase::GameOver;
        signals.push(Signal::GameOver { score: state.score });
        log::info!("game over with score {}", state.score);
    } else {
        let (paddle, tuning) = (state.paddle.clone(), state.tuning.clone());
        state.ball.reset(&paddle, &tuning, &mut state.rng);
    }
}

/// Test the ball against each alive brick in insertion order; the first
/// match wins and at most one brick resolves per tick.
fn check_brick_collision(state: &mut GameState, signals: &mut Vec<Signal>) {
    let hit = state.bricks.iter().position(|brick| {
        brick.alive && ball_rect_overlap(state.ball.pos, state.ball.radius, &brick.rect)
    });
    let Some(idx) = hit else {
        return;
    };

    let brick = &mut state.bricks[idx];
    brick.alive = false;
    let (center, color) = (brick.rect.center(), brick.color);
    log::debug!("brick destroyed at {:.0},{:.0}", center.x, center.y);

    state.ball.vel.y = -state.ball.vel.y;
    state.score += state.tuning.brick_score;
    state.spawn_particles(center, color, BRICK_BURST);
    signals.push(Signal::BrickDestroyed { pos: center, color });

    // Win fires the instant the last brick dies, whatever the ball or life
    // state is at that moment
    if state.alive_bricks() == 0 {
        state.phase = GamePhase::Win;
        let center = Vec2::new(state.board.width / 2.0, state.board.height / 2.0);
        state.spawn_particles(center, WIN_COLOR, WIN_BURST);
        signals.push(Signal::Win { score: state.score });
        log::info!("board cleared with score {}", state.score);
    }
}

/// Generate the brick grid for the current board: a fixed rows x cols field
/// filling available width minus padding and gaps, row colors cycling
/// through the palette.
pub fn generate_bricks(state: &mut GameState) {
    let tuning = &state.tuning;
    let brick_width = tuning.brick_width(state.board.width);
    let start_x = tuning.field_padding;
    let start_y = tuning.field_top;

    state.bricks.clear();
    for col in 0..tuning.brick_cols {
        for row in 0..tuning.brick_rows {
            let x = start_x + col as f32 * (brick_width + tuning.brick_gap);
            let y = start_y + row as f32 * (tuning.brick_height + tuning.brick_gap);
            state.bricks.push(Brick {
                rect: Rect::new(x, y, brick_width, tuning.brick_height),
                color: BRICK_PALETTE[row % BRICK_PALETTE.len()],
                alive: true,
            });
        }
    }
}

/// Scripted demo paddle: auto-start, auto-launch, and track the ball.
fn drive_idle(state: &GameState, input: &mut TickInput) {
    match state.phase {
        GamePhase::Menu => input.start = true,
        GamePhase::Playing => {
            if !state.ball.launched {
                input.launch = true;
            }
            // Track the ball with an oscillating offset so the return spin
            // varies and the demo doesn't settle into a vertical loop
            let wobble = (state.time_ticks as f32 * 0.05).sin() * 40.0;
            input.pointer_x = Some(state.ball.pos.x + wobble);
        }
        _ => {}
    }
}
