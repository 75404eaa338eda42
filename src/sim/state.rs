//! Game state and core simulation types
//!
//! All session state lives in [`GameState`]: one owned object per play
//! session, passed explicitly to [`crate::sim::tick`]. Entities never hold a
//! back-reference to the driver; they receive the data they need per call.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, ball_rect_overlap};
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Attract screen, waiting for an explicit start action
    Menu,
    /// Active gameplay (including ball attached to paddle before launch)
    Playing,
    /// Round lost; terminal until an explicit restart
    GameOver,
    /// All bricks cleared; terminal until an explicit restart
    Win,
}

/// A discrete event emitted by the simulation for presentation layers.
///
/// The core never plays sounds or touches a canvas; it reports what happened
/// and a dispatcher maps each signal to its sound cue or visual effect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Signal {
    /// Ball reflected off the left, right or top wall
    WallBounce,
    /// Ball reflected off the paddle; `pos` is the contact point
    PaddleHit { pos: Vec2 },
    /// A brick died; `pos` is its center, `color` its row color
    BrickDestroyed { pos: Vec2, color: u32 },
    /// Ball crossed the bottom wall; `lives` is the count after decrement
    LifeLost { lives: u8 },
    /// Lives reached zero
    GameOver { score: u64 },
    /// Last brick destroyed
    Win { score: u64 },
}

/// The board the entities live on (pixels, top-left origin)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Board {
    pub width: f32,
    pub height: f32,
}

/// The player's paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge, fixed per board height
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Paddle {
    pub fn new(board: &Board, tuning: &Tuning) -> Self {
        Self {
            x: (board.width - tuning.paddle_width) / 2.0,
            y: board.height - tuning.paddle_offset,
            width: tuning.paddle_width,
            height: tuning.paddle_height,
        }
    }

    /// Center the paddle on a pointer sample, clamped so it stays fully
    /// within board width. Pure state update, idempotent for a fixed input.
    pub fn track(&mut self, pointer_x: f32, board_width: f32) {
        self.x = (pointer_x - self.width / 2.0).clamp(0.0, board_width - self.width);
    }

    /// Paddle rectangle for collision tests
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// X coordinate of the paddle center
    #[inline]
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// Outcome of one ball advance, consumed by the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BallOutcome {
    /// Ball is still in play
    Live,
    /// Ball crossed the bottom wall; the driver decides between a reset
    /// and game over. The ball is deliberately not reflected.
    BottomOut,
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Scalar speed; `vel.length() == speed` is re-established after every
    /// collision while launched
    pub speed: f32,
    pub radius: f32,
    /// While false the ball is slaved to the paddle top-center
    pub launched: bool,
}

impl Ball {
    /// Reposition the ball just above the paddle with a fresh serve
    /// velocity: base speed, launch angle uniform within a narrow cone
    /// around straight-up.
    pub fn reset(&mut self, paddle: &Paddle, tuning: &Tuning, rng: &mut Pcg32) {
        self.radius = tuning.ball_radius;
        self.speed = tuning.ball_speed_base;
        self.slave_to_paddle(paddle);
        let cone = tuning.launch_cone;
        let angle = -std::f32::consts::FRAC_PI_2 + rng.random_range(-cone..cone);
        self.vel = Vec2::new(angle.cos(), angle.sin()) * self.speed;
        self.launched = false;
    }

    /// One-way transition from paddle-slaved to free-moving; no-op when
    /// already launched.
    pub fn launch(&mut self) {
        if !self.launched {
            self.launched = true;
        }
    }

    /// Stick to the paddle's top-center while waiting for launch
    pub fn slave_to_paddle(&mut self, paddle: &Paddle) {
        self.pos = Vec2::new(paddle.center_x(), paddle.y - self.radius - 2.0);
    }

    /// Advance the ball one tick: integrate position, resolve wall and
    /// paddle collisions in that fixed order, and push signals for each
    /// bounce. Brick collisions are the field's job and run after this.
    ///
    /// Overlapping conditions in one tick (corner hits) resolve via these
    /// sequential checks and can double-reflect; accepted discrete-time
    /// behavior.
    pub fn advance(
        &mut self,
        board: &Board,
        paddle: &Paddle,
        tuning: &Tuning,
        signals: &mut Vec<Signal>,
    ) -> BallOutcome {
        if !self.launched {
            self.slave_to_paddle(paddle);
            return BallOutcome::Live;
        }

        self.pos += self.vel;

        // Side walls: reflect dx, clamp back in bounds
        if self.pos.x + self.radius > board.width {
            self.pos.x = board.width - self.radius;
            self.vel.x = -self.vel.x;
            signals.push(Signal::WallBounce);
        } else if self.pos.x - self.radius < 0.0 {
            self.pos.x = self.radius;
            self.vel.x = -self.vel.x;
            signals.push(Signal::WallBounce);
        }

        // Top wall reflects; bottom wall is a loss, not a bounce
        if self.pos.y - self.radius < 0.0 {
            self.pos.y = self.radius;
            self.vel.y = -self.vel.y;
            signals.push(Signal::WallBounce);
        } else if self.pos.y + self.radius > board.height {
            return BallOutcome::BottomOut;
        }

        // Paddle
        if ball_rect_overlap(self.pos, self.radius, &paddle.rect()) {
            self.vel.y = -self.vel.y;
            // Reposition just above the paddle surface to prevent tunneling
            self.pos.y = paddle.y - self.radius;

            // Horizontal "english" from the offset to paddle center
            let offset = self.pos.x - paddle.center_x();
            self.vel.x = offset * tuning.paddle_spin;

            // Speed up slightly, capped, then renormalize to the new speed
            self.speed = (self.speed * tuning.paddle_speedup).min(tuning.ball_speed_max);
            self.vel = self.vel.normalize_or(Vec2::NEG_Y) * self.speed;

            signals.push(Signal::PaddleHit { pos: self.pos });
        }

        BallOutcome::Live
    }
}

/// A destructible brick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    /// Row color (0xRRGGBB)
    pub color: u32,
    /// Transitions true -> false exactly once per round
    pub alive: bool,
}

/// A particle for visual effects
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub color: u32,
    pub size: f32,
    /// Doubles as render opacity; dead at <= 0
    pub life: f32,
    pub decay: f32,
}

impl Particle {
    /// Advance position by velocity and burn life by the decay rate
    pub fn update(&mut self) {
        self.pos += self.vel;
        self.life -= self.decay;
    }
}

/// Complete session state (deterministic, serializable)
///
/// Particles are render-only and skipped on serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    /// Seeded RNG; serve angles and particle bursts draw from it
    pub rng: Pcg32,
    pub board: Board,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub paddle: Paddle,
    pub ball: Ball,
    /// Generated grid, in insertion order (row-major within each column)
    pub bricks: Vec<Brick>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub tuning: Tuning,
}

impl GameState {
    /// Create a new session with default tuning
    pub fn new(seed: u64, width: f32, height: f32) -> Self {
        Self::with_tuning(seed, width, height, Tuning::default())
    }

    /// Create a new session with explicit tuning
    pub fn with_tuning(seed: u64, width: f32, height: f32, tuning: Tuning) -> Self {
        let board = Board { width, height };
        let mut rng = Pcg32::seed_from_u64(seed);
        let paddle = Paddle::new(&board, &tuning);
        let mut ball = Ball {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            speed: tuning.ball_speed_base,
            radius: tuning.ball_radius,
            launched: false,
        };
        ball.reset(&paddle, &tuning, &mut rng);

        let mut state = Self {
            seed,
            rng,
            board,
            phase: GamePhase::Menu,
            score: 0,
            lives: tuning.start_lives,
            time_ticks: 0,
            paddle,
            ball,
            bricks: Vec::new(),
            particles: Vec::new(),
            tuning,
        };
        super::generate_bricks(&mut state);
        state
    }

    /// Viewport resize: entity bounds are relative to the board, and the
    /// paddle's vertical offset is recomputed so it doesn't get stuck.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.board.width = width;
        self.board.height = height;
        self.paddle.y = height - self.tuning.paddle_offset;
        log::debug!("board resized to {width}x{height}");
    }

    /// Full re-initialization for a start or restart action: score, lives,
    /// ball, brick field and particle set all reset; the paddle keeps its
    /// last tracked position.
    pub fn start_round(&mut self) {
        self.score = 0;
        self.lives = self.tuning.start_lives;
        let (paddle, tuning) = (self.paddle.clone(), self.tuning.clone());
        self.ball.reset(&paddle, &tuning, &mut self.rng);
        super::generate_bricks(self);
        self.particles.clear();
        self.phase = GamePhase::Playing;
        log::info!("round started (seed {})", self.seed);
    }

    /// Number of bricks still alive
    pub fn alive_bricks(&self) -> usize {
        self.bricks.iter().filter(|b| b.alive).count()
    }

    /// Append `count` particles at `pos` with randomized velocity, size and
    /// decay rate. No count cap is enforced; bursts decay naturally.
    pub fn spawn_particles(&mut self, pos: Vec2, color: u32, count: usize) {
        for _ in 0..count {
            let vel = Vec2::new(
                self.rng.random_range(-3.0..3.0),
                self.rng.random_range(-3.0..3.0),
            );
            let size = self.rng.random_range(1.0..4.0);
            let decay = self.rng.random_range(0.02..0.04);
            self.particles.push(Particle {
                pos,
                vel,
                color,
                size,
                life: 1.0,
                decay,
            });
        }
    }

    /// Snapshot the per-frame render data for the presentation layer
    pub fn render_frame(&self) -> RenderFrame {
        RenderFrame {
            phase: self.phase,
            score: self.score,
            lives: self.lives,
            paddle: self.paddle.rect(),
            ball: BallView {
                pos: self.ball.pos,
                radius: self.ball.radius,
            },
            bricks: self
                .bricks
                .iter()
                .filter(|b| b.alive)
                .map(|b| BrickView {
                    rect: b.rect,
                    color: b.color,
                })
                .collect(),
            particles: self
                .particles
                .iter()
                .map(|p| ParticleView {
                    pos: p.pos,
                    size: p.size,
                    color: p.color,
                    opacity: p.life.clamp(0.0, 1.0),
                })
                .collect(),
        }
    }
}

/// Ball circle for rendering
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BallView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Alive brick rect with its color
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BrickView {
    pub rect: Rect,
    pub color: u32,
}

/// Particle point with opacity derived from remaining life
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ParticleView {
    pub pos: Vec2,
    pub size: f32,
    pub color: u32,
    pub opacity: f32,
}

/// Everything the presentation layer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderFrame {
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u8,
    pub paddle: Rect,
    pub ball: BallView,
    pub bricks: Vec<BrickView>,
    pub particles: Vec<ParticleView>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_state() -> GameState {
        GameState::new(42, 800.0, 600.0)
    }

    #[test]
    fn test_paddle_tracks_and_clamps() {
        let mut state = test_state();
        state.paddle.track(400.0, 800.0);
        assert_eq!(state.paddle.x, 350.0);

        state.paddle.track(-500.0, 800.0);
        assert_eq!(state.paddle.x, 0.0);

        state.paddle.track(5000.0, 800.0);
        assert_eq!(state.paddle.x, 800.0 - state.paddle.width);
    }

    #[test]
    fn test_paddle_track_idempotent() {
        let mut state = test_state();
        state.paddle.track(123.0, 800.0);
        let first = state.paddle.x;
        state.paddle.track(123.0, 800.0);
        assert_eq!(state.paddle.x, first);
    }

    #[test]
    fn test_ball_reset_invariants() {
        let mut state = test_state();
        let paddle = state.paddle.clone();
        let tuning = state.tuning.clone();
        state.ball.reset(&paddle, &tuning, &mut state.rng);
        let ball = &state.ball;

        assert!(!ball.launched);
        assert_eq!(ball.speed, state.tuning.ball_speed_base);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-3);
        // Launch direction within the upward cone
        assert!(ball.vel.y < 0.0);
        let angle = ball.vel.y.atan2(ball.vel.x);
        let off_vertical = (angle + std::f32::consts::FRAC_PI_2).abs();
        assert!(off_vertical <= state.tuning.launch_cone + 1e-4);
        // Slaved just above the paddle top-center
        assert_eq!(ball.pos.x, state.paddle.center_x());
        assert!(ball.pos.y < state.paddle.y);
    }

    #[test]
    fn test_ball_launch_one_way() {
        let mut state = test_state();
        assert!(!state.ball.launched);
        state.ball.launch();
        assert!(state.ball.launched);
        state.ball.launch();
        assert!(state.ball.launched);
    }

    #[test]
    fn test_unlaunched_ball_slaves_to_paddle() {
        let mut state = test_state();
        state.paddle.track(200.0, 800.0);
        let mut signals = Vec::new();
        let mut ball = state.ball.clone();
        let outcome = ball.advance(&state.board, &state.paddle, &state.tuning, &mut signals);
        assert_eq!(outcome, BallOutcome::Live);
        assert!(signals.is_empty());
        assert_eq!(ball.pos.x, state.paddle.center_x());
    }

    #[test]
    fn test_wall_bounce_clamps_and_flips() {
        // Board 800x600, ball heading at the right wall at speed 6
        let state = test_state();
        let mut ball = Ball {
            pos: Vec2::new(796.0, 300.0),
            vel: Vec2::new(6.0, 0.0),
            speed: 6.0,
            radius: 8.0,
            launched: true,
        };
        let mut signals = Vec::new();
        let outcome = ball.advance(&state.board, &state.paddle, &state.tuning, &mut signals);

        assert_eq!(outcome, BallOutcome::Live);
        assert_eq!(ball.pos.x, 800.0 - ball.radius);
        assert_eq!(ball.vel.x, -6.0);
        assert_eq!(signals, vec![Signal::WallBounce]);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-3);
    }

    #[test]
    fn test_bottom_contact_is_loss_not_bounce() {
        let state = test_state();
        let mut ball = Ball {
            pos: Vec2::new(400.0, 598.0),
            vel: Vec2::new(0.0, 6.0),
            speed: 6.0,
            radius: 8.0,
            launched: true,
        };
        let mut signals = Vec::new();
        let outcome = ball.advance(&state.board, &state.paddle, &state.tuning, &mut signals);

        assert_eq!(outcome, BallOutcome::BottomOut);
        // Not reflected; the driver resets it
        assert_eq!(ball.vel.y, 6.0);
        assert!(signals.is_empty());
    }

    #[test]
    fn test_paddle_hit_speeds_up_and_renormalizes() {
        let state = test_state();
        let paddle = &state.paddle;
        let mut ball = Ball {
            pos: Vec2::new(paddle.center_x() + 20.0, paddle.y - 10.0),
            vel: Vec2::new(0.0, 6.0),
            speed: 6.0,
            radius: 8.0,
            launched: true,
        };
        let mut signals = Vec::new();
        ball.advance(&state.board, paddle, &state.tuning, &mut signals);

        assert!(matches!(signals.as_slice(), [Signal::PaddleHit { .. }]));
        // Speed increased by the paddle factor and velocity renormalized
        assert!((ball.speed - 6.0 * state.tuning.paddle_speedup).abs() < 1e-3);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-3);
        // Moving up, repositioned above the paddle surface
        assert!(ball.vel.y < 0.0);
        assert_eq!(ball.pos.y, paddle.y - ball.radius);
        // Spin pushes away from center in the offset direction
        assert!(ball.vel.x > 0.0);
    }

    #[test]
    fn test_paddle_hit_speed_capped() {
        let state = test_state();
        let paddle = &state.paddle;
        let mut ball = Ball {
            pos: Vec2::new(paddle.center_x(), paddle.y - 10.0),
            vel: Vec2::new(0.0, state.tuning.ball_speed_max),
            speed: state.tuning.ball_speed_max,
            radius: 8.0,
            launched: true,
        };
        let mut signals = Vec::new();
        ball.advance(&state.board, paddle, &state.tuning, &mut signals);

        assert_eq!(ball.speed, state.tuning.ball_speed_max);
        assert!((ball.vel.length() - ball.speed).abs() < 1e-3);
    }

    #[test]
    fn test_spawn_particles_randomized_and_bounded() {
        let mut state = test_state();
        state.spawn_particles(Vec2::new(100.0, 100.0), 0xffffff, 12);
        assert_eq!(state.particles.len(), 12);
        for p in &state.particles {
            assert_eq!(p.life, 1.0);
            assert!(p.decay >= 0.02 && p.decay < 0.04);
            assert!(p.size >= 1.0 && p.size < 4.0);
            assert!(p.vel.x.abs() < 3.0 && p.vel.y.abs() < 3.0);
        }
    }

    #[test]
    fn test_resize_recomputes_paddle_offset() {
        let mut state = test_state();
        state.resize(1024.0, 768.0);
        assert_eq!(state.board.width, 1024.0);
        assert_eq!(state.paddle.y, 768.0 - state.tuning.paddle_offset);
    }

    #[test]
    fn test_render_frame_reports_alive_bricks_only() {
        let mut state = test_state();
        let total = state.bricks.len();
        state.bricks[0].alive = false;
        state.bricks[5].alive = false;
        let frame = state.render_frame();
        assert_eq!(frame.bricks.len(), total - 2);
        assert_eq!(frame.score, 0);
        assert_eq!(frame.lives, state.tuning.start_lives);
    }

    #[test]
    fn test_state_serde_round_trip() {
        let state = test_state();
        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.seed, state.seed);
        assert_eq!(restored.bricks.len(), state.bricks.len());
        assert_eq!(restored.ball.pos, state.ball.pos);
        // Particles are render-only and not persisted
        assert!(restored.particles.is_empty());
    }

    proptest! {
        /// The paddle never leaves the board, whatever the pointer does.
        #[test]
        fn prop_paddle_stays_in_bounds(pointer_x in -1.0e4f32..1.0e4) {
            let mut state = GameState::new(1, 800.0, 600.0);
            state.paddle.track(pointer_x, state.board.width);
            prop_assert!(state.paddle.x >= 0.0);
            prop_assert!(state.paddle.x + state.paddle.width <= state.board.width);
        }

        /// |velocity| == speed holds after any serve.
        #[test]
        fn prop_reset_normalizes_velocity(seed in 0u64..10_000) {
            let state = GameState::new(seed, 800.0, 600.0);
            let ball = &state.ball;
            prop_assert!((ball.vel.length() - ball.speed).abs() < 1e-3);
        }
    }
}
