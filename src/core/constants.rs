//! World geometry and physics tuning.
//!
//! All positions are in world pixels on an 800×600 field; y grows downward.
//! The renderer scales these to whatever terminal area it is given.

// Field
pub const SCREEN_WIDTH: f64 = 800.0;
pub const SCREEN_HEIGHT: f64 = 600.0;
pub const GROUND_HEIGHT: f64 = 80.0;

// Bird
pub const BIRD_WIDTH: f64 = 44.0;
pub const BIRD_HEIGHT: f64 = 34.0;
/// Horizontal centre of the bird's lane. The bird never moves sideways.
pub const BIRD_X: f64 = SCREEN_WIDTH / 4.0;
/// Collision box shrinks the nominal bird box by this much on every side.
pub const HITBOX_INSET: f64 = 5.0;

// Pipes
pub const PIPE_COUNT: usize = 3;
pub const PIPE_WIDTH: f64 = 85.0;
pub const PIPE_GAP: u32 = 200;
pub const HARD_GAP_REDUCTION: u32 = 40;
pub const PIPE_SPACING: f64 = 320.0;
/// Distance past the right edge where the first pipe of a session spawns.
pub const FIRST_PIPE_OFFSET: f64 = 300.0;
pub const MIN_ARM_NORMAL: u32 = 120;
pub const MIN_ARM_HARD: u32 = 80;

// Physics (per 16ms tick)
pub const GRAVITY: f64 = 0.55;
pub const BASE_JUMP_IMPULSE: f64 = -11.0;
pub const HARD_GRAVITY_MULTIPLIER: f64 = 1.2;
pub const HARD_SPEED_MULTIPLIER: f64 = 1.3;

// Timing
pub const TICK_INTERVAL_MS: u64 = 16;
/// Longest stretch of wall time the clock will turn into steps at once.
pub const MAX_FRAME_DELTA_MS: u64 = 100;

/// Lowest y the bird's centre may reach before it counts as hitting the ground.
pub const GROUND_LIMIT: f64 = SCREEN_HEIGHT - GROUND_HEIGHT - BIRD_HEIGHT / 2.0;
