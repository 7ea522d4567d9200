//! Speed tiers and the hard-mode multipliers.
//!
//! Every difficulty lookup lives here so the engine and the renderer read
//! the same tables.

use super::constants::{
    HARD_GAP_REDUCTION, HARD_GRAVITY_MULTIPLIER, HARD_SPEED_MULTIPLIER, MIN_ARM_HARD,
    MIN_ARM_NORMAL, PIPE_GAP,
};

/// Difficulty level derived from the current score.
///
/// Domain: every `u32` score maps to exactly one tier. Tiers only go up as
/// the score grows, so within a session the tier never decreases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpeedTier {
    One,
    Two,
    Three,
}

impl SpeedTier {
    pub const ALL: [SpeedTier; 3] = [SpeedTier::One, SpeedTier::Two, SpeedTier::Three];

    /// Scores at which the tier steps up.
    pub const THRESHOLDS: [u32; 2] = [10, 25];

    /// Tier for a given score: ≥25 → Three, ≥10 → Two, otherwise One.
    pub fn for_score(score: u32) -> Self {
        if score >= Self::THRESHOLDS[1] {
            Self::Three
        } else if score >= Self::THRESHOLDS[0] {
            Self::Two
        } else {
            Self::One
        }
    }

    /// True when reaching `score` moves the player into a new tier.
    pub fn is_threshold(score: u32) -> bool {
        Self::THRESHOLDS.contains(&score)
    }

    /// 1-based level number, as shown to the player.
    pub fn level(&self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Horizontal pipe speed in pixels per tick, before hard-mode scaling.
    pub fn pipe_speed(&self) -> f64 {
        match self {
            Self::One => 3.5,
            Self::Two => 4.5,
            Self::Three => 6.0,
        }
    }

    /// Multiplier on the base jump impulse. Higher tiers jump weaker.
    pub fn jump_modifier(&self) -> f64 {
        match self {
            Self::One => 1.0,
            Self::Two => 0.95,
            Self::Three => 0.9,
        }
    }

    /// Background parallax multiplier (clouds, ground texture).
    pub fn parallax(&self) -> f64 {
        match self {
            Self::One => 1.0,
            Self::Two => 1.2,
            Self::Three => 1.5,
        }
    }
}

/// Per-session physics and layout parameters selected by the hard-mode toggle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handicap {
    pub hard_mode: bool,
}

impl Handicap {
    pub fn new(hard_mode: bool) -> Self {
        Self { hard_mode }
    }

    pub fn gravity_multiplier(&self) -> f64 {
        if self.hard_mode {
            HARD_GRAVITY_MULTIPLIER
        } else {
            1.0
        }
    }

    pub fn speed_multiplier(&self) -> f64 {
        if self.hard_mode {
            HARD_SPEED_MULTIPLIER
        } else {
            1.0
        }
    }

    /// Vertical opening between the two arms of a pipe.
    pub fn gap_size(&self) -> u32 {
        if self.hard_mode {
            PIPE_GAP - HARD_GAP_REDUCTION
        } else {
            PIPE_GAP
        }
    }

    /// Shortest top arm a freshly spawned pipe may have.
    pub fn min_arm(&self) -> u32 {
        if self.hard_mode {
            MIN_ARM_HARD
        } else {
            MIN_ARM_NORMAL
        }
    }
}
