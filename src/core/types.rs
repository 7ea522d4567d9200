//! Simulation data structures: the bird, pipe pairs, hitboxes and tick events.

use super::constants::{BIRD_HEIGHT, BIRD_WIDTH, BIRD_X, HITBOX_INSET, PIPE_WIDTH, SCREEN_HEIGHT};
use super::tier::SpeedTier;

/// How far the top arm's rectangle reaches above the visible field.
const ARM_OVERHANG: f64 = 100.0;
/// Height of the bottom arm's rectangle; anything past the field edge.
const BOTTOM_ARM_DEPTH: f64 = 1000.0;

/// The player's bird.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    /// Vertical centre in world pixels. 0 = top of the field.
    pub y: f64,
    /// Vertical velocity in pixels/tick (positive = downward).
    pub velocity: f64,
}

impl Bird {
    /// A bird hovering at the vertical centre of the field.
    pub fn centered() -> Self {
        Self {
            y: SCREEN_HEIGHT / 2.0,
            velocity: 0.0,
        }
    }

    /// Collision rectangle: the nominal box shrunk on every side.
    pub fn hitbox(&self) -> Hitbox {
        Hitbox {
            left: BIRD_X - BIRD_WIDTH / 2.0 + HITBOX_INSET,
            top: self.y - BIRD_HEIGHT / 2.0 + HITBOX_INSET,
            width: BIRD_WIDTH - 2.0 * HITBOX_INSET,
            height: BIRD_HEIGHT - 2.0 * HITBOX_INSET,
        }
    }
}

/// A single pipe obstacle (top + bottom arm with a gap between them).
#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    /// Left edge in world pixels (float for smooth scrolling).
    pub x: f64,
    /// Height of the top arm, i.e. the y where the gap starts.
    pub gap_top: u32,
    /// Whether the bird has passed this pipe (for scoring).
    pub passed: bool,
}

impl Pipe {
    pub fn new(x: f64, gap_top: u32) -> Self {
        Self {
            x,
            gap_top,
            passed: false,
        }
    }

    /// Right edge of the pipe.
    pub fn trailing_edge(&self) -> f64 {
        self.x + PIPE_WIDTH
    }

    pub fn top_arm(&self) -> Hitbox {
        Hitbox {
            left: self.x,
            top: -ARM_OVERHANG,
            width: PIPE_WIDTH,
            height: self.gap_top as f64 + ARM_OVERHANG,
        }
    }

    pub fn bottom_arm(&self, gap_size: u32) -> Hitbox {
        Hitbox {
            left: self.x,
            top: (self.gap_top + gap_size) as f64,
            width: PIPE_WIDTH,
            height: BOTTOM_ARM_DEPTH,
        }
    }

    pub fn collides_with(&self, hitbox: &Hitbox, gap_size: u32) -> bool {
        hitbox.intersects(&self.top_arm()) || hitbox.intersects(&self.bottom_arm(gap_size))
    }
}

/// Axis-aligned rectangle in world pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hitbox {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Hitbox {
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Strict overlap test; rectangles that merely touch do not intersect.
    pub fn intersects(&self, other: &Hitbox) -> bool {
        self.left < other.right()
            && other.left < self.right()
            && self.top < other.bottom()
            && other.top < self.bottom()
    }
}

/// What the bird ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionCause {
    Pipe,
    Ground,
    Ceiling,
}

/// A single event produced by an engine tick.
///
/// The presentation layer maps these to sound cues and screen changes; the
/// engine never touches UI types directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// A pipe's trailing edge crossed the bird lane. Carries the new score.
    ObstaclePassed { score: u32 },
    /// The running score overtook the best score.
    NewBestScore { best: u32 },
    /// The score hit a tier threshold.
    SpeedTierChanged { tier: SpeedTier },
    /// The bird hit something. Ends the session.
    Collision { cause: CollisionCause },
}

impl TickEvent {
    pub fn is_collision(&self) -> bool {
        matches!(self, TickEvent::Collision { .. })
    }
}
