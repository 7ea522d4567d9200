//! Decorative scenery: drifting clouds, the star field, a row of trees,
//! ground texture scroll, and the bird's wing animation.
//!
//! Purely cosmetic; the simulation never reads any of this.

use crate::core::constants::SCREEN_WIDTH;
use crate::core::tier::SpeedTier;
use rand::Rng;

const CLOUD_COUNT: usize = 6;
const STAR_COUNT: usize = 80;
const TREE_COUNT: usize = 15;
/// Trees wrap over a strip this much wider than the field so they can
/// slide in from past the right edge.
pub const TREE_WRAP_MARGIN: f64 = 50.0;
/// Ticks between wing frames.
const WING_FRAME_TICKS: u64 = 5;
const WING_FRAMES: u8 = 3;

#[derive(Debug, Clone)]
pub struct Cloud {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Pixels per tick at tier one.
    pub speed: f64,
}

impl Cloud {
    fn random<R: Rng>(rng: &mut R, x: f64) -> Self {
        Self {
            x,
            y: rng.gen_range(0.0..200.0),
            width: rng.gen_range(80.0..140.0),
            height: rng.gen_range(30.0..50.0),
            speed: rng.gen_range(1..=2) as f64,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    /// 0.5..1.0; brighter stars get a heavier glyph.
    pub brightness: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeKind {
    Pine,
    Round,
    Bushy,
}

/// A tree standing on the ground line. Trees keep their shape for the whole
/// run and scroll with the ground.
#[derive(Debug, Clone)]
pub struct Tree {
    /// Left edge before any scrolling.
    pub x: f64,
    pub height: f64,
    pub width: f64,
    pub kind: TreeKind,
}

impl Tree {
    fn random<R: Rng>(rng: &mut R, slot: usize) -> Self {
        let kind = match rng.gen_range(0..3) {
            0 => TreeKind::Pine,
            1 => TreeKind::Round,
            _ => TreeKind::Bushy,
        };
        Self {
            x: slot as f64 * SCREEN_WIDTH / 10.0 + rng.gen_range(0.0..30.0),
            height: rng.gen_range(40.0..120.0),
            width: rng.gen_range(20.0..35.0),
            kind,
        }
    }

    /// Left edge on screen after scrolling by `offset`, in
    /// `[-TREE_WRAP_MARGIN, SCREEN_WIDTH)`.
    pub fn screen_x(&self, offset: f64) -> f64 {
        (self.x - offset + TREE_WRAP_MARGIN).rem_euclid(SCREEN_WIDTH + TREE_WRAP_MARGIN)
            - TREE_WRAP_MARGIN
    }
}

#[derive(Debug, Clone)]
pub struct Backdrop {
    pub clouds: Vec<Cloud>,
    pub trees: Vec<Tree>,
    /// Empty by day.
    pub stars: Vec<Star>,
    /// Horizontal scroll of the ground texture, in world pixels.
    pub ground_offset: f64,
    /// Tree scroll; moves with the ground but wraps on the wider tree strip.
    pub tree_offset: f64,
    pub night: bool,
    wing_ticks: u64,
}

impl Backdrop {
    pub fn new<R: Rng>(rng: &mut R, night: bool) -> Self {
        let clouds = (0..CLOUD_COUNT)
            .map(|_| {
                let x = rng.gen_range(0.0..SCREEN_WIDTH * 2.0);
                Cloud::random(rng, x)
            })
            .collect();
        let trees = (0..TREE_COUNT).map(|slot| Tree::random(rng, slot)).collect();

        let mut backdrop = Self {
            clouds,
            trees,
            stars: Vec::new(),
            ground_offset: 0.0,
            tree_offset: 0.0,
            night: false,
            wing_ticks: 0,
        };
        backdrop.set_night(rng, night);
        backdrop
    }

    /// Switch theme. A fresh sky of stars is scattered on every switch to night.
    pub fn set_night<R: Rng>(&mut self, rng: &mut R, night: bool) {
        if night == self.night {
            return;
        }
        self.night = night;
        self.stars.clear();
        if night {
            self.stars = (0..STAR_COUNT)
                .map(|_| Star {
                    x: rng.gen_range(0.0..SCREEN_WIDTH),
                    y: rng.gen_range(0.0..300.0),
                    brightness: rng.gen_range(0.5..1.0),
                })
                .collect();
        }
    }

    /// Scroll scenery by `ticks` simulation steps at the given tier's pace.
    pub fn advance<R: Rng>(&mut self, rng: &mut R, ticks: u64, tier: SpeedTier) {
        let parallax = tier.parallax();
        for _ in 0..ticks {
            self.wing_ticks += 1;
            self.ground_offset = (self.ground_offset + parallax).rem_euclid(SCREEN_WIDTH);
            self.tree_offset =
                (self.tree_offset + parallax).rem_euclid(SCREEN_WIDTH + TREE_WRAP_MARGIN);

            for cloud in &mut self.clouds {
                cloud.x -= cloud.speed * parallax;
                if cloud.x + cloud.width < 0.0 {
                    *cloud = Cloud::random(rng, SCREEN_WIDTH);
                }
            }
        }
    }

    /// Current wing pose: 0 = level, 1 = up, 2 = down.
    pub fn wing_frame(&self) -> u8 {
        ((self.wing_ticks / WING_FRAME_TICKS) % WING_FRAMES as u64) as u8
    }
}
