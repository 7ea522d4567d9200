//! Skyward - terminal side-scrolling flyer.
//!
//! The simulation, session state machine and score persistence are exposed
//! for testing and reuse; the binary adds the terminal front end.

pub mod audio;
pub mod build_info;
pub mod core;
pub mod input;
pub mod logging;
pub mod ui;
pub mod utils;

pub use crate::core::engine::Engine;
pub use crate::core::session::{Command, Cue, Session, SessionState, Toggles};
pub use crate::core::tier::{Handicap, SpeedTier};
pub use crate::core::types::{Bird, CollisionCause, Hitbox, Pipe, TickEvent};
pub use crate::utils::persistence::{JsonScoreStore, MemoryScoreStore, ScoreStore, StoreError};
