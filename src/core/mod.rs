//! Game core: simulation engine, fixed clock, and session state machine.
//!
//! Nothing in here touches the terminal; the binary drives it through
//! commands and reads it back for rendering.

pub mod clock;
pub mod constants;
pub mod engine;
pub mod session;
pub mod tier;
pub mod types;
