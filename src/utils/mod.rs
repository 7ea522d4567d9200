//! Utility modules: score persistence.

pub mod persistence;
