//! Infrastructure implementations.
//!
//! Contains port trait implementations and startup plumbing.

pub mod clock;
pub mod config;
pub mod game_data;
pub mod memory;
pub mod ports;
