//! Integration test utilities for the blog API
//!
//! Spawns the full Axum application on an ephemeral port and drives it over
//! HTTP with `reqwest`.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
