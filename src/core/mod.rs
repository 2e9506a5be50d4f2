//! # Core Module
//!
//! Small building blocks used throughout the engine that know nothing about voxels.
//!
//! ## Key Components
//! - `WorldError` / `Result`: the crate-wide error type
//! - `TimedEffects`: a tick-driven list of `(remaining, effect)` pairs
//!
//! ## Usage
//! ```rust
//! use blockworld::TimedEffects;
//! use web_time::Duration;
//!
//! let mut effects = TimedEffects::new();
//! effects.schedule(Duration::from_millis(500), "explode");
//!
//! assert!(effects.tick(Duration::from_millis(300)).is_empty());
//! assert_eq!(effects.tick(Duration::from_millis(300)), vec!["explode"]);
//! ```

pub mod error;
pub mod timed_effects;

pub use error::{Result, WorldError};
pub use timed_effects::TimedEffects;
