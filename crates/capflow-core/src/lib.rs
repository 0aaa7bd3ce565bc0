//! Capflow Core Library
//!
//! Converts time-stamped subtitle text into short, rapidly-changing on-screen
//! caption states timed to spoken words, then lays the states out on a small
//! number of vertical display levels so that simultaneously-visible captions
//! never collide.
//!
//! # Pipeline
//!
//! ```text
//! subtitles (ASS/SRT/VTT) → segments → word timing → caption states
//!                                    → level assignment → renderer adapters
//! ```
//!
//! The engine itself is a pure function of its inputs: no I/O, no shared
//! state, no async. File reading and external tool invocation belong to the
//! caller (see the `capflow-cli` crate).

pub mod config;
pub mod engine;
pub mod render;
pub mod subtitles;
pub mod text;

// Re-export common types
mod types;
pub use types::*;

mod error;
pub use error::*;
