//! Engine building blocks
//!
//! - `engine`: the stateless service object every operation hangs off
//! - `process`: spawning the tool and collecting its output
//! - `root`: marker-based repository root lookup

pub mod engine;
pub mod process;
pub mod root;
