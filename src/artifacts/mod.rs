//! Status data structures and algorithms
//!
//! - `batch`: splitting long file lists over several invocations
//! - `core`: configuration, errors, path-case policy
//! - `status`: status codes, the rename-pairing scan and the output parser

pub mod batch;
pub mod core;
pub mod status;
