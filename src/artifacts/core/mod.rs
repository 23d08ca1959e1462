//! Core utilities and shared types
//!
//! This module contains the pieces shared by every engine component:
//!
//! - `config`: the explicitly passed engine configuration
//! - `errors`: the error taxonomy and result alias
//! - [`PathCase`]: the single path-case policy used for roots and map keys

pub mod config;
pub mod errors;

use std::path::{Path, PathBuf};

/// Case policy applied to every path the engine compares or returns
///
/// The same policy is applied when locating a repository root and when
/// building status map keys, so a key produced by a query always shares the
/// exact prefix of the root it was resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCase {
    /// Keep paths exactly as given (case-sensitive file systems)
    Preserve,
    /// Lower-case paths (case-insensitive file systems)
    Fold,
}

impl PathCase {
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            PathCase::Fold
        } else {
            PathCase::Preserve
        }
    }

    /// Apply the policy and drop any trailing separator.
    pub fn normalize(&self, path: &Path) -> PathBuf {
        let path = path.components().collect::<PathBuf>();

        match self {
            PathCase::Preserve => path,
            // non UTF-8 paths cannot be folded reliably and are kept as-is
            PathCase::Fold => path
                .to_str()
                .map(|s| PathBuf::from(s.to_lowercase()))
                .unwrap_or(path),
        }
    }
}

impl Default for PathCase {
    fn default() -> Self {
        Self::platform_default()
    }
}
