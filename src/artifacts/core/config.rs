use crate::artifacts::batch::BatchPolicy;
use crate::artifacts::core::PathCase;
use std::path::{Path, PathBuf};

/// Executable looked up on `PATH` when none is configured
pub const DEFAULT_EXECUTABLE: &str = "hg";

/// Hidden metadata directory of a Mercurial repository
pub const MARKER_DIR: &str = ".hg";

/// File inside [`MARKER_DIR`] whose presence identifies a repository root
///
/// Every repository created by a supported Mercurial release writes it.
pub const MARKER_FILE: &str = "requires";

/// Engine configuration
///
/// Passed explicitly to [`crate::areas::engine::Engine`]; there is no global
/// options holder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Program spawned for every invocation
    pub executable: PathBuf,
    /// Marker path, relative to a candidate root
    pub marker: PathBuf,
    pub batch: BatchPolicy,
    pub path_case: PathCase,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            executable: PathBuf::from(DEFAULT_EXECUTABLE),
            marker: Path::new(MARKER_DIR).join(MARKER_FILE),
            batch: BatchPolicy::default(),
            path_case: PathCase::platform_default(),
        }
    }
}

impl Config {
    pub fn with_executable(mut self, executable: impl Into<PathBuf>) -> Self {
        self.executable = executable.into();
        self
    }

    pub fn with_marker(mut self, marker: impl Into<PathBuf>) -> Self {
        self.marker = marker.into();
        self
    }

    pub fn with_batch(mut self, batch: BatchPolicy) -> Self {
        self.batch = batch;
        self
    }

    pub fn with_path_case(mut self, path_case: PathCase) -> Self {
        self.path_case = path_case;
        self
    }
}
