use crate::artifacts::core::PathCase;
use derive_new::new;
use std::path::{Path, PathBuf};

/// Finds the repository root enclosing a path without spawning the tool
///
/// Walks from the path towards the file system root and stops at the first
/// directory that contains the marker file. Relative paths are never
/// resolved against the working directory of the process and have no root.
/// Nothing is cached: every call walks again.
#[derive(Debug, Clone, new)]
pub struct RootResolver {
    marker: PathBuf,
    path_case: PathCase,
}

impl RootResolver {
    pub fn find_root(&self, path: &Path) -> Option<PathBuf> {
        let mut candidate = self.path_case.normalize(path);
        if !candidate.is_absolute() {
            return None;
        }

        loop {
            if candidate.join(&self.marker).is_file() {
                return Some(candidate);
            }

            if !candidate.pop() {
                return None;
            }
        }
    }
}
