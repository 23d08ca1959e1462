use crate::areas::engine::Engine;
use crate::artifacts::core::errors::{HgError, HgResult};
use std::path::{Path, PathBuf};

impl Engine {
    /// Ask the tool itself (`hg root`) for the root enclosing `directory`.
    ///
    /// Costs a process spawn, unlike [`crate::areas::root::RootResolver`].
    /// A directory that does not exist yet is replaced by its nearest
    /// existing ancestor first. Any unsuccessful exit means no root.
    pub async fn query_root(&self, directory: &Path) -> HgResult<PathBuf> {
        let existing = directory
            .ancestors()
            .find(|candidate| !candidate.as_os_str().is_empty() && candidate.is_dir())
            .ok_or_else(|| HgError::PathResolution(directory.to_path_buf()))?;

        let output = self.runner().run(existing, &["root"]).await?;

        match output.lines.first() {
            Some(line) if output.success() && !line.trim().is_empty() => {
                Ok(self.config().path_case.normalize(Path::new(line.trim())))
            }
            _ => Err(HgError::PathResolution(directory.to_path_buf())),
        }
    }
}
