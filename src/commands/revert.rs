use crate::areas::engine::Engine;
use crate::artifacts::core::errors::HgResult;
use crate::artifacts::status::StatusMap;
use std::path::PathBuf;

impl Engine {
    /// Discard uncommitted changes of the files.
    pub async fn revert_files(&self, files: &[PathBuf]) -> HgResult<StatusMap> {
        self.mutate_and_requery("revert", files).await
    }
}
