use crate::areas::engine::Engine;
use crate::artifacts::core::errors::HgResult;
use crate::artifacts::status::StatusMap;
use std::path::PathBuf;

impl Engine {
    /// Propagate deleted files to the repository (`hg remove`).
    pub async fn remove_files(&self, files: &[PathBuf]) -> HgResult<StatusMap> {
        self.mutate_and_requery("remove", files).await
    }
}
