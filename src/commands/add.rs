use crate::areas::engine::Engine;
use crate::artifacts::core::errors::HgResult;
use crate::artifacts::status::StatusMap;
use crate::artifacts::status::status_code::StatusCode;
use std::path::PathBuf;

impl Engine {
    /// Put files under version control and report their new status.
    pub async fn add_files(&self, files: &[PathBuf]) -> HgResult<StatusMap> {
        self.mutate_and_requery("add", files).await
    }

    /// Add only the files the repository does not ignore.
    ///
    /// The candidates are the files a status query reports, minus the ignored
    /// ones; when nothing remains no `add` is issued.
    pub async fn add_files_not_ignored(&self, files: &[PathBuf]) -> HgResult<StatusMap> {
        let candidates = self
            .query_status(files)
            .await?
            .into_iter()
            .filter(|(_, status)| *status != StatusCode::Ignored)
            .map(|(file, _)| file)
            .collect::<Vec<_>>();

        if candidates.is_empty() {
            tracing::debug!("every file is ignored, nothing to add");
            return Ok(StatusMap::new());
        }

        self.add_files(&candidates).await
    }
}
