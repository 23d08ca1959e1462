use crate::areas::engine::Engine;
use crate::artifacts::core::errors::{HgError, HgResult};
use crate::artifacts::status::StatusMap;
use std::path::PathBuf;

impl Engine {
    /// Record renames that already happened on disk (`hg rename -A`).
    ///
    /// `old_files[i]` was renamed to `new_files[i]`. Each pair is recorded by
    /// its own invocation, in the root of its old file. The returned map
    /// covers the new files.
    pub async fn rename_files(
        &self,
        old_files: &[PathBuf],
        new_files: &[PathBuf],
    ) -> HgResult<StatusMap> {
        if old_files.len() != new_files.len() {
            return Err(HgError::InvalidArguments(format!(
                "{} old names but {} new names",
                old_files.len(),
                new_files.len()
            )));
        }

        for (old_file, new_file) in old_files.iter().zip(new_files) {
            let root = self.root_of(old_file)?;
            let pair = [
                self.relative_path(&root, old_file)?,
                self.relative_path(&root, new_file)?,
            ];

            self.invoke(&root, &["rename", "-A"], &pair).await?;
        }

        self.query_status(new_files).await
    }
}
