use crate::areas::engine::Engine;
use crate::artifacts::core::errors::{HgError, HgResult};
use crate::artifacts::status::StatusMap;
use std::path::{Path, PathBuf};

impl Engine {
    /// Status of the given files.
    ///
    /// All files are assumed to live in the repository of the first one. The
    /// list is split into batches and each batch is parsed on its own, so a
    /// rename is only recognized when both halves of the pair come out of the
    /// same invocation. Files the tool does not report get no entry.
    #[tracing::instrument(level = "debug", skip_all, fields(files = files.len()))]
    pub async fn query_status(&self, files: &[PathBuf]) -> HgResult<StatusMap> {
        let mut statuses = StatusMap::new();

        let Some(first) = files.first() else {
            return Ok(statuses);
        };

        let root = self.root_of(first)?;
        let relative = self.relative_paths(&root, files)?;

        for batch in self.config().batch.batches(&relative) {
            let output = self.invoke(&root, &["status", "-A"], batch).await?;
            self.parser().merge_into(&output.lines, &root, &mut statuses);
        }

        Ok(statuses)
    }

    /// Status of everything below `root`, ignored files included, in a
    /// single unbatched invocation.
    #[tracing::instrument(level = "debug", skip(self))]
    pub async fn query_root_status(&self, root: &Path) -> HgResult<StatusMap> {
        let root = self.config().path_case.normalize(root);
        if root.as_os_str().is_empty() {
            return Err(HgError::PathResolution(root));
        }

        let output = self.invoke(&root, &["status", "-A"], &[]).await?;

        Ok(self.parser().parse(&output.lines, &root))
    }
}
