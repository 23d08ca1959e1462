//! Engine operations
//!
//! Queries:
//!
//! - `status`: file list and whole-root status queries
//! - `root`: tool-backed root lookup
//!
//! Mutations, each followed by a status query of the affected files:
//!
//! - `add`, `remove`, `rename`, `revert`

pub mod add;
pub mod remove;
pub mod rename;
pub mod revert;
pub mod root;
pub mod status;

use crate::areas::engine::{Engine, is_directory_entry};
use crate::artifacts::core::errors::HgResult;
use crate::artifacts::status::StatusMap;
use std::path::PathBuf;

impl Engine {
    /// Run `hg <subcommand>` over the files, then query their status.
    ///
    /// Directory entries are left out of the mutation (the tool would recurse
    /// into them) but are still part of the status query. A failing batch
    /// aborts the operation; batches already issued are not rolled back.
    async fn mutate_and_requery(&self, subcommand: &str, files: &[PathBuf]) -> HgResult<StatusMap> {
        let Some(first) = files.first() else {
            return Ok(StatusMap::new());
        };

        let root = self.root_of(first)?;
        let targets = files
            .iter()
            .filter(|file| !is_directory_entry(file))
            .cloned()
            .collect::<Vec<_>>();
        let relative = self.relative_paths(&root, &targets)?;

        for batch in self.config().batch.batches(&relative) {
            self.invoke(&root, &[subcommand], batch).await?;
        }

        self.query_status(files).await
    }
}
