use super::AsyncDispatcher;
use crate::areas::engine::Engine;
use crate::artifacts::core::errors::HgError;
use crate::artifacts::status::StatusMap;
use derive_new::new;
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// What a status callback receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    /// Set only by [`AsyncEngine::query_root_status`]
    pub root: Option<PathBuf>,
    pub statuses: StatusMap,
}

impl StatusReport {
    fn files(statuses: StatusMap) -> Self {
        StatusReport {
            root: None,
            statuses,
        }
    }
}

/// Fire-and-forget front-end over [`Engine`]
///
/// Every method returns immediately; on success the callback runs on the
/// dispatcher's context with a fresh [`StatusReport`].
#[derive(Debug, Clone, new)]
pub struct AsyncEngine {
    engine: Engine,
    dispatcher: AsyncDispatcher,
}

impl AsyncEngine {
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn query_status(
        &self,
        files: Vec<PathBuf>,
        callback: impl FnOnce(StatusReport) + Send + 'static,
    ) -> JoinHandle<bool> {
        let engine = self.engine.clone();
        self.dispatcher.run_async(
            async move { engine.query_status(&files).await.map(StatusReport::files) },
            callback,
        )
    }

    pub fn query_root_status(
        &self,
        root: PathBuf,
        callback: impl FnOnce(StatusReport) + Send + 'static,
    ) -> JoinHandle<bool> {
        let engine = self.engine.clone();
        self.dispatcher.run_async(
            async move {
                let statuses = engine.query_root_status(&root).await?;
                Ok::<_, HgError>(StatusReport {
                    root: Some(engine.config().path_case.normalize(&root)),
                    statuses,
                })
            },
            callback,
        )
    }

    pub fn add_files(
        &self,
        files: Vec<PathBuf>,
        callback: impl FnOnce(StatusReport) + Send + 'static,
    ) -> JoinHandle<bool> {
        let engine = self.engine.clone();
        self.dispatcher.run_async(
            async move { engine.add_files(&files).await.map(StatusReport::files) },
            callback,
        )
    }

    pub fn add_files_not_ignored(
        &self,
        files: Vec<PathBuf>,
        callback: impl FnOnce(StatusReport) + Send + 'static,
    ) -> JoinHandle<bool> {
        let engine = self.engine.clone();
        self.dispatcher.run_async(
            async move {
                engine
                    .add_files_not_ignored(&files)
                    .await
                    .map(StatusReport::files)
            },
            callback,
        )
    }

    pub fn remove_files(
        &self,
        files: Vec<PathBuf>,
        callback: impl FnOnce(StatusReport) + Send + 'static,
    ) -> JoinHandle<bool> {
        let engine = self.engine.clone();
        self.dispatcher.run_async(
            async move { engine.remove_files(&files).await.map(StatusReport::files) },
            callback,
        )
    }

    pub fn rename_files(
        &self,
        old_files: Vec<PathBuf>,
        new_files: Vec<PathBuf>,
        callback: impl FnOnce(StatusReport) + Send + 'static,
    ) -> JoinHandle<bool> {
        let engine = self.engine.clone();
        self.dispatcher.run_async(
            async move {
                engine
                    .rename_files(&old_files, &new_files)
                    .await
                    .map(StatusReport::files)
            },
            callback,
        )
    }

    pub fn revert_files(
        &self,
        files: Vec<PathBuf>,
        callback: impl FnOnce(StatusReport) + Send + 'static,
    ) -> JoinHandle<bool> {
        let engine = self.engine.clone();
        self.dispatcher.run_async(
            async move { engine.revert_files(&files).await.map(StatusReport::files) },
            callback,
        )
    }
}
