use std::path::PathBuf;

/// Errors raised by the status engine.
///
/// None of these ever reach a caller of the async front-ends: the dispatcher
/// logs them and skips the callback, which callers read as "no status
/// information available".
#[derive(Debug, thiserror::Error)]
pub enum HgError {
    /// The executable could not be started in the given directory.
    #[error("failed to launch {program} in {directory:?}: {source}")]
    ProcessLaunch {
        program: String,
        directory: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The tool started but gave up on the whole invocation, or was killed.
    #[error("{program} aborted (exit code {exit_code:?}): {stderr}")]
    ToolAborted {
        program: String,
        exit_code: Option<i32>,
        stderr: String,
    },

    /// No ancestor of the path contains the repository marker.
    #[error("no repository root found for {0:?}")]
    PathResolution(PathBuf),

    /// A file handed to a query does not live under the resolved root.
    #[error("{path:?} is outside of repository root {root:?}")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    /// The caller passed arguments that cannot form a valid invocation.
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// Reading from the child's pipes failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type HgResult<T> = Result<T, HgError>;
