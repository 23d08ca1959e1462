use crate::areas::process::{ProcessOutput, ProcessRunner};
use crate::areas::root::RootResolver;
use crate::artifacts::core::config::Config;
use crate::artifacts::core::errors::{HgError, HgResult};
use crate::artifacts::status::parser::StatusParser;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Status synchronization engine
///
/// Holds nothing but its configuration and the helpers derived from it, so a
/// clone can be moved into every background task. Each operation resolves
/// its root, spawns its own processes and builds its own result.
#[derive(Debug, Clone)]
pub struct Engine {
    config: Config,
    runner: ProcessRunner,
    resolver: RootResolver,
    parser: StatusParser,
}

impl Default for Engine {
    fn default() -> Self {
        Engine::new(Config::default())
    }
}

impl Engine {
    pub fn new(config: Config) -> Self {
        let runner = ProcessRunner::new(config.executable.clone());
        let resolver = RootResolver::new(config.marker.clone(), config.path_case);
        let parser = StatusParser::new(config.path_case);

        Engine {
            config,
            runner,
            resolver,
            parser,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn runner(&self) -> &ProcessRunner {
        &self.runner
    }

    pub fn resolver(&self) -> &RootResolver {
        &self.resolver
    }

    pub fn parser(&self) -> &StatusParser {
        &self.parser
    }

    /// Root of the repository holding `file`, found from its parent directory
    /// (or from the entry itself when it names a directory).
    pub(crate) fn root_of(&self, file: &Path) -> HgResult<PathBuf> {
        let normalized = self.config.path_case.normalize(file);
        let directory = if is_directory_entry(file) {
            Some(normalized.as_path())
        } else {
            normalized.parent()
        };

        directory
            .and_then(|directory| self.resolver.find_root(directory))
            .ok_or_else(|| HgError::PathResolution(file.to_path_buf()))
    }

    pub(crate) fn relative_path(&self, root: &Path, file: &Path) -> HgResult<PathBuf> {
        let normalized = self.config.path_case.normalize(file);
        let relative = normalized
            .strip_prefix(root)
            .map_err(|_| HgError::OutsideRoot {
                path: file.to_path_buf(),
                root: root.to_path_buf(),
            })?;

        if relative.as_os_str().is_empty() {
            Ok(PathBuf::from("."))
        } else {
            Ok(relative.to_path_buf())
        }
    }

    pub(crate) fn relative_paths(&self, root: &Path, files: &[PathBuf]) -> HgResult<Vec<PathBuf>> {
        files
            .iter()
            .map(|file| self.relative_path(root, file))
            .collect()
    }

    /// Run `hg <leading..> <paths..>` in the repository root.
    ///
    /// An aborted run is an error; its output would otherwise read as an
    /// empty but valid status.
    pub(crate) async fn invoke(
        &self,
        root: &Path,
        leading: &[&str],
        paths: &[PathBuf],
    ) -> HgResult<ProcessOutput> {
        let args = leading
            .iter()
            .map(OsString::from)
            .chain(paths.iter().map(|path| path.clone().into_os_string()))
            .collect::<Vec<_>>();

        let output = self.runner.run(root, &args).await?;

        if output.aborted() {
            return Err(HgError::ToolAborted {
                program: self.runner.program().display().to_string(),
                exit_code: output.exit_code,
                stderr: output.stderr.join("\n"),
            });
        }

        Ok(output)
    }
}

/// Entries such as `C:\repo\dir\` name a directory, not a file
pub(crate) fn is_directory_entry(path: &Path) -> bool {
    path.as_os_str()
        .to_string_lossy()
        .chars()
        .last()
        .is_some_and(std::path::is_separator)
}
