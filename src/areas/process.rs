//! Subprocess invocation
//!
//! One OS process per call. Both pipes are read concurrently until they reach
//! end-of-file, so a child writing more than a pipe buffer's worth of output
//! never blocks on a full pipe, and every line is collected before the exit
//! status is reported.

use crate::artifacts::core::errors::{HgError, HgResult};
use derive_new::new;
use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;

/// Exit code Mercurial uses when it aborts the whole command
pub const ABORT_EXIT_CODE: i32 = 255;

#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Everything a finished child wrote, plus how it exited
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    pub lines: Vec<String>,
    pub stderr: Vec<String>,
    /// `None` when the child was terminated by a signal
    pub exit_code: Option<i32>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// True when nothing the child printed can be trusted: an abort or a
    /// signal. Exit code 1 (some files failed) is not an abort.
    pub fn aborted(&self) -> bool {
        matches!(self.exit_code, None | Some(ABORT_EXIT_CODE))
    }
}

#[derive(Debug, Clone, new)]
pub struct ProcessRunner {
    program: PathBuf,
}

impl ProcessRunner {
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run the program in `working_directory` and collect its output.
    ///
    /// A non-zero exit is not an error here: Mercurial exits with 1 when only
    /// some of the given files could be processed. Callers inspect
    /// [`ProcessOutput::exit_code`] or [`ProcessOutput::aborted`].
    pub async fn run<S: AsRef<OsStr>>(
        &self,
        working_directory: &Path,
        args: &[S],
    ) -> HgResult<ProcessOutput> {
        if !working_directory.is_dir() {
            return Err(self.launch_error(
                working_directory,
                io::Error::new(io::ErrorKind::NotFound, "working directory does not exist"),
            ));
        }

        if self.is_explicit_path() && !is_executable::is_executable(&self.program) {
            return Err(self.launch_error(
                working_directory,
                io::Error::new(io::ErrorKind::PermissionDenied, "not an executable file"),
            ));
        }

        tracing::debug!(
            command = %render_command_line(&self.program, args),
            directory = %working_directory.display(),
            "invoking"
        );

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .current_dir(working_directory)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        command.creation_flags(CREATE_NO_WINDOW);

        let mut child = command
            .spawn()
            .map_err(|source| self.launch_error(working_directory, source))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| io::Error::other("child stdout was not captured"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| io::Error::other("child stderr was not captured"))?;

        let (lines, stderr) = tokio::try_join!(read_lines(stdout), read_lines(stderr))?;
        let status = child.wait().await?;

        for line in &stderr {
            tracing::debug!(line = %line, "stderr");
        }

        let output = ProcessOutput {
            lines,
            stderr,
            exit_code: status.code(),
        };

        if !output.success() {
            tracing::warn!(
                program = %self.program.display(),
                exit_code = ?output.exit_code,
                "process exited unsuccessfully"
            );
        }

        Ok(output)
    }

    // a bare name such as `hg` is resolved through PATH by the OS
    fn is_explicit_path(&self) -> bool {
        self.program
            .parent()
            .is_some_and(|parent| !parent.as_os_str().is_empty())
    }

    fn launch_error(&self, directory: &Path, source: io::Error) -> HgError {
        HgError::ProcessLaunch {
            program: self.program.display().to_string(),
            directory: directory.to_path_buf(),
            source,
        }
    }
}

async fn read_lines<R: AsyncRead + Unpin>(reader: R) -> io::Result<Vec<String>> {
    let mut segments = BufReader::new(reader).split(b'\n');
    let mut lines = Vec::new();

    while let Some(mut segment) = segments.next_segment().await? {
        if segment.last() == Some(&b'\r') {
            segment.pop();
        }
        // file names are not guaranteed to be valid UTF-8
        lines.push(String::from_utf8_lossy(&segment).into_owned());
    }

    Ok(lines)
}

/// Command line as a shell would show it, arguments with blanks quoted
pub fn render_command_line<S: AsRef<OsStr>>(program: &Path, args: &[S]) -> String {
    let mut rendered = program.display().to_string();

    for arg in args {
        let arg = arg.as_ref().to_string_lossy();
        rendered.push(' ');
        if arg.is_empty() || arg.contains(char::is_whitespace) {
            rendered.push('"');
            rendered.push_str(&arg);
            rendered.push('"');
        } else {
            rendered.push_str(&arg);
        }
    }

    rendered
}
