use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use hgsync::areas::engine::Engine;
use hgsync::artifacts::batch::BatchPolicy;
use hgsync::artifacts::core::PathCase;
use hgsync::artifacts::core::config::Config;
use rstest::fixture;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

const FAKE_HG: &str = include_str!("fake_hg.sh");
const TEXT_FILE_BUSY: i32 = 26;

/// A repository directory plus a scripted `hg` living outside of it
pub struct FakeHg {
    pub tool_dir: TempDir,
    pub repository: TempDir,
}

impl FakeHg {
    pub fn executable(&self) -> PathBuf {
        self.tool_dir.path().join("hg")
    }

    pub fn config(&self) -> Config {
        Config::default()
            .with_executable(self.executable())
            .with_path_case(PathCase::Preserve)
    }

    pub fn engine(&self) -> Engine {
        Engine::new(self.config())
    }

    pub fn engine_with_batch(&self, batch: BatchPolicy) -> Engine {
        Engine::new(self.config().with_batch(batch))
    }

    /// Absolute path of a file inside the repository
    pub fn file(&self, relative: &str) -> PathBuf {
        self.repository.path().join(relative)
    }

    pub fn files(&self, relative: &[&str]) -> Vec<PathBuf> {
        relative.iter().map(|file| self.file(file)).collect()
    }

    pub fn set_status(&self, lines: &[&str]) {
        let mut content = lines.join("\n");
        content.push('\n');
        self.tool_dir
            .child("status.txt")
            .write_str(&content)
            .expect("Failed to write status table");
    }

    /// Make every following invocation abort with `message` on stderr
    pub fn abort_with(&self, message: &str) {
        self.tool_dir
            .child("abort.txt")
            .write_str(&format!("{message}\n"))
            .expect("Failed to write abort message");
    }

    pub fn status_table(&self) -> Vec<String> {
        read_lines(&self.tool_dir.path().join("status.txt"))
    }

    /// Argument lists of every invocation so far, oldest first
    pub fn invocations(&self) -> Vec<String> {
        read_lines(&self.tool_dir.path().join("invocations.log"))
    }

    /// Working directory of every invocation so far
    pub fn directories(&self) -> Vec<PathBuf> {
        read_lines(&self.tool_dir.path().join("directories.log"))
            .into_iter()
            .map(PathBuf::from)
            .collect()
    }

    pub fn invocations_of(&self, subcommand: &str) -> Vec<String> {
        self.invocations()
            .into_iter()
            .filter(|invocation| invocation.split(' ').next() == Some(subcommand))
            .collect()
    }
}

fn read_lines(path: &Path) -> Vec<String> {
    std::fs::read_to_string(path)
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

#[fixture]
pub fn repository_dir() -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    dir.child(".hg/requires")
        .write_str("revlogv1\nstore\n")
        .expect("Failed to write marker");
    dir
}

#[fixture]
pub fn fake_hg(repository_dir: TempDir) -> FakeHg {
    let tool_dir = TempDir::new().expect("Failed to create temp dir");
    let script = tool_dir.child("hg");
    script.write_str(FAKE_HG).expect("Failed to write fake hg");
    std::fs::set_permissions(script.path(), std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake hg executable");
    tool_dir
        .child("status.txt")
        .touch()
        .expect("Failed to create status table");

    wait_until_executable(script.path());

    FakeHg {
        tool_dir,
        repository: repository_dir,
    }
}

// a freshly written script can fail with ETXTBSY while another test thread
// forks with the write handle still inherited
pub fn wait_until_executable(script: &Path) {
    for _ in 0..100 {
        match std::process::Command::new(script).arg("version").output() {
            Ok(_) => return,
            Err(e) if e.raw_os_error() == Some(TEXT_FILE_BUSY) => {
                std::thread::sleep(std::time::Duration::from_millis(10))
            }
            Err(e) => panic!("Failed to run fake hg {:?}: {}", script, e),
        }
    }
    panic!("Fake hg {:?} stayed busy", script);
}

pub fn run_hgsync_command(fake: &FakeHg, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("hgsync").expect("Failed to find hgsync binary");
    cmd.env("HGSYNC_HG", fake.executable());
    cmd.env("NO_COLOR", "1");
    cmd.current_dir(fake.repository.path());
    cmd.arg("--preserve-case");
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
