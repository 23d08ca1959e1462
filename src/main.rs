use anyhow::{Context as _, Result, bail};
use clap::{Args, Parser, Subcommand};
use hgsync::areas::engine::Engine;
use hgsync::artifacts::batch::{BatchPolicy, DEFAULT_MAX_FILES};
use hgsync::artifacts::core::PathCase;
use hgsync::artifacts::core::config::{Config, DEFAULT_EXECUTABLE};
use hgsync::dispatch::AsyncDispatcher;
use hgsync::dispatch::handlers::{AsyncEngine, StatusReport};
use hgsync::dispatch::queue::DispatchQueue;
use is_terminal::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

#[derive(Parser)]
#[command(
    name = "hgsync",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "Mercurial file status for editors and file managers",
    long_about = "Queries and updates the version-control status of files through the hg \
    command line tool and prints one `<status> <path>` line per file.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalOptions {
    #[arg(
        long,
        global = true,
        env = "HGSYNC_HG",
        default_value = DEFAULT_EXECUTABLE,
        help = "The hg executable to run"
    )]
    hg: PathBuf,
    #[arg(
        long,
        global = true,
        default_value_t = DEFAULT_MAX_FILES,
        help = "Maximum number of files per hg invocation"
    )]
    batch_size: usize,
    #[arg(long, global = true, help = "Lower-case every path (case-insensitive file systems)")]
    fold_case: bool,
    #[arg(long, global = true, conflicts_with = "fold_case", help = "Keep paths exactly as given")]
    preserve_case: bool,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "root",
        about = "Print the repository root enclosing a path",
        long_about = "This command walks up from the given path until it finds the repository marker. \
        With --ask-tool it runs `hg root` instead."
    )]
    Root {
        #[arg(index = 1, help = "The path to start from")]
        path: Option<PathBuf>,
        #[arg(long, help = "Ask hg instead of looking for the marker")]
        ask_tool: bool,
    },
    #[command(
        name = "status",
        about = "Print the status of files",
        long_about = "This command prints the status of the given files. Directories are expanded to the files they contain."
    )]
    Status {
        #[arg(index = 1, required = true)]
        paths: Vec<PathBuf>,
    },
    #[command(
        name = "root-status",
        about = "Print the status of every file in a repository, ignored files included"
    )]
    RootStatus {
        #[arg(index = 1, help = "Any path inside the repository")]
        path: Option<PathBuf>,
    },
    #[command(name = "add", about = "Put files under version control")]
    Add {
        #[arg(long, help = "Skip files the repository ignores")]
        skip_ignored: bool,
        #[arg(index = 1, required = true)]
        paths: Vec<PathBuf>,
    },
    #[command(name = "remove", about = "Record files deleted from the working directory")]
    Remove {
        #[arg(index = 1, required = true)]
        paths: Vec<PathBuf>,
    },
    #[command(name = "rename", about = "Record a rename that already happened on disk")]
    Rename {
        #[arg(index = 1)]
        old: PathBuf,
        #[arg(index = 2)]
        new: PathBuf,
    },
    #[command(name = "revert", about = "Discard uncommitted changes of files")]
    Revert {
        #[arg(index = 1, required = true)]
        paths: Vec<PathBuf>,
    },
}

impl GlobalOptions {
    fn config(&self) -> Config {
        let path_case = if self.fold_case {
            PathCase::Fold
        } else if self.preserve_case {
            PathCase::Preserve
        } else {
            PathCase::platform_default()
        };

        Config::default()
            .with_executable(self.hg.clone())
            .with_batch(BatchPolicy {
                max_files: self.batch_size,
                ..BatchPolicy::default()
            })
            .with_path_case(path_case)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    colored::control::set_override(std::io::stdout().is_terminal());

    let cli = Cli::parse();
    let engine = Engine::new(cli.options.config());

    let mut queue = DispatchQueue::new();
    let dispatcher = AsyncDispatcher::new(Handle::current(), queue.context());
    let async_engine = AsyncEngine::new(engine, dispatcher);

    let report = Arc::new(Mutex::new(None));
    let sink = report.clone();
    let deliver = move |delivered: StatusReport| {
        if let Ok(mut slot) = sink.lock() {
            *slot = Some(delivered);
        }
    };

    let pending: JoinHandle<bool> = match cli.command {
        Commands::Root { path, ask_tool } => {
            return print_root(async_engine.engine(), path.as_deref(), ask_tool).await;
        }
        Commands::Status { paths } => async_engine.query_status(expand_paths(&paths)?, deliver),
        Commands::RootStatus { path } => {
            let path = absolute_or_current(path.as_deref())?;
            let root = async_engine
                .engine()
                .resolver()
                .find_root(&path)
                .with_context(|| format!("no repository found for {}", path.display()))?;
            async_engine.query_root_status(root, deliver)
        }
        Commands::Add {
            skip_ignored: true,
            paths,
        } => async_engine.add_files_not_ignored(absolute_all(&paths)?, deliver),
        Commands::Add { paths, .. } => async_engine.add_files(absolute_all(&paths)?, deliver),
        Commands::Remove { paths } => async_engine.remove_files(absolute_all(&paths)?, deliver),
        Commands::Rename { old, new } => async_engine.rename_files(
            vec![std::path::absolute(old)?],
            vec![std::path::absolute(new)?],
            deliver,
        ),
        Commands::Revert { paths } => async_engine.revert_files(absolute_all(&paths)?, deliver),
    };

    if !pending.await? {
        bail!("no status information available");
    }
    queue.run_pending();

    let report = report
        .lock()
        .map_err(|_| anyhow::anyhow!("status report lock poisoned"))?
        .take()
        .context("no status information available")?;

    for (file, status) in &report.statuses {
        println!("{} {}", status.colored(), file.display());
    }

    Ok(())
}

async fn print_root(engine: &Engine, path: Option<&Path>, ask_tool: bool) -> Result<()> {
    let path = absolute_or_current(path)?;
    let root = if ask_tool {
        engine.query_root(&path).await.ok()
    } else {
        engine.resolver().find_root(&path)
    };

    match root {
        Some(root) => {
            println!("{}", root.display());
            Ok(())
        }
        None => bail!("no repository found for {}", path.display()),
    }
}

fn absolute_or_current(path: Option<&Path>) -> Result<PathBuf> {
    match path {
        Some(path) => Ok(std::path::absolute(path)?),
        None => Ok(std::env::current_dir()?),
    }
}

fn absolute_all(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    paths
        .iter()
        .map(|path| std::path::absolute(path).map_err(Into::into))
        .collect()
}

// directories are listed file by file, skipping repository metadata
fn expand_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for path in absolute_all(paths)? {
        if path.is_dir() {
            files.extend(
                WalkDir::new(&path)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_entry(|entry| entry.file_name() != ".hg")
                    .filter_map(|entry| entry.ok())
                    .filter(|entry| entry.file_type().is_file())
                    .map(|entry| entry.into_path()),
            );
        } else {
            files.push(path);
        }
    }

    Ok(files)
}
