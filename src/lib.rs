//! Mercurial file status synchronization
//!
//! Keeps a caller's view of per-file version-control status in step with the
//! `hg` command line tool: resolve the repository root, run `hg status`,
//! parse its output into a [`StatusMap`](artifacts::status::StatusMap), and
//! hand the result back on the caller's own context.
//!
//! - `areas`: engine, subprocess runner, root resolver
//! - `artifacts`: status model, parser, batching, configuration, errors
//! - `commands`: status queries and mutations on [`Engine`](areas::engine::Engine)
//! - `dispatch`: background execution and result delivery

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod dispatch;
