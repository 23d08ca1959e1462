//! File status model and `hg status` output parsing

pub mod parser;
pub mod rename_scan;
pub mod status_code;

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Absolute, root-qualified path to status
pub type StatusMap = BTreeMap<PathBuf, status_code::StatusCode>;
