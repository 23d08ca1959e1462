//! Argument batching
//!
//! Long file lists are split into several invocations of the tool so that a
//! single command line never exceeds what the host OS accepts. A batch closes
//! when it holds `max_files` paths or when the next path would push the
//! argument bytes past `max_arg_bytes`, whichever comes first.

use derive_new::new;
use std::path::{Path, PathBuf};

/// Maximum number of files passed to a single invocation
pub const DEFAULT_MAX_FILES: usize = 150;

/// Argument byte budget of a single invocation
///
/// Windows caps the whole command line at 32767 UTF-16 units; the budget
/// leaves room for the executable and the subcommand.
#[cfg(windows)]
pub const DEFAULT_MAX_ARG_BYTES: usize = 30_000;
#[cfg(not(windows))]
pub const DEFAULT_MAX_ARG_BYTES: usize = 128 * 1024;

// two quotes and a separating space per path on a rendered command line
const PER_ARG_OVERHEAD: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct BatchPolicy {
    pub max_files: usize,
    pub max_arg_bytes: usize,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        BatchPolicy::new(DEFAULT_MAX_FILES, DEFAULT_MAX_ARG_BYTES)
    }
}

impl BatchPolicy {
    pub fn batches<'a>(&self, paths: &'a [PathBuf]) -> Batches<'a> {
        Batches {
            policy: *self,
            remaining: paths,
        }
    }
}

/// Iterator over consecutive, non-empty slices of the input paths
#[derive(Debug)]
pub struct Batches<'a> {
    policy: BatchPolicy,
    remaining: &'a [PathBuf],
}

impl<'a> Iterator for Batches<'a> {
    type Item = &'a [PathBuf];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining.is_empty() {
            return None;
        }

        let mut bytes = 0;
        let mut end = 0;

        for path in self.remaining.iter().take(self.policy.max_files.max(1)) {
            let cost = arg_cost(path);
            // an oversized path still gets a batch of its own
            if end > 0 && bytes + cost > self.policy.max_arg_bytes {
                break;
            }
            bytes += cost;
            end += 1;
        }

        let (batch, rest) = self.remaining.split_at(end);
        self.remaining = rest;

        Some(batch)
    }
}

fn arg_cost(path: &Path) -> usize {
    path.as_os_str().len() + PER_ARG_OVERHEAD
}
