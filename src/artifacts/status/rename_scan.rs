//! Rename pairing
//!
//! `hg status -A` reports a renamed file as an added line immediately followed
//! by a copy-source line (`"A new.txt"`, `"  old.txt"`). The scanner keeps one
//! line of history and rewrites the pair into a single `Renamed` write for the
//! added file. There is no lookahead: only the line directly before a
//! copy-source line is consulted.

use super::status_code::StatusCode;
use std::path::PathBuf;

/// One parsed line of status output, path relative to the repository root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub code: StatusCode,
    pub path: PathBuf,
}

impl StatusLine {
    /// Parse `<status><separator><path>`; anything shorter or with an
    /// unknown status letter is rejected.
    pub fn parse(line: &str) -> Option<Self> {
        let mut chars = line.chars();
        let code = StatusCode::from_char(chars.next()?)?;
        chars.next()?;

        let path = chars.as_str();
        if path.is_empty() {
            return None;
        }

        Some(StatusLine {
            code,
            path: PathBuf::from(path),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum ScanState {
    #[default]
    Neutral,
    AfterAdded(PathBuf),
}

/// Two-state scanner over consecutive status lines
#[derive(Debug, Default)]
pub struct RenameScan {
    state: ScanState,
}

impl RenameScan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line and get the map write it produces.
    ///
    /// The state always advances from the line as parsed, never from the
    /// rewritten result.
    pub fn feed(&mut self, line: StatusLine) -> StatusLine {
        let effective = match &self.state {
            ScanState::AfterAdded(added) if line.code == StatusCode::Origin => StatusLine {
                code: StatusCode::Renamed,
                path: added.clone(),
            },
            _ => line.clone(),
        };

        self.state = match line.code {
            StatusCode::Added => ScanState::AfterAdded(line.path),
            _ => ScanState::Neutral,
        };

        effective
    }

    /// Forget the previous line; used when a line could not be parsed.
    pub fn reset(&mut self) {
        self.state = ScanState::Neutral;
    }
}
