use colored::{ColoredString, Colorize};

/// Per-file status as reported by `hg status -A`
///
/// The letters mirror Mercurial's status codes. [`StatusCode::Renamed`] is
/// never printed by the tool; it is inferred from an added line followed by
/// its copy-source line. [`StatusCode::Origin`] is that copy-source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StatusCode {
    Clean,
    Modified,
    Added,
    Removed,
    Renamed,
    Ignored,
    Untracked,
    Missing,
    Unresolved,
    Origin,
}

impl StatusCode {
    pub fn from_char(status: char) -> Option<Self> {
        match status {
            'C' => Some(StatusCode::Clean),
            'M' => Some(StatusCode::Modified),
            'A' => Some(StatusCode::Added),
            'R' => Some(StatusCode::Removed),
            'N' => Some(StatusCode::Renamed),
            'I' => Some(StatusCode::Ignored),
            '?' => Some(StatusCode::Untracked),
            '!' => Some(StatusCode::Missing),
            'U' => Some(StatusCode::Unresolved),
            ' ' => Some(StatusCode::Origin),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            StatusCode::Clean => 'C',
            StatusCode::Modified => 'M',
            StatusCode::Added => 'A',
            StatusCode::Removed => 'R',
            StatusCode::Renamed => 'N',
            StatusCode::Ignored => 'I',
            StatusCode::Untracked => '?',
            StatusCode::Missing => '!',
            StatusCode::Unresolved => 'U',
            StatusCode::Origin => ' ',
        }
    }

    /// Colored letter for terminal output
    pub fn colored(&self) -> ColoredString {
        let letter = self.as_char().to_string();

        match self {
            StatusCode::Added | StatusCode::Renamed => letter.green(),
            StatusCode::Modified => letter.yellow(),
            StatusCode::Removed | StatusCode::Missing | StatusCode::Unresolved => letter.red(),
            StatusCode::Untracked => letter.magenta(),
            StatusCode::Ignored | StatusCode::Clean | StatusCode::Origin => letter.normal(),
        }
    }
}

impl TryFrom<char> for StatusCode {
    type Error = char;

    fn try_from(status: char) -> Result<Self, Self::Error> {
        StatusCode::from_char(status).ok_or(status)
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
