use super::StatusMap;
use super::rename_scan::{RenameScan, StatusLine};
use crate::artifacts::core::PathCase;
use derive_new::new;
use std::path::Path;

/// Turns `hg status` output into a [`StatusMap`]
///
/// Keys are `root` joined with the reported relative path, with the path-case
/// policy applied to the relative part; `root` is expected to be normalized
/// with the same policy already.
#[derive(Debug, Clone, Copy, new)]
pub struct StatusParser {
    path_case: PathCase,
}

impl StatusParser {
    pub fn parse<I, S>(&self, lines: I, root: &Path) -> StatusMap
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut statuses = StatusMap::new();
        self.merge_into(lines, root, &mut statuses);
        statuses
    }

    /// Add or overwrite entries of `statuses` with the parsed lines.
    ///
    /// Rename pairing starts fresh on every call, so a pair is only detected
    /// when both of its lines come from the same invocation of the tool.
    pub fn merge_into<I, S>(&self, lines: I, root: &Path, statuses: &mut StatusMap)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut scan = RenameScan::new();

        for line in lines {
            let line = line.as_ref();

            let Some(status_line) = StatusLine::parse(line) else {
                tracing::trace!(line, "skipping unrecognized status line");
                scan.reset();
                continue;
            };

            let StatusLine { code, path } = scan.feed(status_line);
            statuses.insert(root.join(self.path_case.normalize(&path)), code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::status::status_code::StatusCode;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn parser() -> StatusParser {
        StatusParser::new(PathCase::Preserve)
    }

    #[test]
    fn keys_are_qualified_with_root() {
        let root = Path::new("/repo");

        let statuses = parser().parse(["M src/lib.rs", "? notes.txt", "C Cargo.toml"], root);

        assert_eq!(
            statuses,
            StatusMap::from([
                (PathBuf::from("/repo/src/lib.rs"), StatusCode::Modified),
                (PathBuf::from("/repo/notes.txt"), StatusCode::Untracked),
                (PathBuf::from("/repo/Cargo.toml"), StatusCode::Clean),
            ])
        );
    }

    #[test]
    fn rename_pair_yields_single_renamed_entry() {
        let root = Path::new("/repo");

        let statuses = parser().parse(["A newname.txt", "  oldname.txt"], root);

        assert_eq!(
            statuses,
            StatusMap::from([(PathBuf::from("/repo/newname.txt"), StatusCode::Renamed)])
        );
        assert!(!statuses.contains_key(Path::new("/repo/oldname.txt")));
    }

    #[test]
    fn rename_pair_among_other_lines() {
        let root = Path::new("/repo");

        let statuses = parser().parse(
            [
                "A added.txt",
                "A moved.txt",
                "  original.txt",
                "R original.txt",
                "M touched.txt",
            ],
            root,
        );

        assert_eq!(
            statuses,
            StatusMap::from([
                (PathBuf::from("/repo/added.txt"), StatusCode::Added),
                (PathBuf::from("/repo/moved.txt"), StatusCode::Renamed),
                (PathBuf::from("/repo/original.txt"), StatusCode::Removed),
                (PathBuf::from("/repo/touched.txt"), StatusCode::Modified),
            ])
        );
    }

    #[test]
    fn malformed_lines_are_skipped_and_break_pairing() {
        let root = Path::new("/repo");

        let statuses = parser().parse(["A new.txt", "", "  old.txt", "Z bogus"], root);

        assert_eq!(
            statuses,
            StatusMap::from([
                (PathBuf::from("/repo/new.txt"), StatusCode::Added),
                (PathBuf::from("/repo/old.txt"), StatusCode::Origin),
            ])
        );
    }

    #[test]
    fn merge_overwrites_existing_entries() {
        let root = Path::new("/repo");
        let mut statuses = StatusMap::from([
            (PathBuf::from("/repo/a.txt"), StatusCode::Untracked),
            (PathBuf::from("/repo/b.txt"), StatusCode::Clean),
        ]);

        parser().merge_into(["A a.txt"], root, &mut statuses);

        assert_eq!(statuses[Path::new("/repo/a.txt")], StatusCode::Added);
        assert_eq!(statuses[Path::new("/repo/b.txt")], StatusCode::Clean);
    }

    #[test]
    fn pairing_does_not_span_merge_calls() {
        let root = Path::new("/repo");
        let mut statuses = StatusMap::new();

        parser().merge_into(["A new.txt"], root, &mut statuses);
        parser().merge_into(["  old.txt"], root, &mut statuses);

        assert_eq!(statuses[Path::new("/repo/new.txt")], StatusCode::Added);
        assert_eq!(statuses[Path::new("/repo/old.txt")], StatusCode::Origin);
    }

    #[test]
    fn fold_policy_lowercases_relative_part() {
        let root = Path::new("/repo");

        let statuses = StatusParser::new(PathCase::Fold).parse(["M Src/Main.RS"], root);

        assert_eq!(
            statuses,
            StatusMap::from([(PathBuf::from("/repo/src/main.rs"), StatusCode::Modified)])
        );
    }
}
