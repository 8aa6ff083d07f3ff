//! Deterministic depth-first traversal.
//!
//! The walk visits children of each directory in lexicographic byte order,
//! directories and files interleaved, so the same tree always produces the
//! same entry sequence. None of the ignore-file conventions apply here: the
//! only filtering is the caller's [`PatternMatcher`], and an excluded
//! directory is pruned without descending into it.

use crate::matcher::PatternMatcher;
use crate::report::Reporter;
use crate::types::{EntryKind, TreeEntry};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

/// Iterator over the entries below a root, in rendering order.
///
/// Paths are reported relative to the root with `/` separators. The root
/// itself is not yielded, and its immediate children have depth 0. Traversal
/// errors (unreadable directories, broken links) are yielded as `Err` items
/// and the walk continues past them.
pub struct TreeWalker {
    inner: ignore::Walk,
    root: PathBuf,
}

impl TreeWalker {
    pub fn new(root: &Path, matcher: &PatternMatcher, follow_links: bool) -> Self {
        let mut builder = WalkBuilder::new(root);
        builder
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .follow_links(follow_links)
            .sort_by_file_name(|a, b| a.cmp(b));

        let filter_root = root.to_path_buf();
        let filter_matcher = matcher.clone();
        builder.filter_entry(move |entry| {
            let is_dir = entry.file_type().map_or(false, |ft| ft.is_dir());
            match entry.path().strip_prefix(&filter_root) {
                Ok(rel) if !rel.as_os_str().is_empty() => {
                    filter_matcher.included(&relative_name(rel), is_dir)
                }
                _ => true,
            }
        });

        TreeWalker {
            inner: builder.build(),
            root: root.to_path_buf(),
        }
    }
}

impl Iterator for TreeWalker {
    type Item = Result<TreeEntry, ignore::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(entry) => {
                    // Depth 0 is the root itself.
                    if entry.depth() == 0 {
                        continue;
                    }
                    let rel = match entry.path().strip_prefix(&self.root) {
                        Ok(rel) => rel,
                        Err(_) => continue,
                    };
                    let kind = if entry.file_type().map_or(false, |ft| ft.is_dir()) {
                        EntryKind::Dir
                    } else {
                        EntryKind::File
                    };
                    return Some(Ok(TreeEntry {
                        path: relative_name(rel),
                        kind,
                        depth: entry.depth() - 1,
                    }));
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Materializes the walk, reporting traversal errors as warnings instead of
/// aborting. The resulting list drives both the tree diagram and the content
/// passes, so the walk happens exactly once per run.
pub fn walk_entries(
    root: &Path,
    matcher: &PatternMatcher,
    follow_links: bool,
    reporter: &Reporter,
) -> Vec<TreeEntry> {
    let mut entries = Vec::new();
    for item in TreeWalker::new(root, matcher, follow_links) {
        match item {
            Ok(entry) => entries.push(entry),
            Err(err) => reporter.warn(&format!("Warning: {err}")),
        }
    }
    entries
}

fn relative_name(rel: &Path) -> String {
    let name = rel.to_string_lossy();
    if cfg!(windows) {
        name.replace('\\', "/")
    } else {
        name.into_owned()
    }
}
