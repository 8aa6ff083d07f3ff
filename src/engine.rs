//! The combine pipeline.
//!
//! One run walks the tree exactly once, renders the diagram from the
//! collected entries, then classifies and appends each file in walk order.
//! Per-file problems (binary, oversized, unreadable) are tallied and
//! reported; only a broken root, a bad pattern or an unwritable output abort
//! the run.

use crate::classify::classify;
use crate::error::TreecatError;
use crate::matcher::PatternMatcher;
use crate::options::TreecatOptions;
use crate::output::{self, Document};
use crate::report::Reporter;
use crate::tree::render_tree;
use crate::types::{FileKind, Summary};
use crate::walker::walk_entries;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

/// Walks `options.root` and writes the combined document to
/// `options.output`.
///
/// The output file is excluded from its own walk, so combining a directory
/// into a file inside that directory converges instead of snowballing.
///
/// # Errors
///
/// Fails when the root does not exist or is not a directory, when an
/// exclusion pattern does not compile, or when the output file cannot be
/// created or written.
pub fn combine(options: TreecatOptions) -> Result<Summary, TreecatError> {
    #[cfg(feature = "logging")]
    tracing::debug!("starting combine with root: {}", options.root.display());

    let root = options
        .root
        .canonicalize()
        .map_err(|_| TreecatError::RootNotFound {
            path: options.root.clone(),
        })?;
    if !root.is_dir() {
        return Err(TreecatError::NotADirectory {
            path: options.root.clone(),
        });
    }

    let reporter = Reporter::new(options.quiet);

    let mut patterns = options.exclude_patterns.clone();
    if let Some(output_rel) = path_inside_root(&options.output, &root) {
        // Appended last, so it wins over any user rule, negations included.
        patterns.push(output_rel);
    }
    let matcher = PatternMatcher::compile(&patterns)?;

    let entries = walk_entries(&root, &matcher, options.follow_links, &reporter);

    if let Some(parent) = options.output.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|err| TreecatError::output(&options.output, err))?;
    }
    let file =
        File::create(&options.output).map_err(|err| TreecatError::output(&options.output, err))?;
    let mut document = Document::new(BufWriter::new(file));

    if options.emit_tree {
        let stamp = output::generation_stamp();
        document
            .tree_section(&stamp, &render_tree(&entries))
            .map_err(|err| TreecatError::output(&options.output, err))?;
    }

    let total = entries.iter().filter(|entry| entry.is_file()).count();
    let mut summary = Summary::default();
    for (index, entry) in entries.iter().filter(|entry| entry.is_file()).enumerate() {
        reporter.progress(index + 1, total);
        let record = classify(&root.join(&entry.path), entry, &options);
        match record.kind {
            FileKind::Text => {
                let content = record.content.as_deref().unwrap_or_default();
                document
                    .file_section(&record.entry.path, content)
                    .map_err(|err| TreecatError::output(&options.output, err))?;
                summary.files_included += 1;
            }
            FileKind::Binary => {
                summary.files_binary += 1;
                reporter.notice(&format!("Skipping {}: binary file", record.entry.path));
            }
            FileKind::TooLarge => {
                summary.files_too_large += 1;
                reporter.notice(&format!(
                    "Skipping {}: file too large (>{} bytes)",
                    record.entry.path, options.max_file_size
                ));
            }
            FileKind::Unreadable => {
                summary.files_failed += 1;
                let reason = record.reason.as_deref().unwrap_or("unknown error");
                reporter.warn(&format!(
                    "Error processing {}: {}",
                    record.entry.path, reason
                ));
            }
        }
    }
    reporter.finish_progress();

    summary.bytes_written = document
        .finish()
        .map_err(|err| TreecatError::output(&options.output, err))?;

    #[cfg(feature = "logging")]
    tracing::debug!(
        "combine finished: {} included, {} skipped, {} failed",
        summary.files_included,
        summary.files_skipped(),
        summary.files_failed
    );

    Ok(summary)
}

/// Resolves the output path and, when it lands inside the root, returns its
/// root-relative slash-separated form for the self-exclusion rule.
///
/// The output file usually does not exist yet, so resolution falls back to
/// canonicalizing its parent and re-attaching the file name.
fn path_inside_root(output: &Path, root: &Path) -> Option<String> {
    let absolute = output
        .canonicalize()
        .or_else(|_| -> io::Result<PathBuf> {
            let name = output
                .file_name()
                .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no file name"))?;
            let parent = match output.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            };
            Ok(parent.canonicalize()?.join(name))
        })
        .ok()?;
    let rel = absolute.strip_prefix(root).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    let rel = rel.to_string_lossy();
    if cfg!(windows) {
        Some(rel.replace('\\', "/"))
    } else {
        Some(rel.into_owned())
    }
}
