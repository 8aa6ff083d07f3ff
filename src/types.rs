use crate::classify::TextEncoding;
use serde::{Deserialize, Serialize};

/// Whether a walked entry is a directory or a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Dir,
    File,
}

/// One surviving entry of the walk, in traversal order.
///
/// The path is relative to the walked root and slash-separated regardless of
/// platform. Depth 0 is a direct child of the root. Entries are immutable
/// once produced by the walker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    pub kind: EntryKind,
    pub depth: usize,
}

impl TreeEntry {
    /// The final path segment, as shown in the tree diagram.
    pub fn name(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Classification outcome for a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileKind {
    /// Decoded successfully; gets a content section.
    Text,
    /// NUL byte or suspect-byte ratio in the sniff prefix; listed in the
    /// tree, no content section.
    Binary,
    /// Size exceeds the configured ceiling; never opened.
    TooLarge,
    /// I/O or decode failure; listed in the tree, no content section.
    Unreadable,
}

/// A classified file: the walked entry plus what the classifier decided.
///
/// `content` and `encoding` are present only for [`FileKind::Text`];
/// `reason` only for [`FileKind::Unreadable`]. Records are consumed by the
/// renderer one at a time and dropped, so at most one file's content is in
/// memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    pub entry: TreeEntry,
    pub kind: FileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<TextEncoding>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl FileRecord {
    pub(crate) fn skipped(entry: TreeEntry, kind: FileKind) -> Self {
        FileRecord {
            entry,
            kind,
            content: None,
            encoding: None,
            reason: None,
        }
    }

    pub(crate) fn unreadable(entry: TreeEntry, reason: String) -> Self {
        FileRecord {
            entry,
            kind: FileKind::Unreadable,
            content: None,
            encoding: None,
            reason: Some(reason),
        }
    }
}

/// Counts reported after a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    /// Text files whose content made it into the document.
    pub files_included: usize,
    /// Files skipped as binary.
    pub files_binary: usize,
    /// Files skipped for exceeding the size ceiling.
    pub files_too_large: usize,
    /// Files that could not be read or decoded.
    pub files_failed: usize,
    /// Total bytes written to the output document.
    pub bytes_written: u64,
}

impl Summary {
    /// Files deliberately left out of the content sections (binary or
    /// oversized). Failures are counted separately.
    pub fn files_skipped(&self) -> usize {
        self.files_binary + self.files_too_large
    }
}
