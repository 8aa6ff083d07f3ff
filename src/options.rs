use crate::classify::TextEncoding;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default size ceiling: 10 MiB, matching the CLI's `--max-size 10`.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Default output file name when the caller gives none.
pub const DEFAULT_OUTPUT_NAME: &str = "combined_files.txt";

/// Everything a run needs, constructed once and read-only afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreecatOptions {
    /// Directory to walk.
    pub root: PathBuf,
    /// Where the combined document is written. Parent directories are
    /// created if missing. If this lies inside `root` it is excluded from
    /// the walk, so re-runs never ingest the previous output.
    pub output: PathBuf,
    /// Ordered exclusion patterns: defaults first, then user-supplied, so a
    /// later `!pattern` can rescue what an earlier rule excluded.
    pub exclude_patterns: Vec<String>,
    /// Files strictly larger than this many bytes are listed in the tree
    /// but never opened.
    pub max_file_size: u64,
    /// Encoding tried first when decoding file contents.
    pub encoding: TextEncoding,
    /// Encoding tried when the preferred one fails; `None` marks such files
    /// unreadable instead.
    pub fallback_encoding: Option<TextEncoding>,
    /// Whether the tree diagram (and the content heading) lead the document.
    pub emit_tree: bool,
    /// Follow symbolic links while walking.
    pub follow_links: bool,
    /// Suppress progress and skip notices. Failure warnings still print.
    pub quiet: bool,
}

impl Default for TreecatOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            output: PathBuf::from(DEFAULT_OUTPUT_NAME),
            exclude_patterns: Vec::new(),
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            encoding: TextEncoding::Utf8,
            fallback_encoding: Some(TextEncoding::Latin1),
            emit_tree: true,
            follow_links: false,
            quiet: false,
        }
    }
}

/// Builder for [`TreecatOptions`].
#[derive(Debug, Default)]
pub struct TreecatBuilder {
    options: TreecatOptions,
}

impl TreecatBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: TreecatOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.output = path.into();
        self
    }

    pub fn exclude_patterns(mut self, patterns: Vec<String>) -> Self {
        self.options.exclude_patterns = patterns;
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.options.max_file_size = bytes;
        self
    }

    pub fn encoding(mut self, encoding: TextEncoding) -> Self {
        self.options.encoding = encoding;
        self
    }

    pub fn fallback_encoding(mut self, encoding: Option<TextEncoding>) -> Self {
        self.options.fallback_encoding = encoding;
        self
    }

    pub fn emit_tree(mut self, yes: bool) -> Self {
        self.options.emit_tree = yes;
        self
    }

    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }

    pub fn quiet(mut self, yes: bool) -> Self {
        self.options.quiet = yes;
        self
    }

    pub fn build(self) -> TreecatOptions {
        self.options
    }
}
