//! # Treecat
//!
//! `treecat` walks a directory tree and concatenates every text file into one
//! annotated document: a box-drawing tree diagram up top, then each file's
//! content under a `### File:` header, in the same deterministic order the
//! tree shows.
//!
//! Filtering uses ordered glob rules with gitignore-style `!` negation: the
//! last rule that matches a path decides, excluded directories are pruned
//! whole, and the output file is always excluded from its own walk. Binary
//! and oversized files are listed in the tree but skipped in the content
//! section; nothing short of a broken root or an unwritable output aborts a
//! run.
//!
//! # Features
//!
//! - `logging`: Enables debug logging via the `tracing` crate.
//!
//! # Example
//!
//! ```no_run
//! use treecat::{TreecatBuilder, combine, default_patterns};
//!
//! let options = TreecatBuilder::new(".")
//!     .output("combined_files.txt")
//!     .exclude_patterns(default_patterns())
//!     .max_file_size(10 * 1024 * 1024) // 10 MB
//!     .build();
//!
//! let summary = combine(options).expect("failed to combine directory");
//!
//! println!(
//!     "{} files included, {} skipped, {} bytes written",
//!     summary.files_included,
//!     summary.files_skipped(),
//!     summary.bytes_written
//! );
//! ```

mod classify;
mod config;
mod engine;
mod error;
mod matcher;
mod options;
mod output;
mod report;
mod tree;
mod types;
mod walker;

pub use classify::{SNIFF_LEN, TextEncoding, classify};
pub use config::{default_patterns, load_patterns_file, parse_patterns, user_config_path};
pub use engine::combine;
pub use error::TreecatError;
pub use matcher::PatternMatcher;
pub use options::{DEFAULT_MAX_FILE_SIZE, DEFAULT_OUTPUT_NAME, TreecatBuilder, TreecatOptions};
pub use report::Reporter;
pub use types::{EntryKind, FileKind, FileRecord, Summary, TreeEntry};
pub use walker::{TreeWalker, walk_entries};
