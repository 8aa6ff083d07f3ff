//! Combined-document layout.
//!
//! [`Document`] streams the output file section by section so that at most
//! one file's decoded content is in memory at a time. The layout is:
//!
//! ```text
//! # File Tree - Generated on 2026-08-25 14:03:12
//! ├── src
//! │   └── lib.rs
//! └── README.md
//!
//! # Combined Files Content
//!
//! ### File: README.md
//! ...content...
//!
//! ### File: src/lib.rs
//! ...content...
//! ```
//!
//! Every section is newline-terminated; a file whose content lacks a final
//! newline gets one so the next header always starts at column zero.

use std::io::{self, Write};

/// Streaming writer for the combined document.
pub(crate) struct Document<W: Write> {
    writer: W,
    bytes_written: u64,
}

impl<W: Write> Document<W> {
    pub fn new(writer: W) -> Self {
        Document {
            writer,
            bytes_written: 0,
        }
    }

    /// Writes the tree section and the content heading.
    pub fn tree_section(&mut self, timestamp: &str, tree: &str) -> io::Result<()> {
        self.write_str(&format!("# File Tree - Generated on {timestamp}\n"))?;
        if !tree.is_empty() {
            self.write_str(tree)?;
            self.write_str("\n")?;
        }
        self.write_str("\n# Combined Files Content\n")?;
        Ok(())
    }

    /// Writes one file section: blank separator, header, content.
    pub fn file_section(&mut self, path: &str, content: &str) -> io::Result<()> {
        if self.bytes_written > 0 {
            self.write_str("\n")?;
        }
        self.write_str(&format!("### File: {path}\n"))?;
        self.write_str(content)?;
        if !content.is_empty() && !content.ends_with('\n') {
            self.write_str("\n")?;
        }
        Ok(())
    }

    /// Flushes and reports the total bytes written.
    pub fn finish(mut self) -> io::Result<u64> {
        self.writer.flush()?;
        Ok(self.bytes_written)
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes())?;
        self.bytes_written += text.len() as u64;
        Ok(())
    }
}

/// Local wall-clock stamp for the tree header.
pub(crate) fn generation_stamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
