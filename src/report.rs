//! Console reporting on stderr.
//!
//! The combined document owns stdout-adjacent output (it goes to a file), so
//! every human-readable status line lands on stderr. Progress updates rewrite
//! one line with `\r`; any other message first finishes that line so it is
//! never overwritten mid-run.

use std::cell::Cell;

/// Side channel for progress, skip notices and warnings.
///
/// Quiet mode suppresses progress and notices. Warnings are always printed:
/// a file that failed mid-run should never disappear silently.
pub struct Reporter {
    quiet: bool,
    progress_pending: Cell<bool>,
}

impl Reporter {
    pub fn new(quiet: bool) -> Self {
        Reporter {
            quiet,
            progress_pending: Cell::new(false),
        }
    }

    /// Rewrites the in-place progress line.
    pub fn progress(&self, processed: usize, total: usize) {
        if self.quiet || total == 0 {
            return;
        }
        let percent = processed as f64 / total as f64 * 100.0;
        eprint!("\rProcessing files... {processed}/{total} ({percent:.1}%)");
        self.progress_pending.set(true);
    }

    /// Terminates the progress line once the content pass is done.
    pub fn finish_progress(&self) {
        self.break_line();
    }

    /// A skip notice ("binary file", "too large"). Suppressed in quiet mode.
    pub fn notice(&self, message: &str) {
        if self.quiet {
            return;
        }
        self.break_line();
        eprintln!("{message}");
    }

    /// A recoverable failure. Printed even in quiet mode.
    pub fn warn(&self, message: &str) {
        self.break_line();
        eprintln!("{message}");
    }

    /// Startup and completion chatter. Suppressed in quiet mode.
    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{message}");
        }
    }

    fn break_line(&self) {
        if self.progress_pending.replace(false) {
            eprintln!();
        }
    }
}
