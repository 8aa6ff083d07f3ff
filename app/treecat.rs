//! Command-line interface for treecat.
//!
//! Resolves the exclusion pattern set (explicit `--config` file, then the
//! user's config directory, then the built-in defaults), builds the options
//! and runs the combine pipeline. Status output goes to stderr; the combined
//! document goes to the output file.

use clap::Parser;
use std::path::PathBuf;
use std::process::exit;
use treecat::{
    DEFAULT_OUTPUT_NAME, Reporter, TextEncoding, TreecatBuilder, TreecatError, TreecatOptions,
    combine, default_patterns, load_patterns_file, user_config_path,
};

/// treecat — combine a directory tree into one annotated text file
#[derive(Parser)]
#[command(name = "treecat", version, about, long_about = None)]
struct Cli {
    /// Directory to combine (default current dir)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output file
    #[arg(default_value = DEFAULT_OUTPUT_NAME)]
    output: PathBuf,

    /// Maximum file size in MB; larger files are listed but not included
    #[arg(long, default_value_t = 10)]
    max_size: u64,

    /// Extra exclusion patterns, gitignore-style; prefix with '!' to
    /// re-include (can be repeated)
    #[arg(short = 'e', long = "exclude")]
    exclude: Vec<String>,

    /// Pattern file replacing the built-in exclusion defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preferred content encoding
    #[arg(long, default_value = "utf8", value_parser = parse_encoding)]
    encoding: TextEncoding,

    /// Skip undecodable files instead of retrying them as Latin-1
    #[arg(long)]
    no_fallback: bool,

    /// Omit the tree diagram from the output
    #[arg(long)]
    no_tree: bool,

    /// Follow symlinks
    #[arg(long)]
    follow_links: bool,

    /// Suppress progress and skip notices (warnings still print)
    #[arg(short, long)]
    quiet: bool,
}

/// Parse string into TextEncoding enum.
fn parse_encoding(s: &str) -> Result<TextEncoding, String> {
    match s {
        "utf8" | "utf-8" => Ok(TextEncoding::Utf8),
        "latin1" | "latin-1" => Ok(TextEncoding::Latin1),
        _ => Err(format!("invalid encoding: {}", s)),
    }
}

impl Cli {
    fn into_options(self) -> Result<TreecatOptions, TreecatError> {
        let patterns = self.resolve_patterns()?;
        let fallback = if self.no_fallback {
            None
        } else {
            Some(TextEncoding::Latin1)
        };

        Ok(TreecatBuilder::new(self.root)
            .output(self.output)
            .exclude_patterns(patterns)
            .max_file_size(self.max_size.saturating_mul(1024 * 1024))
            .encoding(self.encoding)
            .fallback_encoding(fallback)
            .emit_tree(!self.no_tree)
            .follow_links(self.follow_links)
            .quiet(self.quiet)
            .build())
    }

    /// `--config` replaces the defaults and must load; the user config file
    /// is best-effort; `--exclude` patterns append after either.
    fn resolve_patterns(&self) -> Result<Vec<String>, TreecatError> {
        let mut patterns = match &self.config {
            Some(path) => load_patterns_file(path)?,
            None => match user_config_path() {
                Some(path) if path.exists() => load_patterns_file(&path).unwrap_or_else(|err| {
                    eprintln!("Warning: {err}; using built-in defaults");
                    default_patterns()
                }),
                _ => default_patterns(),
            },
        };
        patterns.extend(self.exclude.iter().cloned());
        Ok(patterns)
    }
}

fn main() {
    let cli = Cli::parse();
    let quiet = cli.quiet;
    let max_size_mb = cli.max_size;

    let options = match cli.into_options() {
        Ok(options) => options,
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    };

    let reporter = Reporter::new(quiet);
    reporter.info(&format!(
        "Processing directory: {}",
        options.root.display()
    ));
    reporter.info(&format!("Output file: {}", options.output.display()));
    reporter.info(&format!("Max file size: {max_size_mb}MB"));
    reporter.info(&format!(
        "Exclude patterns: {}",
        options.exclude_patterns.join(", ")
    ));

    let output = options.output.clone();
    match combine(options) {
        Ok(summary) => {
            reporter.info(&format!(
                "\nDone! Combined files written to: {}",
                output.display()
            ));
            reporter.info(&format!(
                "Files included: {}, skipped: {}, failed: {} ({} bytes)",
                summary.files_included,
                summary.files_skipped(),
                summary.files_failed,
                summary.bytes_written
            ));
        }
        Err(err) => {
            eprintln!("Error: {err}");
            exit(1);
        }
    }
}
