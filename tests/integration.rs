use std::fs;
#[cfg(unix)]
use std::os::unix::fs::symlink;
use std::path::Path;
use tempfile::tempdir;
use treecat::{Summary, TreecatBuilder, TreecatError, combine, default_patterns};

fn combine_with(root: &Path, output: &Path, patterns: Vec<String>) -> (Summary, String) {
    let options = TreecatBuilder::new(root)
        .output(output)
        .exclude_patterns(patterns)
        .quiet(true)
        .build();
    let summary = combine(options).unwrap();
    (summary, fs::read_to_string(output).unwrap())
}

#[test]
fn integration_full_flow() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README.md"), "hello").unwrap();
    fs::create_dir(dir.path().join("src")).unwrap();
    fs::write(dir.path().join("src/main.bin"), [0u8, 159, 146, 150]).unwrap();
    fs::create_dir(dir.path().join(".git")).unwrap();
    fs::write(dir.path().join(".git/config"), "[core]\n").unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("combined.txt");
    let (summary, doc) = combine_with(dir.path(), &output, default_patterns());

    assert!(doc.starts_with("# File Tree - Generated on "));
    assert!(doc.contains("# Combined Files Content"));
    assert!(doc.contains("├── README.md"));
    assert!(doc.contains("└── src"));
    assert!(doc.contains("### File: README.md\nhello\n"));
    // Binary files are listed in the tree but get no content section.
    assert!(doc.contains("── main.bin"));
    assert!(!doc.contains("### File: src/main.bin"));
    assert!(!doc.contains(".git"));

    assert_eq!(summary.files_included, 1);
    assert_eq!(summary.files_binary, 1);
    assert_eq!(summary.files_failed, 0);
}

#[test]
fn integration_content_sections_follow_walk_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.txt"), "b\n").unwrap();
    fs::write(dir.path().join("a.txt"), "a\n").unwrap();
    fs::create_dir(dir.path().join("c")).unwrap();
    fs::write(dir.path().join("c/d.txt"), "d\n").unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("combined.txt");
    let (_, doc) = combine_with(dir.path(), &output, Vec::new());

    let a = doc.find("### File: a.txt").unwrap();
    let b = doc.find("### File: b.txt").unwrap();
    let d = doc.find("### File: c/d.txt").unwrap();
    assert!(a < b && b < d);
}

#[test]
fn integration_rerun_is_idempotent_and_self_excluding() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("note.txt"), "note\n").unwrap();
    let output = dir.path().join("combo.txt");

    let (first_summary, first_doc) = combine_with(dir.path(), &output, Vec::new());
    let (second_summary, second_doc) = combine_with(dir.path(), &output, Vec::new());

    // The output from the first run must not leak into the second.
    assert!(!second_doc.contains("combo.txt"));
    assert_eq!(first_summary, second_summary);

    // Identical apart from the timestamp header.
    let first_body = first_doc.split_once('\n').unwrap().1;
    let second_body = second_doc.split_once('\n').unwrap().1;
    assert_eq!(first_body, second_body);
}

#[test]
fn integration_negation_rescues_a_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("debug.log"), "noise\n").unwrap();
    fs::write(dir.path().join("important.log"), "signal\n").unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("combined.txt");
    let patterns = vec!["*.log".to_string(), "!important.log".to_string()];
    let (summary, doc) = combine_with(dir.path(), &output, patterns);

    assert!(doc.contains("### File: important.log\nsignal\n"));
    assert!(!doc.contains("debug.log"));
    assert_eq!(summary.files_included, 1);
}

#[test]
fn integration_summary_counts_every_outcome() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hi\n").unwrap();
    fs::write(dir.path().join("big.txt"), "A".repeat(100)).unwrap();
    fs::write(dir.path().join("bin.dat"), [0u8, 1, 2, 3]).unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("combined.txt");
    let options = TreecatBuilder::new(dir.path())
        .output(&output)
        .max_file_size(10)
        .quiet(true)
        .build();
    let summary = combine(options).unwrap();
    let doc = fs::read_to_string(&output).unwrap();

    assert_eq!(summary.files_included, 1);
    assert_eq!(summary.files_binary, 1);
    assert_eq!(summary.files_too_large, 1);
    assert_eq!(summary.files_skipped(), 2);
    assert_eq!(summary.files_failed, 0);
    assert_eq!(summary.bytes_written, doc.len() as u64);

    // Skipped files still show up in the tree.
    assert!(doc.contains("── big.txt"));
    assert!(doc.contains("── bin.dat"));
    assert!(!doc.contains("### File: big.txt"));
    assert!(!doc.contains("### File: bin.dat"));
}

#[cfg(unix)]
#[test]
fn integration_unreadable_file_fails_without_aborting() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("keep.txt"), "kept\n").unwrap();
    // A dangling link walks as a file but fails to stat.
    symlink(dir.path().join("gone"), dir.path().join("dangling.txt")).unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("combined.txt");
    let (summary, doc) = combine_with(dir.path(), &output, Vec::new());

    assert_eq!(summary.files_failed, 1);
    assert_eq!(summary.files_included, 1);
    // Unreadable files keep their tree entry but get no content section.
    assert!(doc.contains("── dangling.txt"));
    assert!(!doc.contains("### File: dangling.txt"));
    assert!(doc.contains("### File: keep.txt\nkept\n"));
}

#[cfg(unix)]
#[test]
fn integration_symlink_loop_does_not_abort_the_walk() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("note.txt"), "sibling\n").unwrap();
    symlink(dir.path(), dir.path().join("loop")).unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("combined.txt");
    let options = TreecatBuilder::new(dir.path())
        .output(&output)
        .follow_links(true)
        .quiet(true)
        .build();
    let summary = combine(options).unwrap();
    let doc = fs::read_to_string(&output).unwrap();

    // The loop surfaces as a warning; siblings still make it in.
    assert_eq!(summary.files_included, 1);
    assert_eq!(summary.files_failed, 0);
    assert!(doc.contains("### File: note.txt\nsibling\n"));
}

#[test]
fn integration_missing_root_fails() {
    let dir = tempdir().unwrap();
    let options = TreecatBuilder::new(dir.path().join("nope"))
        .output(dir.path().join("out.txt"))
        .quiet(true)
        .build();
    assert!(matches!(
        combine(options),
        Err(TreecatError::RootNotFound { .. })
    ));
}

#[test]
fn integration_file_root_fails() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("plain.txt");
    fs::write(&file, "not a dir").unwrap();
    let options = TreecatBuilder::new(&file)
        .output(dir.path().join("out.txt"))
        .quiet(true)
        .build();
    assert!(matches!(
        combine(options),
        Err(TreecatError::NotADirectory { .. })
    ));
}

#[test]
fn integration_invalid_pattern_fails() {
    let dir = tempdir().unwrap();
    let options = TreecatBuilder::new(dir.path())
        .output(dir.path().join("out.txt"))
        .exclude_patterns(vec!["[".to_string()])
        .quiet(true)
        .build();
    assert!(matches!(
        combine(options),
        Err(TreecatError::InvalidPattern { .. })
    ));
}

#[test]
fn integration_output_parent_directories_are_created() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "a\n").unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("deep/nested/combined.txt");
    let (summary, doc) = combine_with(dir.path(), &output, Vec::new());

    assert_eq!(summary.files_included, 1);
    assert!(doc.contains("### File: a.txt"));
}

#[test]
fn integration_no_tree_omits_diagram_and_heading() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "alpha\n").unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("combined.txt");
    let options = TreecatBuilder::new(dir.path())
        .output(&output)
        .emit_tree(false)
        .quiet(true)
        .build();
    combine(options).unwrap();
    let doc = fs::read_to_string(&output).unwrap();

    assert_eq!(doc, "### File: a.txt\nalpha\n");
}

#[test]
fn integration_empty_root_writes_headers_only() {
    let dir = tempdir().unwrap();
    let out = tempdir().unwrap();
    let output = out.path().join("combined.txt");
    let (summary, doc) = combine_with(dir.path(), &output, Vec::new());

    let (header, body) = doc.split_once('\n').unwrap();
    assert!(header.starts_with("# File Tree - Generated on "));
    assert_eq!(body, "\n# Combined Files Content\n");
    assert_eq!(summary, Summary {
        bytes_written: doc.len() as u64,
        ..Summary::default()
    });
}

#[test]
fn integration_content_is_copied_verbatim() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("crlf.txt"), "one\r\ntwo\r\n").unwrap();
    fs::write(dir.path().join("bare.txt"), "no final newline").unwrap();

    let out = tempdir().unwrap();
    let output = out.path().join("combined.txt");
    let (_, doc) = combine_with(dir.path(), &output, Vec::new());

    assert!(doc.contains("### File: crlf.txt\none\r\ntwo\r\n"));
    // A missing final newline is added so the next header starts clean.
    assert!(doc.contains("### File: bare.txt\nno final newline\n"));
}
