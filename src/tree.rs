//! Box-drawing tree diagram.
//!
//! Renders a walk's entry list without touching the filesystem, so the
//! diagram always reflects exactly what the walk produced.

use crate::types::TreeEntry;

/// Renders entries (in walk order) as an indented tree.
///
/// The last entry of each directory gets a `└── ` connector, the others
/// `├── `; ancestor columns draw `│   ` while that ancestor still has
/// siblings below, and spaces once it does not.
pub(crate) fn render_tree(entries: &[TreeEntry]) -> String {
    let mut lines = Vec::with_capacity(entries.len());
    // open_levels[d] is true while the ancestor at depth d has more
    // siblings coming.
    let mut open_levels: Vec<bool> = Vec::new();

    for (index, entry) in entries.iter().enumerate() {
        let last = is_last_sibling(entries, index);
        open_levels.truncate(entry.depth);

        let mut line = String::new();
        for &open in &open_levels {
            line.push_str(if open { "│   " } else { "    " });
        }
        line.push_str(if last { "└── " } else { "├── " });
        line.push_str(entry.name());
        lines.push(line);

        open_levels.push(!last);
    }

    lines.join("\n")
}

/// True when no later entry at the same depth precedes a shallower one.
fn is_last_sibling(entries: &[TreeEntry], index: usize) -> bool {
    let depth = entries[index].depth;
    for entry in &entries[index + 1..] {
        if entry.depth < depth {
            return true;
        }
        if entry.depth == depth {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EntryKind;

    fn dir(path: &str) -> TreeEntry {
        entry(path, EntryKind::Dir)
    }

    fn file(path: &str) -> TreeEntry {
        entry(path, EntryKind::File)
    }

    fn entry(path: &str, kind: EntryKind) -> TreeEntry {
        TreeEntry {
            path: path.to_string(),
            kind,
            depth: path.matches('/').count(),
        }
    }

    #[test]
    fn empty_walk_renders_nothing() {
        assert_eq!(render_tree(&[]), "");
    }

    #[test]
    fn flat_listing_marks_the_last_entry() {
        let entries = [file("a.txt"), file("b.txt"), file("c.txt")];
        assert_eq!(render_tree(&entries), "├── a.txt\n├── b.txt\n└── c.txt");
    }

    #[test]
    fn nested_directories_draw_ancestor_columns() {
        let entries = [
            dir("src"),
            file("src/lib.rs"),
            dir("src/sub"),
            file("src/sub/mod.rs"),
            file("README.md"),
        ];
        let expected = "\
├── src
│   ├── lib.rs
│   └── sub
│       └── mod.rs
└── README.md";
        assert_eq!(render_tree(&entries), expected);
    }

    #[test]
    fn closed_ancestors_indent_with_spaces() {
        let entries = [
            dir("outer"),
            dir("outer/inner"),
            file("outer/inner/deep.txt"),
        ];
        let expected = "\
└── outer
    └── inner
        └── deep.txt";
        assert_eq!(render_tree(&entries), expected);
    }

    #[test]
    fn empty_directory_is_a_leaf() {
        let entries = [dir("empty"), file("z.txt")];
        assert_eq!(render_tree(&entries), "├── empty\n└── z.txt");
    }
}
