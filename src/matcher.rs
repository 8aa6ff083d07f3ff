//! Exclusion pattern compilation and matching.
//!
//! Rules are glob patterns evaluated in order against root-relative,
//! slash-separated paths; the *last* matching rule decides. A pattern with
//! no separator matches the basename at any depth (`.git` hits every entry
//! named `.git`); a pattern containing a separator is anchored at the root,
//! as is a pattern written with a leading `/`. A trailing `/` restricts a
//! rule to directories. `*` and `?` never cross a separator. A leading `!`
//! negates the rule: paths it matches are kept even if an earlier rule
//! excluded them.
//!
//! Negation cannot reach into pruned directories: the walker never descends
//! into an excluded directory, so `!cache/keep.txt` does nothing when
//! `cache` itself is excluded. That limitation is deliberate and tested.

use crate::error::TreecatError;
use globset::{GlobBuilder, GlobSet, GlobSetBuilder};

/// One parsed exclusion rule, in the order it was supplied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ExclusionRule {
    pattern: String,
    negated: bool,
    dir_only: bool,
    anchored: bool,
}

impl ExclusionRule {
    /// Parses one pattern line. Returns `None` for patterns that are empty
    /// once the `!`, `/`-anchor, and trailing-`/` markers are stripped.
    pub(crate) fn parse(raw: &str) -> Option<ExclusionRule> {
        let (negated, rest) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        let (anchored, rest) = match rest.strip_prefix('/') {
            Some(rest) => (true, rest),
            None => (false, rest),
        };
        let trimmed = rest.trim_end_matches('/');
        let dir_only = trimmed.len() < rest.len();
        if trimmed.is_empty() {
            return None;
        }
        Some(ExclusionRule {
            pattern: trimmed.to_string(),
            negated,
            dir_only,
            anchored,
        })
    }

    /// The glob actually compiled: basename rules get a `**/` prefix so they
    /// match at any depth.
    fn glob_text(&self) -> String {
        if self.anchored || self.pattern.contains('/') {
            self.pattern.clone()
        } else {
            format!("**/{}", self.pattern)
        }
    }
}

/// Compiled, ordered exclusion rules.
///
/// `GlobSet::matches` reports matching globs in the order they were added,
/// so the highest matching index is the last rule, and the last rule wins.
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    set: GlobSet,
    rules: Vec<ExclusionRule>,
}

impl PatternMatcher {
    /// Compiles an ordered pattern list. Empty patterns are dropped; an
    /// invalid glob is fatal.
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<PatternMatcher, TreecatError> {
        let rules: Vec<ExclusionRule> = patterns
            .iter()
            .filter_map(|p| ExclusionRule::parse(p.as_ref()))
            .collect();
        let mut builder = GlobSetBuilder::new();
        for rule in &rules {
            let glob = GlobBuilder::new(&rule.glob_text())
                .literal_separator(true)
                .build()
                .map_err(|source| TreecatError::InvalidPattern {
                    pattern: rule.pattern.clone(),
                    source,
                })?;
            builder.add(glob);
        }
        let set = builder
            .build()
            .map_err(|source| TreecatError::InvalidPattern {
                // A set-level failure has no single culprit; name them all.
                pattern: rules
                    .iter()
                    .map(|rule| rule.pattern.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
                source,
            })?;
        Ok(PatternMatcher { set, rules })
    }

    /// Decides whether a root-relative path survives the rule list.
    pub fn included(&self, relative_path: &str, is_dir: bool) -> bool {
        let matched = self.set.matches(relative_path);
        for &idx in matched.iter().rev() {
            let rule = &self.rules[idx];
            if rule.dir_only && !is_dir {
                continue;
            }
            return rule.negated;
        }
        true
    }
}
