//! Categorized vocabulary of a command's interface.

use std::collections::BTreeSet;

/// The keywords of one command, grouped by how they should be highlighted.
///
/// Built fresh for every help rendering and never mutated afterwards. A
/// string may appear in more than one category; the highlighter decides
/// precedence through the order of its passes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordSet {
    /// Full invocation paths, e.g. `"git remote"`.
    pub cli_names: BTreeSet<String>,
    /// Names of direct subcommands.
    pub subcommands: BTreeSet<String>,
    /// Aliases of direct subcommands.
    pub command_aliases: BTreeSet<String>,
    /// Option spellings longer than two characters.
    pub long_options: BTreeSet<String>,
    /// Option spellings of at most two characters.
    pub short_options: BTreeSet<String>,
    /// Enumerated values accepted by arguments.
    pub choices: BTreeSet<String>,
    /// Value placeholders and usage pieces.
    pub metavars: BTreeSet<String>,
}

impl KeywordSet {
    /// Creates an empty keyword set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files an option spelling under short or long options.
    ///
    /// Anything up to two characters counts as short (`-v`, `/d`, `+w`);
    /// everything else is long (`--debug`, `-otest`, `/debug`). Some exotic
    /// spellings end up misfiled, which is accepted.
    pub fn add_option(&mut self, spelling: impl Into<String>) {
        let spelling = spelling.into();
        if spelling.chars().count() <= 2 {
            self.short_options.insert(spelling);
        } else {
            self.long_options.insert(spelling);
        }
    }

    /// Returns true if no category holds any keyword.
    pub fn is_empty(&self) -> bool {
        self.cli_names.is_empty()
            && self.subcommands.is_empty()
            && self.command_aliases.is_empty()
            && self.long_options.is_empty()
            && self.short_options.is_empty()
            && self.choices.is_empty()
            && self.metavars.is_empty()
    }
}

/// Returns the keywords in reverse lexicographic order.
///
/// A keyword always sorts after its own prefixes, so reversing puts
/// `--verbose-all` ahead of `--verbose`.
pub(crate) fn reverse_sorted(keywords: &BTreeSet<String>) -> impl Iterator<Item = &str> {
    keywords.iter().rev().map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_option_classification() {
        let mut set = KeywordSet::new();
        for spelling in ["-v", "/d", "+w", "f_", "--debug", "-otest", "/debug", "---x"] {
            set.add_option(spelling);
        }

        let short: Vec<_> = set.short_options.iter().map(String::as_str).collect();
        assert_eq!(short, vec!["+w", "-v", "/d", "f_"]);
        assert!(set.long_options.contains("--debug"));
        assert!(set.long_options.contains("-otest"));
        assert!(set.long_options.contains("/debug"));
        assert!(set.long_options.contains("---x"));
    }

    #[test]
    fn test_is_empty() {
        let mut set = KeywordSet::new();
        assert!(set.is_empty());
        set.metavars.insert("[OPTIONS]".into());
        assert!(!set.is_empty());
    }

    #[test]
    fn test_reverse_sorted_puts_longer_first() {
        let keywords: BTreeSet<String> = ["--verbose", "--verbose-all", "--color"]
            .into_iter()
            .map(String::from)
            .collect();
        let order: Vec<_> = reverse_sorted(&keywords).collect();
        assert_eq!(order, vec!["--verbose-all", "--verbose", "--color"]);
    }
}
