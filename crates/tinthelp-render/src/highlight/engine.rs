//! Keyword highlighting of rendered help screens.
//!
//! [`highlight_help`] takes plain help text, as laid out by the argument
//! parser, and runs an ordered list of regex rewrites over it. Every rewrite
//! sees the output of the previous one, so the order matters: passes that
//! look for structure (parentheses, brackets, indentation) run before the
//! loose keyword passes, and escape sequences inserted by early passes never
//! satisfy the context a later pass requires.
//!
//! Each pattern is fully covered by its capture groups. Named groups are
//! styled with the role they map to; unnamed groups are context and are
//! copied back verbatim. With a plain theme the output is byte-identical to
//! the input.
//!
//! This is regex-based and not bullet-proof, which is fine for text meant
//! for humans.

use regex::{Captures, Regex};

use super::keywords::{reverse_sorted, KeywordSet};
use crate::theme::{HelpTheme, Role};

/// Escapes `text` for use in a help-screen pattern.
///
/// Like [`regex::escape`], but any run of blank characters (including line
/// breaks) is tolerated after a dash, since wrapping and column alignment
/// may split a keyword there.
pub fn escape_for_help_screen(text: &str) -> String {
    regex::escape(text).replace('-', r"-\s*")
}

/// Highlights the vocabulary of `keywords` inside `help_text`.
///
/// Absent keywords are not an error: a rewrite that finds nothing leaves
/// the text unchanged.
///
/// # Example
///
/// ```rust
/// use tinthelp_render::{highlight_help, HelpTheme, KeywordSet, Role, RoleStyle};
///
/// let mut keywords = KeywordSet::new();
/// keywords.add_option("--verbose");
///
/// let theme = HelpTheme::new().with(Role::Option, RoleStyle::custom(|s| format!("<{s}>")));
/// let out = highlight_help("  --verbose  Talk more.\n", &keywords, &theme);
/// assert_eq!(out, "  <--verbose>  Talk more.\n");
/// ```
pub fn highlight_help(help_text: &str, keywords: &KeywordSet, theme: &HelpTheme) -> String {
    if theme.is_plain() {
        return help_text.to_string();
    }

    tracing::trace!(
        long_options = keywords.long_options.len(),
        short_options = keywords.short_options.len(),
        choices = keywords.choices.len(),
        metavars = keywords.metavars.len(),
        "highlighting help screen"
    );

    // Deprecation labels, however they are capitalized.
    let mut text = rewrite(help_text, r"(?i)(\s)(?P<warning>\(DEPRECATED\))", theme);

    for alias in reverse_sorted(&keywords.command_aliases) {
        let alias = regex::escape(alias);
        // `  name (alias1, alias2)  ...`
        text = rewrite(
            &text,
            &format!(r"(  \S+ \(.*)(?P<command_alias>{alias})(.*\))"),
            theme,
        );
        // `  name  help text [alias: alias1]` or `[aliases: alias1, alias2]`
        text = rewrite(
            &text,
            &format!(
                r"(  \S+\s.*\[alias(?:es)?:(?:[^\]\n]*,)? )(?P<command_alias>{alias})((?:,[^\]\n]*)?\])"
            ),
            theme,
        );
    }

    for subcommand in reverse_sorted(&keywords.subcommands) {
        let subcommand = regex::escape(subcommand);
        text = rewrite(
            &text,
            &format!(r"(  )(?P<subcommand>{subcommand})(\s)"),
            theme,
        );
    }

    // The value may span lines but never crosses a closing bracket. clap
    // separates the annotation from the help text by a single blank.
    text = rewrite(
        &text,
        r"(\s)(?P<default_start>\[default:\s+)(?P<default_value>[^\]]+?)(?P<default_end>\])",
        theme,
    );

    for cli_name in reverse_sorted(&keywords.cli_names) {
        let cli_name = regex::escape(cli_name);
        text = rewrite(
            &text,
            &format!(r"(\s)(?P<invoked_command>{cli_name})(\s)"),
            theme,
        );
    }

    for (category, group) in [
        (&keywords.long_options, "long_option"),
        (&keywords.short_options, "short_option"),
        (&keywords.choices, "choice"),
        (&keywords.metavars, "metavar"),
    ] {
        for keyword in reverse_sorted(category) {
            let keyword = escape_for_help_screen(keyword);
            // Keywords follow a blank, `[`, `|` or `(` and end on a non-word
            // character.
            text = rewrite(
                &text,
                &format!(r"([\s\[|(])(?P<{group}>{keyword})(\W)"),
                theme,
            );
        }
    }

    text
}

/// Maps a capture group name to the role styling it.
///
/// Groups named after a role use that role. An unmapped group is a bug in
/// the pass definitions, not a runtime condition.
fn role_for_group(group: &str) -> Role {
    match group {
        "default_start" | "default_end" => Role::Metavar,
        "default_value" => Role::Choice,
        "subcommand" | "command_alias" | "long_option" | "short_option" => Role::Option,
        other => other
            .parse()
            .unwrap_or_else(|_| panic!("no theme role bound to capture group `{other}`")),
    }
}

/// Rebuilds a match from its groups, styling the named ones.
fn colorize(caps: &Captures<'_>, names: &[Option<&str>], theme: &HelpTheme) -> String {
    let mut styled = String::new();
    for (index, name) in names.iter().enumerate().skip(1) {
        let Some(group) = caps.get(index) else {
            continue;
        };
        match name {
            Some(name) => styled.push_str(&theme.apply(role_for_group(name), group.as_str())),
            None => styled.push_str(group.as_str()),
        }
    }
    styled
}

/// Applies one rewrite over the whole text.
fn rewrite(text: &str, pattern: &str, theme: &HelpTheme) -> String {
    let re = match Regex::new(pattern) {
        Ok(re) => re,
        Err(err) => {
            tracing::warn!(%pattern, %err, "skipping help highlighting pattern");
            return text.to_string();
        }
    };
    let names: Vec<Option<&str>> = re.capture_names().collect();
    re.replace_all(text, |caps: &Captures<'_>| colorize(caps, &names, theme))
        .into_owned()
}
