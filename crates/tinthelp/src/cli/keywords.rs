//! Keyword collection from clap commands.

use clap::{Arg, Command};
use tinthelp_render::KeywordSet;

/// Harvests the vocabulary of `cmd` for highlighting its help screen.
///
/// Only `cmd` and its direct children are inspected: the help screen of a
/// command lists its own arguments and the names of its subcommands, not
/// their contents. Call [`Command::build`] on the root first so subcommands
/// know their full invocation path.
pub fn collect_keywords(cmd: &Command) -> KeywordSet {
    let mut keywords = KeywordSet::new();

    keywords.cli_names.insert(command_path(cmd).to_string());
    keywords.metavars.extend(usage_pieces(cmd));

    for sub in cmd.get_subcommands() {
        keywords.subcommands.insert(sub.get_name().to_string());
        keywords
            .command_aliases
            .extend(sub.get_visible_aliases().map(String::from));
    }

    for arg in cmd.get_arguments() {
        for short in arg.get_short_and_visible_aliases().unwrap_or_default() {
            keywords.add_option(format!("-{short}"));
        }
        for long in arg.get_long_and_visible_aliases().unwrap_or_default() {
            keywords.add_option(format!("--{long}"));
        }

        if arg.get_action().takes_values() {
            keywords.choices.extend(
                arg.get_possible_values()
                    .iter()
                    .filter(|value| !value.is_hide_set())
                    .map(|value| value.get_name().to_string()),
            );
        }

        keywords.metavars.extend(metavars(arg));
    }

    tracing::trace!(command = command_path(cmd), ?keywords, "collected keywords");
    keywords
}

/// Full invocation path, e.g. `"git remote add"`.
pub fn command_path(cmd: &Command) -> &str {
    cmd.get_bin_name().unwrap_or_else(|| cmd.get_name())
}

/// The placeholders clap prints in the usage line itself.
fn usage_pieces(cmd: &Command) -> Vec<String> {
    let mut pieces = Vec::new();

    if cmd.get_arguments().any(|arg| !arg.is_positional()) {
        pieces.push("[OPTIONS]".to_string());
    }

    if cmd.has_subcommands() {
        let name = cmd.get_subcommand_value_name().unwrap_or("COMMAND");
        if cmd.is_subcommand_required_set() {
            pieces.push(format!("<{name}>"));
        } else {
            pieces.push(format!("[{name}]"));
        }
    }

    pieces
}

/// Value placeholders of one argument, as clap renders them.
///
/// Options show `<NAME>`; positionals show `<NAME>` when required and
/// `[NAME]` otherwise. Arguments taking several values also get the
/// `...` suffixed spelling. Flags have none.
fn metavars(arg: &Arg) -> Vec<String> {
    if !arg.get_action().takes_values() {
        return Vec::new();
    }

    let names: Vec<String> = match arg.get_value_names() {
        Some(names) => names.iter().map(|name| name.to_string()).collect(),
        None => vec![arg.get_id().to_string()],
    };

    let (open, close) = if arg.is_positional() && !arg.is_required_set() {
        ('[', ']')
    } else {
        ('<', '>')
    };

    let repeated = arg
        .get_num_args()
        .is_some_and(|range| range.max_values() > 1);

    let mut placeholders = Vec::new();
    for name in names {
        let placeholder = format!("{open}{name}{close}");
        if repeated {
            placeholders.push(format!("{placeholder}..."));
        }
        placeholders.push(placeholder);
    }
    placeholders
}
