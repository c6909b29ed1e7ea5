//! Help rendering for clap commands.
//!
//! clap lays out the help screen; this module only colors it. The plain
//! layout is taken from [`Command::render_help`], the command's vocabulary
//! from [`collect_keywords`], and both go through
//! [`highlight_help`](tinthelp_render::highlight_help).

use clap::Command;
use tinthelp_render::{highlight_help, HelpTheme};

use super::keywords::collect_keywords;

/// Renders the help screen of `cmd` styled with `theme`.
pub fn render_help(cmd: &Command, theme: &HelpTheme) -> String {
    let mut cmd = cmd.clone();
    cmd.build();
    styled_help(&mut cmd, theme)
}

/// Renders the help screen of the subcommand reached by `path` from `root`.
///
/// Returns `None` if a path element names no subcommand. An empty path
/// renders the root.
pub fn render_help_for(root: &Command, path: &[&str], theme: &HelpTheme) -> Option<String> {
    let mut root = root.clone();
    root.build();

    let mut cmd = &mut root;
    for name in path {
        cmd = cmd.find_subcommand_mut(name)?;
    }
    Some(styled_help(cmd, theme))
}

fn styled_help(cmd: &mut Command, theme: &HelpTheme) -> String {
    // Display of clap's styled string drops its own styling.
    let plain = cmd.render_help().to_string();
    let keywords = collect_keywords(cmd);
    highlight_help(&plain, &keywords, theme)
}
