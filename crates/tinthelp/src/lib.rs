//! # Tinthelp - Colorized Help Screens for clap
//!
//! Tinthelp colors the help screens of clap applications: invoked command
//! names, subcommands, aliases, options, choices, metavars and default
//! values each get the style of their role in a [`HelpTheme`]. The layout
//! stays clap's; only ANSI escape sequences are inserted, and with colors
//! off the output is byte for byte what clap printed.
//!
//! Whether colors are on follows `--color`/`--no-color` first, then the
//! usual environment conventions (`NO_COLOR`, `FORCE_COLOR`, `CLICOLOR`, ...),
//! then the default.
//!
//! ## Crates
//!
//! - `tinthelp-render`: the parser-agnostic highlighting engine, re-exported
//!   here
//! - `tinthelp`: clap integration ([`cli`]), logging setup ([`logging`]) and
//!   process helpers ([`run`])
//! - `tinthelp-test`: in-process test harness
//!
//! ## Example
//!
//! ```rust
//! use clap::{Arg, Command};
//! use tinthelp::cli::render_help;
//! use tinthelp::{strip_styles, HelpTheme};
//!
//! let cmd = Command::new("app").arg(Arg::new("verbose").long("verbose").action(clap::ArgAction::SetTrue));
//! let styled = render_help(&cmd, HelpTheme::default_theme());
//! let plain = render_help(&cmd, HelpTheme::no_color());
//! assert_eq!(strip_styles(&styled), plain);
//! ```

pub mod cli;
pub mod logging;
pub mod run;

pub use tinthelp_render::context::{ColorScope, RenderContext};
pub use tinthelp_render::{
    escape_for_help_screen, highlight, highlight_help, highlight_ranges, ko_mark, ok_mark,
    strip_styles, HelpTheme, HighlightRange, KeywordSet, Role, RoleStyle, ThemeError,
};
