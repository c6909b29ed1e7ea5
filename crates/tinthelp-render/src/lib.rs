//! # Tinthelp Render - Keyword Highlighting for Help Screens
//!
//! `tinthelp-render` post-processes help text that has already been laid out
//! by an argument parser. It knows nothing about the parser itself: callers
//! hand it the plain text, a [`KeywordSet`] describing the command's
//! vocabulary, and a [`HelpTheme`].
//!
//! ## Core Concepts
//!
//! - [`Role`]: Fixed set of text categories (option, choice, metavar, ...)
//! - [`HelpTheme`]: Immutable binding of every role to a [`RoleStyle`]
//! - [`KeywordSet`]: Categorized vocabulary of one command
//! - [`highlight_help`]: Ordered regex passes styling that vocabulary
//! - [`highlight`]: Generic substring highlighter handling overlaps
//! - [`RenderContext`](context::RenderContext): Invocation-scoped color flag
//!
//! ## Quick Start
//!
//! ```rust
//! use tinthelp_render::{highlight_help, HelpTheme, KeywordSet};
//!
//! let mut keywords = KeywordSet::new();
//! keywords.add_option("--verbose");
//! keywords.add_option("-v");
//!
//! let help = "Options:\n  -v, --verbose  Talk more.\n";
//! let styled = highlight_help(help, &keywords, HelpTheme::default_theme());
//!
//! // Styling only ever inserts escape sequences.
//! assert_eq!(tinthelp_render::strip_styles(&styled), help);
//! ```
//!
//! ## No Color
//!
//! [`HelpTheme::no_color`] binds every role to identity, and rendering with
//! it returns the input byte for byte.

pub mod context;
mod error;
pub mod highlight;
pub mod theme;

pub use error::ThemeError;
pub use highlight::{
    escape_for_help_screen, highlight, highlight_help, highlight_ranges, HighlightRange,
    KeywordSet,
};
pub use theme::{ko_mark, ok_mark, HelpTheme, Role, RoleStyle};

/// Removes ANSI escape sequences from `text`.
pub fn strip_styles(text: &str) -> String {
    console::strip_ansi_codes(text).into_owned()
}
