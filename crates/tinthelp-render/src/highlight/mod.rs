//! Highlighting of help screens and arbitrary strings.
//!
//! - [`highlight_help`]: ordered regex passes over rendered help text,
//!   driven by a [`KeywordSet`]
//! - [`highlight`]: generic substring highlighter with overlap resolution

mod engine;
mod keywords;
mod ranges;

pub use engine::{escape_for_help_screen, highlight_help};
pub use keywords::KeywordSet;
pub use ranges::{highlight, highlight_ranges, HighlightRange};
