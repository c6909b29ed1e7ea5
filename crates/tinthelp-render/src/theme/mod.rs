//! Help themes.
//!
//! A theme maps each [`Role`] (heading, option, choice, metavar, ...) to a
//! [`RoleStyle`]. Two constants exist for the whole process: the populated
//! [`HelpTheme::default_theme`] and the all-identity [`HelpTheme::no_color`]
//! which guarantees byte-identical output when colors are off.
//!
//! Partial overrides can be supplied programmatically or as YAML:
//!
//! ```yaml
//! option: green.bold
//! choice: magenta
//! metavar: none      # identity
//! ```

mod role;
#[allow(clippy::module_inception)]
mod theme;

pub use role::Role;
pub use theme::{ko_mark, ok_mark, HelpTheme, RoleStyle};
