//! Help themes: one styling function per role.
//!
//! A [`HelpTheme`] binds every [`Role`] to a [`RoleStyle`]. Unbound roles
//! fall back to [`RoleStyle::Identity`], so looking up a role never fails.
//! Themes are immutable values; deriving a variant goes through
//! [`with`](HelpTheme::with) or [`with_overrides`](HelpTheme::with_overrides),
//! both of which return a new theme.
//!
//! # Construction Methods
//!
//! ## Programmatic
//!
//! ```rust
//! use tinthelp_render::{HelpTheme, Role, RoleStyle};
//! use console::Style;
//!
//! let theme = HelpTheme::default_theme()
//!     .with(Role::Option, Style::new().green())
//!     .with(Role::Metavar, RoleStyle::Identity);
//! ```
//!
//! ## From YAML
//!
//! Only the roles present in the document are overridden; the rest keep
//! their default bindings. Values are dotted `console` style strings.
//!
//! ```rust
//! use tinthelp_render::HelpTheme;
//!
//! let theme = HelpTheme::from_yaml(r#"
//! option: green.bold
//! metavar: none
//! "#).unwrap();
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use console::Style;
use once_cell::sync::Lazy;

use super::role::Role;
use crate::error::ThemeError;

/// A styling function bound to a role.
#[derive(Clone, Default)]
pub enum RoleStyle {
    /// Leaves text untouched.
    #[default]
    Identity,
    /// Wraps text in the ANSI sequences of a `console` style.
    Ansi(Style),
    /// Arbitrary `&str -> String` transformation.
    Custom(Arc<dyn Fn(&str) -> String + Send + Sync>),
}

impl RoleStyle {
    /// Wraps an arbitrary styling function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        RoleStyle::Custom(Arc::new(f))
    }

    /// Parses a dotted style spec such as `"cyan.bold"`.
    ///
    /// Empty strings, `"none"` and `"identity"` yield [`RoleStyle::Identity`].
    /// Whitespace is accepted as a separator in place of dots.
    pub fn from_spec(spec: &str) -> Self {
        let spec = spec.trim();
        match spec {
            "" | "none" | "identity" => RoleStyle::Identity,
            _ => {
                let dotted = spec.split_whitespace().collect::<Vec<_>>().join(".");
                RoleStyle::Ansi(Style::from_dotted_str(&dotted).force_styling(true))
            }
        }
    }

    /// Applies the style to `text`.
    pub fn apply(&self, text: &str) -> String {
        match self {
            RoleStyle::Identity => text.to_string(),
            RoleStyle::Ansi(style) => style.apply_to(text).to_string(),
            RoleStyle::Custom(f) => f(text),
        }
    }

    /// Returns true if the style leaves text untouched.
    pub fn is_identity(&self) -> bool {
        matches!(self, RoleStyle::Identity)
    }
}

impl fmt::Debug for RoleStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleStyle::Identity => f.write_str("Identity"),
            RoleStyle::Ansi(style) => f.debug_tuple("Ansi").field(style).finish(),
            RoleStyle::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<Style> for RoleStyle {
    fn from(style: Style) -> Self {
        RoleStyle::Ansi(style.force_styling(true))
    }
}

impl From<&str> for RoleStyle {
    fn from(spec: &str) -> Self {
        RoleStyle::from_spec(spec)
    }
}

static DEFAULT_THEME: Lazy<HelpTheme> = Lazy::new(|| {
    HelpTheme::named("default")
        .with(Role::InvokedCommand, Style::new().white().bright())
        .with(Role::Heading, Style::new().blue().bright().bold())
        .with(Role::Constraint, Style::new().magenta())
        // col1 stays neutral, option styling handles separators finer.
        .with(Role::Col1, RoleStyle::Identity)
        .with(Role::Critical, Style::new().red())
        .with(Role::Error, Style::new().red())
        .with(Role::Warning, Style::new().yellow())
        .with(Role::Info, RoleStyle::Identity)
        .with(Role::Debug, Style::new().blue())
        .with(Role::Subheading, Style::new().blue())
        .with(Role::Option, Style::new().cyan())
        .with(Role::Choice, Style::new().magenta())
        .with(Role::Metavar, Style::new().black().bright())
        .with(Role::Search, Style::new().green().bold())
        .with(Role::Success, Style::new().green())
});

static NO_COLOR_THEME: Lazy<HelpTheme> = Lazy::new(|| HelpTheme::named("nocolor"));

static OK_MARK: Lazy<String> = Lazy::new(|| HelpTheme::default_theme().apply(Role::Success, "✓"));
static KO_MARK: Lazy<String> = Lazy::new(|| HelpTheme::default_theme().apply(Role::Error, "✘"));

/// Pre-rendered success mark.
pub fn ok_mark() -> &'static str {
    &OK_MARK
}

/// Pre-rendered failure mark.
pub fn ko_mark() -> &'static str {
    &KO_MARK
}

/// An immutable binding of every [`Role`] to a [`RoleStyle`].
#[derive(Debug, Clone)]
pub struct HelpTheme {
    name: Option<String>,
    styles: [RoleStyle; Role::COUNT],
}

impl HelpTheme {
    /// Creates a theme with every role bound to identity.
    pub fn new() -> Self {
        Self {
            name: None,
            styles: std::array::from_fn(|_| RoleStyle::Identity),
        }
    }

    /// Creates an all-identity theme with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new()
        }
    }

    /// The populated process-wide default theme.
    pub fn default_theme() -> &'static HelpTheme {
        &DEFAULT_THEME
    }

    /// The process-wide theme that leaves all text untouched.
    pub fn no_color() -> &'static HelpTheme {
        &NO_COLOR_THEME
    }

    /// Returns the theme name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns the style bound to `role`.
    pub fn style(&self, role: Role) -> &RoleStyle {
        &self.styles[role.index()]
    }

    /// Applies the style bound to `role` to `text`.
    pub fn apply(&self, role: Role, text: &str) -> String {
        self.style(role).apply(text)
    }

    /// Returns true if every role is bound to identity.
    pub fn is_plain(&self) -> bool {
        self.styles.iter().all(RoleStyle::is_identity)
    }

    /// Returns a copy of this theme with `role` rebound.
    pub fn with<S: Into<RoleStyle>>(&self, role: Role, style: S) -> Self {
        let mut theme = self.clone();
        theme.styles[role.index()] = style.into();
        theme
    }

    /// Returns a copy of this theme with each given role rebound.
    ///
    /// Roles absent from `overrides` keep their current binding. Without
    /// any override the result is an identical copy.
    pub fn with_overrides<I, S>(&self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (Role, S)>,
        S: Into<RoleStyle>,
    {
        let mut theme = self.clone();
        for (role, style) in overrides {
            theme.styles[role.index()] = style.into();
        }
        theme
    }

    /// Builds a theme from a partial YAML mapping of role name to style spec,
    /// layered over the default theme.
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] if the document does not parse or names an
    /// unknown role.
    pub fn from_yaml(yaml: &str) -> Result<Self, ThemeError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default_theme().clone());
        }
        let raw: BTreeMap<String, Option<String>> = serde_yaml::from_str(yaml)?;
        let overrides = raw
            .into_iter()
            .map(|(name, spec)| {
                let role = name.parse::<Role>()?;
                Ok((role, RoleStyle::from_spec(spec.as_deref().unwrap_or(""))))
            })
            .collect::<Result<Vec<_>, ThemeError>>()?;

        tracing::debug!(count = overrides.len(), "loaded theme overrides");
        Ok(Self::default_theme().with_overrides(overrides))
    }

    /// Loads a partial theme from a YAML file.
    ///
    /// The theme name is derived from the filename (without extension).
    ///
    /// # Errors
    ///
    /// Returns a [`ThemeError`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ThemeError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let mut theme = Self::from_yaml(&content)?;
        theme.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());
        Ok(theme)
    }
}

impl Default for HelpTheme {
    fn default() -> Self {
        Self::new()
    }
}
