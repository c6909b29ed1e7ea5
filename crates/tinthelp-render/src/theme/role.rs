//! The fixed set of roles a help theme styles.

use std::fmt;
use std::str::FromStr;

use crate::error::ThemeError;

/// A named category of help-screen text.
///
/// The first eight roles mirror the sections a help formatter knows about
/// (headings, column text, epilog). The log-level roles style messages
/// emitted next to help output. The remaining roles are the fine-grained
/// keyword categories the highlighter recognizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    InvokedCommand,
    CommandHelp,
    Heading,
    Constraint,
    SectionHelp,
    Col1,
    Col2,
    Epilog,
    Critical,
    Error,
    Warning,
    Info,
    Debug,
    Subheading,
    Option,
    Choice,
    Metavar,
    Search,
    Success,
}

impl Role {
    /// Every role, in declaration order.
    pub const ALL: [Role; 19] = [
        Role::InvokedCommand,
        Role::CommandHelp,
        Role::Heading,
        Role::Constraint,
        Role::SectionHelp,
        Role::Col1,
        Role::Col2,
        Role::Epilog,
        Role::Critical,
        Role::Error,
        Role::Warning,
        Role::Info,
        Role::Debug,
        Role::Subheading,
        Role::Option,
        Role::Choice,
        Role::Metavar,
        Role::Search,
        Role::Success,
    ];

    /// Number of roles.
    pub const COUNT: usize = Self::ALL.len();

    /// The snake_case name used in configuration files and capture groups.
    pub fn name(self) -> &'static str {
        match self {
            Role::InvokedCommand => "invoked_command",
            Role::CommandHelp => "command_help",
            Role::Heading => "heading",
            Role::Constraint => "constraint",
            Role::SectionHelp => "section_help",
            Role::Col1 => "col1",
            Role::Col2 => "col2",
            Role::Epilog => "epilog",
            Role::Critical => "critical",
            Role::Error => "error",
            Role::Warning => "warning",
            Role::Info => "info",
            Role::Debug => "debug",
            Role::Subheading => "subheading",
            Role::Option => "option",
            Role::Choice => "choice",
            Role::Metavar => "metavar",
            Role::Search => "search",
            Role::Success => "success",
        }
    }

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Role {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .iter()
            .copied()
            .find(|role| role.name() == s)
            .ok_or_else(|| ThemeError::UnknownRole(s.to_string()))
    }
}
