//! Color-mode resolution.
//!
//! Whether help and log output is colored depends on three inputs, in this
//! order of precedence:
//!
//! 1. An explicit `--color`/`--no-color` flag on the command line always wins.
//! 2. Otherwise, any recognized color variable present in the environment
//!    decides: one enabling vote is enough to turn colors on.
//! 3. Otherwise the default (or configured) value is used unchanged.
//!
//! Recognized variables and their polarity are listed in [`COLOR_ENV_VARS`].

use super::env::EnvReader;

/// Environment variables that switch colors on (`true`) or off (`false`).
///
/// See <https://github.com/pallets/click/issues/558> for the zoo of
/// conventions in the wild.
pub const COLOR_ENV_VARS: [(&str, bool); 12] = [
    ("COLOR", true),
    ("COLORS", true),
    ("CLICOLOR", true),
    ("CLICOLORS", true),
    ("FORCE_COLOR", true),
    ("FORCE_COLORS", true),
    ("CLICOLOR_FORCE", true),
    ("CLICOLORS_FORCE", true),
    ("NOCOLOR", false),
    ("NOCOLORS", false),
    ("NO_COLOR", false),
    ("NO_COLORS", false),
];

/// Where the explicit color value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Passed as a flag on the command line.
    CommandLine,
    /// Read from an environment variable bound to the argument.
    Environment,
    /// Read from a configuration file.
    ConfigFile,
    /// The argument's own default.
    Default,
}

impl ValueSource {
    /// Whether color variables in the environment may override this value.
    pub fn yields_to_environment(self) -> bool {
        matches!(self, ValueSource::Default | ValueSource::ConfigFile)
    }
}

impl From<clap::parser::ValueSource> for ValueSource {
    fn from(source: clap::parser::ValueSource) -> Self {
        match source {
            clap::parser::ValueSource::CommandLine => ValueSource::CommandLine,
            clap::parser::ValueSource::EnvVariable => ValueSource::Environment,
            _ => ValueSource::Default,
        }
    }
}

/// Origin of a resolved color decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    ExplicitFlag,
    Environment,
    Default,
}

/// Outcome of color resolution for one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorDecision {
    pub enabled: bool,
    pub provenance: Provenance,
}

/// Normalizes an environment variable value to a boolean.
///
/// Matches `1/yes/true/on` and `0/no/false/off` case-insensitively. Any other
/// value, including an empty one, counts as true: the variable being set at
/// all is a request for its effect.
pub fn parse_env_bool(value: &str) -> bool {
    match value.to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => true,
        "0" | "no" | "false" | "off" => false,
        _ => true,
    }
}

/// Collects the vote of every recognized color variable present in `env`.
pub fn env_color_votes(env: &dyn EnvReader) -> Vec<bool> {
    COLOR_ENV_VARS
        .iter()
        .filter_map(|&(name, polarity)| {
            let value = env.var(name)?;
            let vote = parse_env_bool(&value) == polarity;
            tracing::debug!(var = name, value = %value, vote, "found color environment variable");
            Some(vote)
        })
        .collect()
}

/// Resolves whether colors are enabled.
///
/// `explicit` is the value of the color flag as parsed, `source` where it
/// came from.
pub fn resolve_color(explicit: bool, source: ValueSource, env: &dyn EnvReader) -> ColorDecision {
    let votes = env_color_votes(env);

    if !votes.is_empty() && source.yields_to_environment() {
        return ColorDecision {
            enabled: votes.contains(&true),
            provenance: Provenance::Environment,
        };
    }

    let provenance = match source {
        ValueSource::Default => Provenance::Default,
        _ => Provenance::ExplicitFlag,
    };
    ColorDecision {
        enabled: explicit,
        provenance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::env::MockEnv;

    #[test]
    fn test_parse_env_bool() {
        for truthy in ["1", "yes", "TRUE", "On", "", "whatever"] {
            assert!(parse_env_bool(truthy), "{truthy:?}");
        }
        for falsy in ["0", "no", "False", "OFF"] {
            assert!(!parse_env_bool(falsy), "{falsy:?}");
        }
    }

    #[test]
    fn test_no_env_keeps_default() {
        let decision = resolve_color(true, ValueSource::Default, &MockEnv::new());
        assert_eq!(
            decision,
            ColorDecision {
                enabled: true,
                provenance: Provenance::Default
            }
        );
    }

    #[test]
    fn test_no_color_overrides_default() {
        let env = MockEnv::new().with_var("NO_COLOR", "1");
        let decision = resolve_color(true, ValueSource::Default, &env);
        assert!(!decision.enabled);
        assert_eq!(decision.provenance, Provenance::Environment);
    }

    #[test]
    fn test_flag_beats_environment() {
        let env = MockEnv::new().with_var("NO_COLOR", "1");
        let decision = resolve_color(true, ValueSource::CommandLine, &env);
        assert!(decision.enabled);
        assert_eq!(decision.provenance, Provenance::ExplicitFlag);
    }

    #[test]
    fn test_no_color_flag_beats_force_color() {
        let env = MockEnv::new().with_var("FORCE_COLOR", "1");
        let decision = resolve_color(false, ValueSource::CommandLine, &env);
        assert!(!decision.enabled);
    }

    #[test]
    fn test_config_file_yields_to_environment() {
        let env = MockEnv::new().with_var("CLICOLOR_FORCE", "yes");
        let decision = resolve_color(false, ValueSource::ConfigFile, &env);
        assert!(decision.enabled);
        assert_eq!(decision.provenance, Provenance::Environment);
    }

    #[test]
    fn test_falsy_value_inverts_polarity() {
        let env = MockEnv::new().with_var("NO_COLOR", "false");
        assert!(resolve_color(false, ValueSource::Default, &env).enabled);

        let env = MockEnv::new().with_var("COLOR", "off");
        assert!(!resolve_color(true, ValueSource::Default, &env).enabled);
    }

    #[test]
    fn test_any_enabling_vote_wins() {
        let env = MockEnv::new()
            .with_var("NO_COLOR", "1")
            .with_var("FORCE_COLOR", "1");
        assert!(resolve_color(false, ValueSource::Default, &env).enabled);
    }

    #[test]
    fn test_empty_value_counts_as_set() {
        let env = MockEnv::new().with_var("NO_COLOR", "");
        assert!(!resolve_color(true, ValueSource::Default, &env).enabled);
    }

    #[test]
    fn test_unrecognized_variables_ignored() {
        let env = MockEnv::new().with_var("TERM_COLOR", "0");
        let decision = resolve_color(true, ValueSource::Default, &env);
        assert!(decision.enabled);
        assert_eq!(decision.provenance, Provenance::Default);
    }

    #[test]
    fn test_votes_follow_table_order() {
        let env = MockEnv::new()
            .with_var("NO_COLORS", "1")
            .with_var("COLOR", "1");
        assert_eq!(env_color_votes(&env), vec![true, false]);
    }

    #[test]
    fn test_value_source_from_clap() {
        assert_eq!(
            ValueSource::from(clap::parser::ValueSource::CommandLine),
            ValueSource::CommandLine
        );
        assert_eq!(
            ValueSource::from(clap::parser::ValueSource::DefaultValue),
            ValueSource::Default
        );
        assert!(ValueSource::from(clap::parser::ValueSource::DefaultValue).yields_to_environment());
        assert!(!ValueSource::CommandLine.yields_to_environment());
        assert!(!ValueSource::Environment.yields_to_environment());
    }
}
