//! Logging setup driven by `--verbosity`.
//!
//! Each invocation installs its own subscriber as the thread's default and
//! drops it on exit, so the level and coloring chosen for one invocation
//! never leak into the next.

use std::fmt;
use std::str::FromStr;

use clap::builder::PossibleValuesParser;
use clap::Arg;
use tracing::subscriber::DefaultGuard;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Accepted `--verbosity` levels, from quietest to loudest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Critical,
    Error,
    Warning,
    #[default]
    Info,
    Debug,
}

impl Verbosity {
    pub const ALL: [Verbosity; 5] = [
        Verbosity::Critical,
        Verbosity::Error,
        Verbosity::Warning,
        Verbosity::Info,
        Verbosity::Debug,
    ];

    /// The level name as accepted on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Verbosity::Critical => "CRITICAL",
            Verbosity::Error => "ERROR",
            Verbosity::Warning => "WARNING",
            Verbosity::Info => "INFO",
            Verbosity::Debug => "DEBUG",
        }
    }

    /// Maximum `tracing` level emitted at this verbosity.
    ///
    /// `tracing` has nothing above `ERROR`, so `CRITICAL` shares it.
    pub fn level(self) -> Level {
        match self {
            Verbosity::Critical | Verbosity::Error => Level::ERROR,
            Verbosity::Warning => Level::WARN,
            Verbosity::Info => Level::INFO,
            Verbosity::Debug => Level::DEBUG,
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown verbosity level.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown verbosity level `{0}`, expected one of CRITICAL, ERROR, WARNING, INFO, DEBUG")]
pub struct UnknownVerbosity(pub String);

impl FromStr for Verbosity {
    type Err = UnknownVerbosity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verbosity::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownVerbosity(s.to_string()))
    }
}

/// Builds the global `--verbosity LEVEL` argument with the given id.
pub fn verbosity_arg(id: &'static str) -> Arg {
    Arg::new(id)
        .long("verbosity")
        .value_name("LEVEL")
        .global(true)
        .ignore_case(true)
        .value_parser(PossibleValuesParser::new(Verbosity::ALL.map(Verbosity::name)))
        .default_value(Verbosity::default().name())
        .help("Either CRITICAL, ERROR, WARNING, INFO or DEBUG.")
}

/// Installs a stderr subscriber for the current thread until the guard
/// drops.
pub fn scoped_subscriber(verbosity: Verbosity, ansi: bool) -> DefaultGuard {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(verbosity.level())
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(ansi)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_default(subscriber)
}
