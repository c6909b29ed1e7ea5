//! App struct and implementation for CLI integration.
//!
//! [`App`] wraps a user's clap [`Command`] with the global options every
//! tinthelp application shares, parses arguments, decides on colors, and
//! either prints the styled help screen or runs the handler.

use std::ffi::OsString;

use clap::{Arg, ArgAction, ArgMatches, Command};
use tinthelp_render::context::RenderContext;
use tinthelp_render::{HelpTheme, Role};

use super::color::{resolve_color, ColorDecision, ValueSource};
use super::env::{EnvReader, RealEnv};
use super::help::render_help_for;
use crate::logging::{scoped_subscriber, verbosity_arg, Verbosity};

/// Argument id of `--color` / `--ansi`.
pub const COLOR_ARG: &str = "_color";
/// Argument id of `--no-color` / `--no-ansi`.
pub const NO_COLOR_ARG: &str = "_no_color";
/// Argument id of `--help` / `-h`.
pub const HELP_ARG: &str = "_help";
/// Argument id of `--verbosity`.
pub const VERBOSITY_ARG: &str = "_verbosity";

/// Color value when neither color flag is passed.
pub const DEFAULT_COLOR: bool = true;

/// Outcome of one invocation that did not fail to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunResult {
    /// Help was requested; contains the rendered help screen.
    Help(String),
    /// The handler succeeded; contains its output.
    Handled(String),
    /// The handler failed; contains the styled error message.
    Failed(String),
}

impl RunResult {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            RunResult::Help(_) | RunResult::Handled(_) => 0,
            RunResult::Failed(_) => 1,
        }
    }

    /// Returns the output if the handler succeeded.
    pub fn output(&self) -> Option<&str> {
        match self {
            RunResult::Handled(output) => Some(output),
            _ => None,
        }
    }
}

/// Everything a handler gets to see about its invocation.
#[derive(Debug)]
pub struct Invocation<'a> {
    matches: &'a ArgMatches,
    color: ColorDecision,
    verbosity: Verbosity,
    context: &'a RenderContext,
    theme: &'a HelpTheme,
}

impl<'a> Invocation<'a> {
    /// Matches of the root command.
    pub fn matches(&self) -> &'a ArgMatches {
        self.matches
    }

    /// Matches of the innermost subcommand invoked.
    pub fn deepest_matches(&self) -> &'a ArgMatches {
        deepest_matches(self.matches)
    }

    /// Names of the subcommands invoked, outermost first.
    pub fn subcommand_path(&self) -> Vec<&'a str> {
        subcommand_path(self.matches)
    }

    pub fn color(&self) -> ColorDecision {
        self.color
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn context(&self) -> &'a RenderContext {
        self.context
    }

    /// The theme in effect: the app's theme with colors on, the no-color
    /// theme otherwise.
    pub fn theme(&self) -> &'a HelpTheme {
        self.context.theme(self.theme)
    }

    /// Styles `text` with `role` of the theme in effect.
    pub fn style(&self, role: Role, text: &str) -> String {
        self.theme().apply(role, text)
    }
}

/// Main entry point for tinthelp-clap integration.
///
/// Handles help interception, the color flags and `--verbosity`.
///
/// ```rust
/// use clap::Command;
/// use tinthelp::cli::{App, RunResult};
///
/// let app = App::new();
/// let result = app
///     .try_run_to_string(Command::new("greet"), ["greet", "--no-color"], |inv| {
///         assert!(!inv.color().enabled);
///         Ok("hello".to_string())
///     })
///     .unwrap();
/// assert_eq!(result, RunResult::Handled("hello".into()));
/// ```
pub struct App {
    theme: HelpTheme,
    env: Box<dyn EnvReader>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Creates an app with the default theme reading the real environment.
    pub fn new() -> Self {
        Self {
            theme: HelpTheme::default_theme().clone(),
            env: Box::new(RealEnv),
        }
    }

    /// Uses `theme` when colors are enabled.
    pub fn with_theme(mut self, theme: HelpTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Reads color variables from `env` instead of the process environment.
    pub fn with_env(mut self, env: impl EnvReader + 'static) -> Self {
        self.env = Box::new(env);
        self
    }

    pub fn theme(&self) -> &HelpTheme {
        &self.theme
    }

    /// Augments a clap Command with tinthelp's global options.
    ///
    /// clap's own help flag and help subcommand are replaced by a global
    /// `--help`/`-h` so help screens go through the highlighter.
    pub fn augment_command(&self, cmd: Command) -> Command {
        disable_builtin_help(cmd)
            .arg(
                Arg::new(COLOR_ARG)
                    .long("color")
                    .visible_alias("ansi")
                    .action(ArgAction::SetTrue)
                    .global(true)
                    .overrides_with(NO_COLOR_ARG)
                    .help("Keep colors and ANSI codes in output."),
            )
            .arg(
                Arg::new(NO_COLOR_ARG)
                    .long("no-color")
                    .visible_alias("no-ansi")
                    .action(ArgAction::SetTrue)
                    .global(true)
                    .overrides_with(COLOR_ARG)
                    .help("Strip out all colors and all ANSI codes from output."),
            )
            .arg(verbosity_arg(VERBOSITY_ARG))
            .arg(
                Arg::new(HELP_ARG)
                    .short('h')
                    .long("help")
                    .action(ArgAction::SetTrue)
                    .global(true)
                    .help("Show this message and exit."),
            )
    }

    /// Resolves the color decision for already parsed `matches`.
    pub fn resolve_color(&self, matches: &ArgMatches) -> ColorDecision {
        let (explicit, source) = explicit_color(deepest_matches(matches));
        resolve_color(explicit, source, self.env.as_ref())
    }

    /// Parses `args` against `cmd` and runs `handler`, returning the output
    /// instead of printing it.
    ///
    /// `--help` wins over parse errors: `app --help` works even when required
    /// arguments are missing. Any other parse error is returned.
    pub fn try_run_to_string<I, T, F>(
        &self,
        cmd: Command,
        args: I,
        handler: F,
    ) -> Result<RunResult, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(&Invocation<'_>) -> anyhow::Result<String>,
    {
        let mut cmd = self.augment_command(cmd);
        cmd.build();
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        let matches = match cmd.try_get_matches_from_mut(args.iter().cloned()) {
            Ok(matches) => matches,
            Err(err) => match cmd
                .clone()
                .ignore_errors(true)
                .try_get_matches_from(args.iter().cloned())
            {
                Ok(matches) if help_requested(&matches) => matches,
                _ => return Err(err),
            },
        };

        let color = self.resolve_color(&matches);
        let mut ctx = RenderContext::new();
        let scope = ctx.apply_color(color.enabled);
        let verbosity = verbosity(&matches);
        let _log = scoped_subscriber(verbosity, scope.colors_enabled());
        tracing::debug!(?color, %verbosity, "invocation configured");

        if help_requested(&matches) {
            let path = subcommand_path(&matches);
            let help = render_help_for(&cmd, &path, scope.theme(&self.theme))
                .unwrap_or_else(|| cmd.render_help().to_string());
            return Ok(RunResult::Help(help));
        }

        let invocation = Invocation {
            matches: &matches,
            color,
            verbosity,
            context: &scope,
            theme: &self.theme,
        };
        let result = match handler(&invocation) {
            Ok(output) => RunResult::Handled(output),
            Err(err) => {
                tracing::debug!(error = %err, "handler failed");
                RunResult::Failed(invocation.style(Role::Error, &format!("Error: {err:#}")))
            }
        };
        Ok(result)
    }

    /// Runs the CLI, printing help, output or errors, and returns the exit
    /// code.
    pub fn run<I, T, F>(&self, cmd: Command, args: I, handler: F) -> i32
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
        F: FnOnce(&Invocation<'_>) -> anyhow::Result<String>,
    {
        match self.try_run_to_string(cmd, args, handler) {
            Ok(result) => {
                match &result {
                    RunResult::Help(text) | RunResult::Handled(text) => {
                        if !text.is_empty() {
                            println!("{}", text.trim_end_matches('\n'));
                        }
                    }
                    RunResult::Failed(message) => eprintln!("{message}"),
                }
                result.exit_code()
            }
            Err(err) => {
                // Nothing sensible is left to report if stderr is gone.
                let _ = err.print();
                err.exit_code()
            }
        }
    }

    /// Like [`run`](Self::run) on the process arguments, then exits.
    pub fn run_and_exit<F>(&self, cmd: Command, handler: F) -> !
    where
        F: FnOnce(&Invocation<'_>) -> anyhow::Result<String>,
    {
        std::process::exit(self.run(cmd, std::env::args_os(), handler))
    }
}

fn disable_builtin_help(cmd: Command) -> Command {
    cmd.disable_help_flag(true)
        .disable_help_subcommand(true)
        .mut_subcommands(disable_builtin_help)
}

/// Reads a boolean flag, treating an unknown or unset id as false.
fn flag(matches: &ArgMatches, id: &str) -> bool {
    matches!(matches.try_get_one::<bool>(id), Ok(Some(true)))
}

fn help_requested(matches: &ArgMatches) -> bool {
    flag(deepest_matches(matches), HELP_ARG)
}

/// Color value passed on the command line, if any, with its source.
fn explicit_color(matches: &ArgMatches) -> (bool, ValueSource) {
    for (id, value) in [(NO_COLOR_ARG, false), (COLOR_ARG, true)] {
        if flag(matches, id) {
            if let Some(source) = matches.value_source(id) {
                return (value, source.into());
            }
        }
    }
    (DEFAULT_COLOR, ValueSource::Default)
}

fn verbosity(matches: &ArgMatches) -> Verbosity {
    deepest_matches(matches)
        .try_get_one::<String>(VERBOSITY_ARG)
        .ok()
        .flatten()
        .and_then(|level| level.parse().ok())
        .unwrap_or_default()
}

/// Gets the deepest subcommand matches.
fn deepest_matches(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;
    while let Some((_, sub)) = current.subcommand() {
        current = sub;
    }
    current
}

fn subcommand_path(matches: &ArgMatches) -> Vec<&str> {
    let mut path = Vec::new();
    let mut current = matches;
    while let Some((name, sub)) = current.subcommand() {
        path.push(name);
        current = sub;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::color::Provenance;
    use crate::cli::env::MockEnv;
    use tinthelp_render::strip_styles;

    fn app() -> App {
        App::new().with_env(MockEnv::new())
    }

    fn sample() -> Command {
        Command::new("app").arg(Arg::new("name").required(true))
    }

    fn color_of(app: &App, args: &[&str]) -> ColorDecision {
        let mut seen = None;
        app.try_run_to_string(Command::new("app"), args, |inv| {
            seen = Some(inv.color());
            Ok(String::new())
        })
        .unwrap();
        seen.unwrap()
    }

    #[test]
    fn test_default_color() {
        let decision = color_of(&app(), &["app"]);
        assert!(decision.enabled);
        assert_eq!(decision.provenance, Provenance::Default);
    }

    #[test]
    fn test_no_color_flag_and_alias() {
        for flag in ["--no-color", "--no-ansi"] {
            let decision = color_of(&app(), &["app", flag]);
            assert!(!decision.enabled, "{flag}");
            assert_eq!(decision.provenance, Provenance::ExplicitFlag);
        }
    }

    #[test]
    fn test_last_color_flag_wins() {
        assert!(color_of(&app(), &["app", "--no-color", "--color"]).enabled);
        assert!(!color_of(&app(), &["app", "--ansi", "--no-ansi"]).enabled);
    }

    #[test]
    fn test_environment_overrides_default() {
        let app = App::new().with_env(MockEnv::new().with_var("NO_COLOR", "1"));
        let decision = color_of(&app, &["app"]);
        assert!(!decision.enabled);
        assert_eq!(decision.provenance, Provenance::Environment);

        assert!(color_of(&app, &["app", "--color"]).enabled);
    }

    #[test]
    fn test_color_flag_after_subcommand() {
        let mut seen = None;
        app()
            .try_run_to_string(
                Command::new("app").subcommand(Command::new("init")),
                ["app", "init", "--no-color"],
                |inv| {
                    let path: Vec<String> =
                        inv.subcommand_path().iter().map(|s| s.to_string()).collect();
                    seen = Some((inv.color().enabled, path));
                    Ok(String::new())
                },
            )
            .unwrap();
        assert_eq!(seen, Some((false, vec!["init".to_string()])));
    }

    #[test]
    fn test_help_despite_missing_required_argument() {
        let result = app()
            .try_run_to_string(sample(), ["app", "--help"], |_| -> anyhow::Result<String> {
                panic!("handler must not run")
            })
            .unwrap();
        let RunResult::Help(help) = result else {
            panic!("expected help, got {result:?}");
        };
        let help = strip_styles(&help);
        assert!(help.contains("Usage: app [OPTIONS] <name>"), "{help}");
        assert!(help.contains("Show this message and exit."), "{help}");
        assert!(help.contains("--no-color"), "{help}");
    }

    #[test]
    fn test_help_without_color_is_plain() {
        let result = app()
            .try_run_to_string(sample(), ["app", "--no-color", "-h"], |_| Ok(String::new()))
            .unwrap();
        let RunResult::Help(help) = result else {
            panic!("expected help");
        };
        assert_eq!(strip_styles(&help), help);
    }

    #[test]
    fn test_help_is_styled_with_color() {
        let result = app()
            .try_run_to_string(sample(), ["app", "--color", "--help"], |_| Ok(String::new()))
            .unwrap();
        let RunResult::Help(help) = result else {
            panic!("expected help");
        };
        assert_ne!(strip_styles(&help), help);
    }

    #[test]
    fn test_subcommand_help() {
        let cmd = Command::new("app").subcommand(
            Command::new("init").arg(Arg::new("force").long("force").action(ArgAction::SetTrue)),
        );
        let result = app()
            .try_run_to_string(cmd, ["app", "init", "--help", "--no-color"], |_| Ok(String::new()))
            .unwrap();
        let RunResult::Help(help) = result else {
            panic!("expected help");
        };
        assert!(help.contains("Usage: app init"), "{help}");
        assert!(help.contains("--force"), "{help}");
    }

    #[test]
    fn test_parse_error_is_returned() {
        let err = app()
            .try_run_to_string(sample(), ["app", "--bogus"], |_| Ok(String::new()))
            .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_handler_error_is_styled() {
        let result = app()
            .with_theme(HelpTheme::new().with(
                Role::Error,
                tinthelp_render::RoleStyle::custom(|s| format!("!{s}!")),
            ))
            .try_run_to_string(Command::new("app"), ["app"], |_| {
                Err(anyhow::anyhow!("disk full"))
            })
            .unwrap();
        assert_eq!(result, RunResult::Failed("!Error: disk full!".into()));
        assert_eq!(result.exit_code(), 1);
    }

    #[test]
    fn test_verbosity_reaches_handler() {
        let mut seen = None;
        app()
            .try_run_to_string(Command::new("app"), ["app", "--verbosity", "debug"], |inv| {
                seen = Some(inv.verbosity());
                Ok(String::new())
            })
            .unwrap();
        assert_eq!(seen, Some(Verbosity::Debug));
    }

    #[test]
    fn test_invocation_theme_follows_color() {
        let mut plain = None;
        app()
            .try_run_to_string(Command::new("app"), ["app", "--no-color"], |inv| {
                plain = Some(inv.style(Role::Option, "--x"));
                Ok(String::new())
            })
            .unwrap();
        assert_eq!(plain.as_deref(), Some("--x"));
    }

    #[test]
    fn test_run_exit_codes() {
        let app = app();
        assert_eq!(app.run(Command::new("app"), ["app"], |_| Ok(String::new())), 0);
        assert_eq!(
            app.run(Command::new("app"), ["app"], |_| Err(anyhow::anyhow!("nope"))),
            1
        );
        assert_eq!(app.run(Command::new("app"), ["app", "--bogus"], |_| Ok(String::new())), 2);
    }
}
