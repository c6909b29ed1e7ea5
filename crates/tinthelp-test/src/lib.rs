//! In-process test harness for tinthelp applications.
//!
//! [`Harness`] runs a clap command through [`App`] without spawning a
//! process. Color variables come from a mocked environment, so tests never
//! touch the real one and can run in parallel.
//!
//! ```rust
//! use clap::Command;
//! use tinthelp_test::Harness;
//!
//! let result = Harness::new()
//!     .env("NO_COLOR", "1")
//!     .quiet()
//!     .invoke(Command::new("app"), &["app", "--help"], |_| Ok(String::new()));
//!
//! assert_eq!(result.exit_code, 0);
//! assert!(result.stdout.contains("Usage: app"));
//! assert_eq!(result.stdout, result.raw_stdout);
//! ```

use clap::Command;
use tinthelp::cli::{App, Invocation, MockEnv, RunResult};
use tinthelp::run::{print_cli_output, EnvVars};
use tinthelp::{strip_styles, HelpTheme};

/// Captured outcome of one in-process invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeResult {
    pub exit_code: i32,
    /// Standard output with ANSI codes stripped.
    pub stdout: String,
    /// Standard error with ANSI codes stripped.
    pub stderr: String,
    pub raw_stdout: String,
    pub raw_stderr: String,
}

impl InvokeResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Builder for in-process invocations.
#[derive(Debug, Clone)]
pub struct Harness {
    env: EnvVars,
    theme: Option<HelpTheme>,
    print_transcript: bool,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new()
    }
}

impl Harness {
    /// A harness with an empty environment that prints transcripts.
    pub fn new() -> Self {
        Self {
            env: EnvVars::new(),
            theme: None,
            print_transcript: true,
        }
    }

    /// Sets a variable in the mocked environment.
    pub fn env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(name.into(), Some(value.into()));
        self
    }

    pub fn theme(mut self, theme: HelpTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    /// Stops printing a CLI transcript after each invocation.
    pub fn quiet(mut self) -> Self {
        self.print_transcript = false;
        self
    }

    /// Runs `cmd` with `args` and `handler`, capturing what would have been
    /// printed.
    pub fn invoke<F>(&self, cmd: Command, args: &[&str], handler: F) -> InvokeResult
    where
        F: FnOnce(&Invocation<'_>) -> anyhow::Result<String>,
    {
        let (exit_code, raw_stdout, raw_stderr) =
            match self.app().try_run_to_string(cmd, args, handler) {
                Ok(result) => {
                    let code = result.exit_code();
                    match result {
                        RunResult::Help(text) | RunResult::Handled(text) => {
                            (code, text, String::new())
                        }
                        RunResult::Failed(message) => (code, String::new(), message),
                    }
                }
                Err(err) => {
                    let rendered = err.render().to_string();
                    if err.use_stderr() {
                        (err.exit_code(), String::new(), rendered)
                    } else {
                        (err.exit_code(), rendered, String::new())
                    }
                }
            };

        if self.print_transcript {
            print_cli_output(
                args,
                Some(&raw_stdout),
                Some(&raw_stderr),
                Some(exit_code),
                Some(&self.env),
            );
        }

        InvokeResult {
            exit_code,
            stdout: strip_styles(&raw_stdout),
            stderr: strip_styles(&raw_stderr),
            raw_stdout,
            raw_stderr,
        }
    }

    fn app(&self) -> App {
        let env = self
            .env
            .iter()
            .filter_map(|(name, value)| Some((name, value.as_ref()?)))
            .fold(MockEnv::new(), |env, (name, value)| {
                env.with_var(name.as_str(), value.as_str())
            });
        let app = App::new().with_env(env);
        match &self.theme {
            Some(theme) => app.with_theme(theme.clone()),
            None => app,
        }
    }
}
