//! Utilities to execute external commands and print CLI transcripts.
//!
//! Transcripts simulate what a user would see in a terminal:
//!
//! ```text
//! ► NO_COLOR=1 app --help
//!   Usage: app [OPTIONS]
//!   ...
//! ```

use std::collections::BTreeMap;
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tinthelp_render::{HelpTheme, Role};
use wait_timeout::ChildExt;

pub const PROMPT: &str = "► ";
/// Blank prefix as wide as [`PROMPT`].
pub const INDENT: &str = "  ";

/// Extra environment for a command. `None` unsets the variable.
pub type EnvVars = BTreeMap<String, Option<String>>;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("no command to run")]
    EmptyCommand,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Command `{0}` timed out after {1:?}")]
    Timeout(String, Duration),
    #[error("Command output was not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// What a finished command left behind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

/// Renders the prompt line of a transcript: prompt, extra environment,
/// then the command styled as the invoked command.
pub fn format_cli<S: AsRef<str>>(args: &[S], extra_env: Option<&EnvVars>) -> String {
    let theme = HelpTheme::default_theme();
    let command = args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");

    let mut env_prefix = String::new();
    for (name, value) in extra_env.into_iter().flatten() {
        env_prefix.push_str(&format!("{name}={} ", value.as_deref().unwrap_or("")));
    }

    format!(
        "{PROMPT}{env_prefix}{}",
        theme.apply(Role::InvokedCommand, &command)
    )
}

/// Renders a full transcript: prompt line, indented output, indented error
/// and the return code.
pub fn cli_transcript<S: AsRef<str>>(
    args: &[S],
    output: Option<&str>,
    error: Option<&str>,
    code: Option<i32>,
    extra_env: Option<&EnvVars>,
) -> String {
    let theme = HelpTheme::default_theme();
    let mut transcript = format!("\n{}\n", format_cli(args, extra_env));

    if let Some(output) = output.filter(|text| !text.is_empty()) {
        transcript.push_str(&indent(output));
        transcript.push('\n');
    }
    if let Some(error) = error.filter(|text| !text.is_empty()) {
        transcript.push_str(&indent(&theme.apply(Role::Error, error)));
        transcript.push('\n');
    }
    if let Some(code) = code {
        transcript.push_str(&theme.apply(Role::Error, &format!("{INDENT}Return code: {code}")));
        transcript.push('\n');
    }
    transcript
}

/// Prints [`cli_transcript`] to stdout.
pub fn print_cli_output<S: AsRef<str>>(
    args: &[S],
    output: Option<&str>,
    error: Option<&str>,
    code: Option<i32>,
    extra_env: Option<&EnvVars>,
) {
    print!("{}", cli_transcript(args, output, error, code, extra_env));
}

/// Returns the current environment extended with `extend`, or `None` when
/// there is nothing to add so the child simply inherits.
pub fn env_copy(extend: Option<&EnvVars>) -> Option<BTreeMap<String, String>> {
    let extend = extend.filter(|vars| !vars.is_empty())?;

    let mut env: BTreeMap<String, String> = std::env::vars_os()
        .map(|(name, value)| {
            (
                name.to_string_lossy().into_owned(),
                value.to_string_lossy().into_owned(),
            )
        })
        .collect();
    for (name, value) in extend {
        match value {
            Some(value) => env.insert(name.clone(), value.clone()),
            None => env.remove(name),
        };
    }
    Some(env)
}

/// Runs a system command, capturing its output, and optionally prints the
/// transcript.
///
/// With a `timeout` the process is killed once it is exceeded.
pub fn run_cmd<S: AsRef<str>>(
    args: &[S],
    extra_env: Option<&EnvVars>,
    timeout: Option<Duration>,
    print_output: bool,
) -> Result<CmdOutput, RunError> {
    let (program, rest) = args.split_first().ok_or(RunError::EmptyCommand)?;
    let command_line = args.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(" ");

    let mut cmd = Command::new(program.as_ref());
    cmd.args(rest.iter().map(AsRef::as_ref))
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    if let Some(env) = env_copy(extra_env) {
        cmd.env_clear().envs(env);
    }

    tracing::debug!(command = %command_line, "running command");
    let mut child = cmd.spawn()?;

    // Drain both pipes while waiting so a chatty child cannot block on a
    // full pipe.
    let stdout = child.stdout.take().map(drain);
    let stderr = child.stderr.take().map(drain);

    let status = match timeout {
        Some(duration) => match child.wait_timeout(duration)? {
            Some(status) => status,
            None => {
                child.kill()?;
                child.wait()?;
                return Err(RunError::Timeout(command_line, duration));
            }
        },
        None => child.wait()?,
    };

    let output = CmdOutput {
        code: status.code(),
        stdout: collect(stdout)?,
        stderr: collect(stderr)?,
    };

    if print_output {
        print_cli_output(
            args,
            Some(&output.stdout),
            Some(&output.stderr),
            output.code,
            extra_env,
        );
    }
    Ok(output)
}

type Drain = thread::JoinHandle<std::io::Result<Vec<u8>>>;

fn drain<R: Read + Send + 'static>(mut pipe: R) -> Drain {
    thread::spawn(move || {
        let mut buf = Vec::new();
        pipe.read_to_end(&mut buf)?;
        Ok(buf)
    })
}

fn collect(handle: Option<Drain>) -> Result<String, RunError> {
    let Some(handle) = handle else {
        return Ok(String::new());
    };
    let bytes = handle
        .join()
        .map_err(|_| std::io::Error::other("output reader panicked"))??;
    Ok(String::from_utf8(bytes)?)
}

/// Prefixes every non-blank line with [`INDENT`].
fn indent(text: &str) -> String {
    text.split_inclusive('\n')
        .map(|line| {
            if line.trim().is_empty() {
                line.to_string()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinthelp_render::strip_styles;

    fn env(pairs: &[(&str, Option<&str>)]) -> EnvVars {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(String::from)))
            .collect()
    }

    #[test]
    fn test_format_cli() {
        let line = format_cli(&["app", "--help"], None);
        assert_eq!(strip_styles(&line), "► app --help");
    }

    #[test]
    fn test_format_cli_with_env() {
        let extra = env(&[("NO_COLOR", Some("1")), ("A", Some("x"))]);
        let line = format_cli(&["app"], Some(&extra));
        assert_eq!(strip_styles(&line), "► A=x NO_COLOR=1 app");
    }

    #[test]
    fn test_transcript_layout() {
        let transcript = cli_transcript(
            &["app"],
            Some("line one\n\nline two\n"),
            Some("oops"),
            Some(2),
            None,
        );
        assert_eq!(
            strip_styles(&transcript),
            "\n► app\n  line one\n\n  line two\n\n  oops\n  Return code: 2\n"
        );
    }

    #[test]
    fn test_env_copy_without_extension() {
        assert_eq!(env_copy(None), None);
        assert_eq!(env_copy(Some(&EnvVars::new())), None);
    }

    #[test]
    fn test_env_copy_extends_and_unsets() {
        let extra = env(&[
            ("TINTHELP_RUN_TEST_VAR", Some("yes")),
            ("TINTHELP_SURELY_UNSET_VARIABLE", None),
        ]);
        let copy = env_copy(Some(&extra)).unwrap();
        assert_eq!(copy.get("TINTHELP_RUN_TEST_VAR").map(String::as_str), Some("yes"));
        assert!(!copy.contains_key("TINTHELP_SURELY_UNSET_VARIABLE"));
    }

    #[test]
    fn test_run_cmd_empty() {
        let none: [&str; 0] = [];
        assert!(matches!(
            run_cmd(&none, None, None, false),
            Err(RunError::EmptyCommand)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_cmd_captures_output() {
        let extra = env(&[("GREETING", Some("hello"))]);
        let output = run_cmd(
            &["sh", "-c", "echo $GREETING; echo oops >&2; exit 3"],
            Some(&extra),
            None,
            false,
        )
        .unwrap();
        assert_eq!(
            output,
            CmdOutput {
                code: Some(3),
                stdout: "hello\n".into(),
                stderr: "oops\n".into(),
            }
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_run_cmd_timeout() {
        let err = run_cmd(
            &["sh", "-c", "sleep 5"],
            None,
            Some(Duration::from_millis(50)),
            false,
        )
        .unwrap_err();
        assert!(matches!(err, RunError::Timeout(_, _)));
    }

    #[test]
    fn test_run_cmd_missing_program() {
        let err = run_cmd(&["tinthelp-no-such-program"], None, None, false).unwrap_err();
        assert!(matches!(err, RunError::Io(_)));
    }
}
