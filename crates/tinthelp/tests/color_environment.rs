//! Color resolution against the real process environment.
//!
//! These tests mutate process-wide variables, so they run serially and
//! restore what they found.

use clap::Command;
use serial_test::serial;
use tinthelp::cli::{resolve_color, App, Provenance, RealEnv, RunResult, ValueSource, COLOR_ENV_VARS};

/// Clears every color variable, sets the given ones, and restores the
/// original values on drop.
struct ColorEnv {
    saved: Vec<(&'static str, Option<std::ffi::OsString>)>,
}

impl ColorEnv {
    fn with(vars: &[(&str, &str)]) -> Self {
        let saved = COLOR_ENV_VARS
            .iter()
            .map(|&(name, _)| (name, std::env::var_os(name)))
            .collect();
        for (name, _) in COLOR_ENV_VARS {
            std::env::remove_var(name);
        }
        for (name, value) in vars {
            std::env::set_var(name, value);
        }
        Self { saved }
    }
}

impl Drop for ColorEnv {
    fn drop(&mut self) {
        for (name, value) in &self.saved {
            match value {
                Some(value) => std::env::set_var(name, value),
                None => std::env::remove_var(name),
            }
        }
    }
}

fn help_of(app: &App, args: &[&str]) -> String {
    match app
        .try_run_to_string(Command::new("app"), args, |_| Ok(String::new()))
        .unwrap()
    {
        RunResult::Help(help) => help,
        other => panic!("expected help, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_clean_environment_keeps_default() {
    let _env = ColorEnv::with(&[]);
    let decision = resolve_color(true, ValueSource::Default, &RealEnv);
    assert!(decision.enabled);
    assert_eq!(decision.provenance, Provenance::Default);
}

#[test]
#[serial]
fn test_no_color_variable_disables_help_colors() {
    let _env = ColorEnv::with(&[("NO_COLOR", "1")]);
    let help = help_of(&App::new(), &["app", "--help"]);
    assert!(!help.contains('\u{1b}'), "{help}");
}

#[test]
#[serial]
fn test_force_color_variable_enables_help_colors() {
    let _env = ColorEnv::with(&[("FORCE_COLOR", "true")]);
    let help = help_of(&App::new(), &["app", "--help"]);
    assert!(help.contains('\u{1b}'), "{help}");
}

#[test]
#[serial]
fn test_flag_overrides_real_environment() {
    let _env = ColorEnv::with(&[("CLICOLOR_FORCE", "1")]);
    let help = help_of(&App::new(), &["app", "--no-ansi", "--help"]);
    assert!(!help.contains('\u{1b}'), "{help}");
}
