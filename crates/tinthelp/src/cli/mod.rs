//! CLI integration for clap-based applications.
//!
//! This module bridges the help highlighter with clap's argument parsing:
//!
//! - [`collect_keywords`]: Harvest a command's vocabulary
//! - [`render_help`]: Render a command's help screen, highlighted
//! - [`resolve_color`]: Decide on colors from flags and environment
//! - [`App`]: Wire all of the above around a handler
//!
//! ## Execution Flow
//!
//! ```text
//! Clap Parsing → Color Resolution → Help or Handler → Output
//! ```
//!
//! 1. Parsing: your clap Command is augmented with `--color/--no-color`,
//!    `--help` and `--verbosity`, and parsed. A `--help` anywhere on the
//!    line wins over parse errors.
//!
//! 2. Color resolution: the explicit flag, if any, is weighed against the
//!    color variables of the environment. The decision is applied to the
//!    invocation's [`RenderContext`](tinthelp_render::context::RenderContext).
//!
//! 3. Help or handler: help is rendered through the highlighter with the
//!    theme the decision allows. Otherwise your handler runs and returns its
//!    output.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use clap::{Arg, Command};
//! use tinthelp::cli::App;
//!
//! let cmd = Command::new("greet").arg(Arg::new("name").required(true));
//!
//! App::new().run_and_exit(cmd, |inv| {
//!     let name: &String = inv.matches().get_one("name").expect("required");
//!     Ok(format!("Hello, {name}!"))
//! });
//! ```

mod app;
mod color;
mod env;
mod help;
mod keywords;

pub use app::{
    App, Invocation, RunResult, COLOR_ARG, DEFAULT_COLOR, HELP_ARG, NO_COLOR_ARG, VERBOSITY_ARG,
};
pub use color::{
    env_color_votes, parse_env_bool, resolve_color, ColorDecision, Provenance, ValueSource,
    COLOR_ENV_VARS,
};
pub use env::{EnvReader, MockEnv, RealEnv};
pub use help::{render_help, render_help_for};
pub use keywords::{collect_keywords, command_path};
