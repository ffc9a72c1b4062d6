//! ShapeInk Application
//!
//! Command line shell around the editor core: scene inspection, format
//! conversion and scripted editing sessions.

mod app;
pub mod replay;
mod shortcuts;

pub use app::{run, Cli, CliError, Command};
pub use shortcuts::{Shortcut, ShortcutRegistry};
