//! Command-line front end: argument parsing and command dispatch

pub mod args;
pub mod commands;

pub use args::Args;
pub use commands::{analyze, Command};
