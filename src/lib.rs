//! Core library for `gitmotion`, an animated walkthrough of Git's data flow.
//!
//! The model is deliberately tiny: a few file names, two commit lists and a
//! branch name. [`transition::apply_command`] is the reducer over it,
//! [`session::Session`] owns one learner's state and drives the delayed
//! transitions, and [`explain::Explainer`] fetches commentary from a language
//! model, falling back to a fixed sentence when it cannot.

pub mod adapters;
pub mod cassette;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod explain;
pub mod model;
pub mod ports;
pub mod render;
pub mod session;
pub mod transition;

#[cfg(test)]
mod test_support;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli)
}
