//! Command-line front end for tablescope.
//!
//! The binary parses [`cli::Cli`], installs logging, loads [`settings`],
//! resolves the table through [`source`] and runs one of the
//! [`commands`], printing a [`summary`]. `tablescope shell` keeps a table
//! across commands through the session store.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
pub mod shell;
pub mod source;
pub mod summary;
