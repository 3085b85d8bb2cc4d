//! CLI module for the stagex command-line interface
//!
//! Argument parsing lives in [`args`]; [`commands`] bridges each subcommand
//! to library operations and formats the output.

pub mod args;
pub mod commands;
