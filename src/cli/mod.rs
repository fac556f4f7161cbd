//! Command-line interface
//!
//! Argument definitions and command handlers for the `fencecall` binary.

pub mod args;
pub mod commands;
