//! `fencecall` - Right-of-way referee for foil and sabre phrases
//!
//! This library models a fencing phrase as a sequence of actions, drives
//! it through a right-of-way state machine one choice at a time, and
//! renders the call a referee would make.

pub mod cli;
pub mod config;
pub mod diagram;
pub mod error;
pub mod library;
pub mod observability;
pub mod phrase;
pub mod protocol;
