//! Command-line driver

pub mod args;
pub mod commands;
