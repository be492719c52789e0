//! # stagegate
//!
//! Command-line front end over `stagegate-core`.
//!
//! - `cli`: argument parsing and command implementations
//! - `config`: registry configuration files

pub mod cli;
pub mod config;
