//! # stagegate CLI Module
//!
//! This module implements the CLI interface for stagegate.
//!
//! ## Available Commands
//!
//! - `status` - Show unlock flags, attempts and progress (default)
//! - `validate` - Check an answer for a step
//! - `guard` - Evaluate navigation to a step
//! - `reset` - Lock every step and zero every counter
//! - `steps` - List configured steps

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use stagegate_core::GateError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// stagegate - unlock the story one secret at a time
///
/// Each step opens once its secret phrase is typed; the next step becomes
/// reachable once the previous one is unlocked.
#[derive(Parser, Debug)]
#[command(name = "stagegate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the progress store (a file for redb, a directory for file)
    #[arg(short = 'D', long, global = true, default_value = "stagegate.db")]
    pub database: PathBuf,

    /// Storage backend
    #[arg(short = 'B', long, global = true, value_enum, default_value_t = Backend::Redb)]
    pub backend: Backend,

    /// Registry configuration file (TOML); built-in codes if omitted
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where progress snapshots are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// redb database file (ACID)
    Redb,
    /// Directory of JSON files
    File,
    /// In-process only; nothing survives the command
    Memory,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Backend::Redb => "redb",
            Backend::File => "file",
            Backend::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show progress
    Status,

    /// Check an answer for a step
    Validate {
        /// Step number
        #[arg(short, long)]
        step: u32,

        /// The answer as typed
        input: String,
    },

    /// Evaluate navigation to a step
    Guard {
        /// Step number
        #[arg(short, long)]
        step: u32,
    },

    /// Lock every step and zero every counter
    Reset,

    /// List configured steps
    Steps,
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), GateError> {
    let mut controller = open_controller(&cli)?;
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Status) | None => cmd_status(&controller, json_mode),
        Some(Commands::Validate { step, input }) => {
            cmd_validate(&mut controller, step, &input, json_mode)
        }
        Some(Commands::Guard { step }) => cmd_guard(&controller, step, json_mode),
        Some(Commands::Reset) => cmd_reset(&mut controller, json_mode),
        Some(Commands::Steps) => cmd_steps(&controller, json_mode),
    }
}
