//! # stagegate
//!
//! The command-line binary for the stagegate progress engine.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │            apps/stagegate (THE BINARY)        │
//! │                                               │
//! │   ┌─────────────┐        ┌────────────────┐   │
//! │   │   CLI       │        │  TOML config   │   │
//! │   │  (clap)     │        │  (registry)    │   │
//! │   └──────┬──────┘        └───────┬────────┘   │
//! │          └───────────┬───────────┘            │
//! │                      ▼                        │
//! │             ┌──────────────────┐              │
//! │             │  stagegate-core  │              │
//! │             │   (THE LOGIC)    │              │
//! │             └──────────────────┘              │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! stagegate status
//! stagegate validate --step 1 "Yuka"
//! stagegate guard --step 2
//! stagegate --config codes.toml --backend file -D ./progress reset
//! ```

use clap::Parser;
use stagegate::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let cli = cli::Cli::parse();

    // STAGEGATE_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("STAGEGATE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "stagegate=debug,stagegate_core=debug"
    } else {
        "stagegate=warn,stagegate_core=warn"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    // Logs go to stderr so --json-mode output on stdout stays parseable.
    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!("stagegate v{}", env!("CARGO_PKG_VERSION"));
    println!();
}
