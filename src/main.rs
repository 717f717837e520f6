//! # todo - terminal todo list
//!
//! A small keyboard-driven todo list with a filterable view and a trash bin.
//!
//! ## Key Features
//!
//! - **Four views**: all tasks, completed, current and trash, switched with Tab or 1-4
//! - **Soft delete**: deleted tasks go to the trash and can be restored until it is emptied
//! - **Live editing**: text changes apply as you type
//! - **QR overlay**: press `q` to show a QR code linking to the web version
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the todo list
//! todo
//!
//! # Start in the trash, print the tasks as JSON when quitting
//! todo ui --filter removed --dump
//!
//! # Print the QR code without starting the UI
//! todo qr
//! ```
//!
//! Tasks are kept in memory only and are gone when the program exits.

use clap::Parser;

pub mod cli;
pub mod cmd;
pub mod error;
pub mod filter;
pub mod logging;
pub mod qr;
pub mod store;
pub mod task;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod utils;
}

use cli::Cli;
use cmd::*;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_tracing(cli.log_file.as_deref(), &cli.log_level) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    let result = match cli.command.unwrap_or_default() {
        Commands::Ui { filter, qr_url, dump } => cmd_ui(filter, &qr_url, dump),
        Commands::Qr { url } => cmd_qr(&url),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        }
    };

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
