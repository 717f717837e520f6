//! Command implementations for the CLI interface.
//!
//! Each subcommand maps to one handler here. Handlers return
//! [`crate::error::Result`] and leave reporting to `main`.

use std::io::{self, Write};

use clap::{CommandFactory, Subcommand};
use clap_complete::{generate, Shell};

use crate::cli::Cli;
use crate::error::Result;
use crate::filter::Filter;
use crate::qr::{QrImage, APP_URL};
use crate::tui::run::run_tui;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Launch the interactive todo list (default).
    Ui {
        /// View to open with: all | checked | unchecked | removed.
        #[arg(long, value_enum, default_value_t = Filter::All)]
        filter: Filter,
        /// Link encoded in the QR-code overlay.
        #[arg(long, default_value = APP_URL)]
        qr_url: String,
        /// Print the final task list as JSON after quitting.
        #[arg(long)]
        dump: bool,
    },

    /// Print the QR code for the app link and exit.
    Qr {
        /// Link to encode.
        #[arg(long, default_value = APP_URL)]
        url: String,
    },

    /// Generate shell completion scripts.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Ui {
            filter: Filter::All,
            qr_url: APP_URL.to_string(),
            dump: false,
        }
    }
}

/// Run the TUI, optionally dumping the tasks afterwards.
pub fn cmd_ui(filter: Filter, qr_url: &str, dump: bool) -> Result<()> {
    // Must fail before the terminal enters raw mode.
    let qr = QrImage::new(qr_url)?;
    let store = run_tui(filter, qr)?;

    if dump {
        let mut out = io::stdout().lock();
        serde_json::to_writer_pretty(&mut out, store.tasks())?;
        writeln!(out)?;
    }
    Ok(())
}

/// Print the QR code block and the link it encodes.
pub fn cmd_qr(url: &str) -> Result<()> {
    let qr = QrImage::new(url)?;
    let mut out = io::stdout().lock();
    for line in qr.lines() {
        writeln!(out, "{line}")?;
    }
    writeln!(out, "{}", qr.url())?;
    Ok(())
}

/// Write a completion script for `shell` to stdout.
pub fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
