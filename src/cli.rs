use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Keyboard-driven todo list for the terminal.
/// Tasks live in memory until the program exits.
#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Terminal todo list with a trash bin")]
pub struct Cli {
    /// Append tracing output to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Log level or tracing directives; RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::qr::APP_URL;

    #[test]
    fn test_no_subcommand_means_ui() {
        let cli = Cli::try_parse_from(["todo"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, "info");
        assert!(cli.log_file.is_none());
    }

    #[test]
    fn test_parse_ui_options() {
        let cli = Cli::try_parse_from([
            "todo", "ui", "--filter", "removed", "--dump", "--log-file", "/tmp/todo.log",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Ui { filter, qr_url, dump }) => {
                assert_eq!(filter, Filter::Removed);
                assert_eq!(qr_url, APP_URL);
                assert!(dump);
            }
            _ => panic!("expected ui command"),
        }
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/todo.log")));
    }

    #[test]
    fn test_parse_qr_url() {
        let cli = Cli::try_parse_from(["todo", "qr", "--url", "https://example.com/"]).unwrap();
        match cli.command {
            Some(Commands::Qr { url }) => assert_eq!(url, "https://example.com/"),
            _ => panic!("expected qr command"),
        }
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        assert!(Cli::try_parse_from(["todo", "ui", "--filter", "starred"]).is_err());
    }
}
