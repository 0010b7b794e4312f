use clap::{Parser, Subcommand};
use std::path::PathBuf;
use time::Date;

#[derive(Debug, Parser)]
#[command(name = "worktimer-tui")]
#[command(about = "Terminal work timer with per-day time entries")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run with the configured storage (default)
    Run,
    /// Run in dev mode with local in-memory data
    Dev,
    /// Print a day through the text template
    Print {
        /// Day to print (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
    },
    /// Write a day's data as a JSON file
    Export {
        /// Day to export (YYYY-MM-DD), defaults to today
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,
        /// Target directory, defaults to the configured export dir
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print config path and create default file if missing
    ConfigPath,
}

fn parse_date(raw: &str) -> Result<Date, String> {
    worktimer::time_format::parse_date_key(raw)
        .ok_or_else(|| format!("`{raw}` is not a YYYY-MM-DD date"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["worktimer-tui"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_export_arguments() {
        let cli =
            Cli::try_parse_from(["worktimer-tui", "export", "--date", "2023-05-15", "--out", "/tmp"])
                .unwrap();
        match cli.command {
            Some(Commands::Export { date: d, out }) => {
                assert_eq!(d, Some(date!(2023 - 05 - 15)));
                assert_eq!(out, Some(PathBuf::from("/tmp")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(Cli::try_parse_from(["worktimer-tui", "print", "--date", "15/05/2023"]).is_err());
    }
}
