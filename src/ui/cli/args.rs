use crate::evaluation::CurveFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "rill",
    about = "Resumable active learning over batched data streams"
)]
#[command(version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Start a run, or resume it from its last checkpoint
    Run(RunArgs),
    /// Print the JSON Schema of the run configuration
    Schema,
    /// List the available components and their parameters
    List,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Run configuration (JSON)
    #[arg(short, long)]
    pub config: PathBuf,

    /// Write the learning curve here once the run is done
    #[arg(short, long)]
    pub export: Option<PathBuf>,

    /// Learning curve format: csv, tsv or json
    #[arg(short, long, default_value = "csv")]
    pub format: CurveFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_export() {
        let cli = Cli::try_parse_from([
            "rill", "run", "--config", "cfg.json", "--export", "curve.tsv", "--format", "tsv", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.config, PathBuf::from("cfg.json"));
        assert_eq!(args.export, Some(PathBuf::from("curve.tsv")));
        assert_eq!(args.format, CurveFormat::Tsv);
    }

    #[test]
    fn format_defaults_to_csv() {
        let cli = Cli::try_parse_from(["rill", "run", "-c", "cfg.json"]).unwrap();
        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.format, CurveFormat::Csv);
        assert!(args.export.is_none());
    }

    #[test]
    fn config_is_required() {
        assert!(Cli::try_parse_from(["rill", "run"]).is_err());
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["rill", "run", "-c", "c.json", "--format", "xml"]).is_err());
    }
}
