use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};

use knot_emit::OutputFormat;

#[derive(Parser)]
#[command(
    name = "knotgen",
    about = "Versioned knot seed data generator",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum FormatArg {
    Sql,
    JsonLines,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Sql => OutputFormat::Sql,
            FormatArg::JsonLines => OutputFormat::JsonLines,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Build the forest, apply revisions and write the row stream
    Generate(GenerateArgs),
    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct GenerateArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Number of trees to build
    #[arg(short, long)]
    pub trees: Option<usize>,
    /// Output file, `-` for stdout
    #[arg(short, long, default_value = "-")]
    pub output: String,
    #[arg(long)]
    pub format: Option<FormatArg>,
    /// Comma separated labels revised as one group; repeatable
    #[arg(long = "revise", value_name = "LABELS")]
    pub revise: Vec<String>,
    /// Stamp every row with this instant instead of CURRENT_TIMESTAMP
    #[arg(long, value_name = "RFC3339")]
    pub fixed_time: Option<DateTime<Utc>>,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_generate_defaults() {
        let cli = Cli::try_parse_from(["knotgen", "generate"]).unwrap();
        if let Command::Generate(args) = cli.command {
            assert_eq!(args.output, "-");
            assert!(args.config.is_none());
            assert!(args.trees.is_none());
            assert!(args.format.is_none());
            assert!(args.revise.is_empty());
            assert!(args.fixed_time.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_generate_full() {
        let cli = Cli::try_parse_from([
            "knotgen", "generate",
            "-c", "seed.toml",
            "-t", "10",
            "-o", "out.sql",
            "--format", "json-lines",
            "--revise", "AA,ACB",
            "--revise", "AB",
            "--fixed-time", "2024-09-19T00:00:00Z",
        ]).unwrap();
        if let Command::Generate(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("seed.toml")));
            assert_eq!(args.trees, Some(10));
            assert_eq!(args.output, "out.sql");
            assert_eq!(args.format, Some(FormatArg::JsonLines));
            assert_eq!(args.revise, vec!["AA,ACB", "AB"]);
            assert_eq!(
                args.fixed_time.map(|t| t.to_rfc3339()),
                Some("2024-09-19T00:00:00+00:00".to_string())
            );
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_rejects_bad_time() {
        assert!(Cli::try_parse_from(["knotgen", "generate", "--fixed-time", "yesterday"]).is_err());
    }

    #[test]
    fn parse_config() {
        let cli = Cli::try_parse_from(["knotgen", "config"]).unwrap();
        assert!(matches!(cli.command, Command::Config(_)));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["knotgen", "--verbose", "generate"]).unwrap();
        assert!(cli.verbose);
        let cli = Cli::try_parse_from(["knotgen", "config", "-v"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn format_arg_maps_to_output_format() {
        assert_eq!(OutputFormat::from(FormatArg::Sql), OutputFormat::Sql);
        assert_eq!(OutputFormat::from(FormatArg::JsonLines), OutputFormat::JsonLines);
    }
}
