use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::Context;
use colored::Colorize;

use knot_emit::open_writer;
use knot_seed::{SeedReport, Seeder};

use crate::cli::*;
use crate::config::AppConfig;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Generate(args) => cmd_generate(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    config.apply_overrides(&args);

    let out: Box<dyn Write> = if args.output == "-" {
        Box::new(BufWriter::new(io::stdout().lock()))
    } else {
        let file = File::create(&args.output)
            .with_context(|| format!("failed to create {}", args.output))?;
        Box::new(BufWriter::new(file))
    };

    let report = generate(&config, out)?;

    eprintln!("{} Seed written to {}", "✓".green().bold(), args.output.bold());
    eprintln!("  Trees: {}", report.trees.to_string().cyan());
    eprintln!("  Knots: {}", report.nodes.to_string().cyan());
    eprintln!("  Revisions: {}", report.revisions.to_string().yellow());
    eprintln!(
        "  Rows: {} ({} node, {} hierarchy)",
        report.rows().to_string().bold(),
        report.node_rows,
        report.relationship_rows
    );
    Ok(())
}

/// Run a seed with `config` and write the row stream to `out`.
pub fn generate(config: &AppConfig, out: Box<dyn Write>) -> anyhow::Result<SeedReport> {
    let seeder = Seeder::new(config.seed.clone()).context("invalid seed configuration")?;
    let mut writer =
        open_writer(config.format, config.render.clone(), out).context("invalid render configuration")?;
    let report = seeder.run(writer.as_mut())?;
    Ok(report)
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    print!("{}", config.to_toml()?);
    Ok(())
}
