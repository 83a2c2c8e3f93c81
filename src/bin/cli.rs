// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 spkb contributors

//! spkb CLI

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use spkb::ast::{Evaluator, TreeStats};
use spkb::catalog::Part;
use spkb::cli::Reporter;
use spkb::config::RenderConfig;
use spkb::io;
use spkb::keyswitch::{Keyswitch, SwitchFamily};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "spkb")]
#[command(about = "Parametric keyboard parts rendered to OpenSCAD", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./spkb.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a part to a .scad file
    Render {
        /// Part name (see `spkb list`)
        part: Part,

        /// Output file (defaults to <output_dir>/<part>.scad)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Switch family: mx or choc
        #[arg(short, long)]
        switch: Option<SwitchFamily>,

        /// Global $fn written to the file; circular holes keep their own fixed $fn
        #[arg(long)]
        segments: Option<u32>,
    },

    /// Render every part in the catalog
    RenderAll {
        /// Switch family: mx or choc
        #[arg(short, long)]
        switch: Option<SwitchFamily>,
    },

    /// List renderable parts
    List,

    /// Parse SCAD file and output AST as JSON
    Parse {
        /// Input SCAD file
        input: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show node counts, labels and bounds of a SCAD file
    Stats {
        /// Input SCAD file
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(&cli) {
        Reporter::report_error(&format!("{:#}", err));
        std::process::exit(1);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Render {
            part,
            output,
            switch,
            segments,
        } => {
            let mut config = load_config(cli.config.as_deref())?;
            if let Some(segments) = segments {
                config.segments = *segments;
                config.validate()?;
            }
            let family = switch.unwrap_or(config.switch);
            let output = output
                .clone()
                .unwrap_or_else(|| default_output(&config, *part, family));
            render_command(*part, family, &output, &config)
        }
        Commands::RenderAll { switch } => {
            let config = load_config(cli.config.as_deref())?;
            let family = switch.unwrap_or(config.switch);
            for part in Part::ALL {
                render_command(part, family, &default_output(&config, part, family), &config)?;
            }
            Reporter::success(&format!(
                "Rendered {} parts to {}",
                Part::ALL.len(),
                config.output_dir.display()
            ));
            Ok(())
        }
        Commands::List => {
            Reporter::report_parts(&Part::ALL);
            Ok(())
        }
        Commands::Parse { input, output } => parse_command(input, output.as_deref()),
        Commands::Stats { input } => stats_command(input),
        Commands::Version => {
            println!("spkb v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig> {
    match path {
        Some(path) => {
            let mut config = RenderConfig::from_file(path)?;
            config.apply_overrides(|key| std::env::var(key).ok())?;
            Ok(config)
        }
        None => RenderConfig::load(),
    }
}

/// Switch-dependent parts get the family appended, so both families can sit side by side
fn default_output(config: &RenderConfig, part: Part, family: SwitchFamily) -> PathBuf {
    if part.uses_switch() {
        config.output_path(&format!("{}-{}", part, family))
    } else {
        config.output_path(part.name())
    }
}

fn render_command(part: Part, family: SwitchFamily, output: &Path, config: &RenderConfig) -> Result<()> {
    let start = std::time::Instant::now();
    let node = part
        .build(&Keyswitch::new(family))
        .with_context(|| format!("Failed to build part `{}`", part))?;
    io::export_scad(&node, output, config)?;

    Reporter::report_render(part.name(), output, &TreeStats::from_ast(&node), start.elapsed());
    Ok(())
}

fn parse_command(input: &Path, output: Option<&Path>) -> Result<()> {
    let ast = io::import_scad_file(input)?;
    let json = serde_json::to_string_pretty(&ast).context("Failed to serialize AST")?;

    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("Failed to write AST JSON: {:?}", path))?;
            Reporter::success(&format!("AST written to {}", path.display()));
        }
        None => println!("{}", json),
    }
    Ok(())
}

fn stats_command(input: &Path) -> Result<()> {
    let document = io::import_scad_document(input)?;
    let stats = TreeStats::from_ast(&document.root);
    let bounds = Evaluator::new().bounds(&document.root);

    if document.segments().is_none() {
        Reporter::report_info("no global $fn set; the renderer default applies");
    }
    if bounds.is_none() {
        Reporter::report_warning("the file describes an empty solid");
    }
    Reporter::report_stats(
        &input.display().to_string(),
        &stats,
        bounds.as_ref(),
        document.segments(),
    );
    Ok(())
}
