//! Oilsheet CLI - enchantment oil spreadsheet generator.
//!
//! `extract` pulls MonoBehaviour records out of the game's definitions
//! bundle into an intermediate JSON document; `report` turns that document
//! into a multi-sheet XLSX workbook.

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::Level;

use oilsheet::bundle::{dump_records, resolve_bundle, write_item_names};
use oilsheet::prelude::*;

/// Oilsheet - enchantment oil spreadsheet generator
#[derive(Parser)]
#[command(name = "oilsheet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "OILSHEET_LOG", default_value = "info")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract MonoBehaviour records from a Unity bundle to JSON
    Extract {
        /// Bundle file, or a directory to search for one
        #[arg(short, long, env = "OILSHEET_BUNDLE")]
        bundle: Option<PathBuf>,

        /// Output JSON document
        #[arg(short, long, default_value = "tmp/data.json")]
        output: PathBuf,

        /// Also write each enchantment record to its own JSON file here
        #[arg(long)]
        dump_dir: Option<PathBuf>,

        /// Also write an id -> label index of all labelled records
        #[arg(long)]
        names: Option<PathBuf>,
    },

    /// Build the XLSX report from an extracted JSON document
    Report {
        /// Input JSON document
        #[arg(short, long, default_value = "tmp/data.json")]
        input: PathBuf,

        /// Output workbook
        #[arg(short, long, default_value = "oils.xlsx")]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Extract {
            bundle,
            output,
            dump_dir,
            names,
        } => cmd_extract(bundle.as_deref(), &output, dump_dir.as_deref(), names.as_deref()),
        Commands::Report { input, output } => cmd_report(&input, &output),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_extract(
    bundle: Option<&Path>,
    output: &Path,
    dump_dir: Option<&Path>,
    names: Option<&Path>,
) -> Result<()> {
    let bundle_path = resolve_bundle(bundle).context("Failed to find bundle")?;
    tracing::info!("Reading bundle: {}", bundle_path.display());

    let start = Instant::now();
    let mut source = open_bundle(&bundle_path)?;

    let pb = ProgressBar::new(0);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );

    let rules = NameRules::default();
    let document = Extractor::new(&rules)
        .extract(source.as_mut(), |done, total| {
            pb.set_length(total as u64);
            pb.set_position(done as u64);
        })
        .context("Failed to extract records")?;
    pb.finish_and_clear();

    document
        .save(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    tracing::info!(
        "Wrote {} records ({} oils) to {} in {:?}",
        document.len(),
        document.oil_ids().len(),
        output.display(),
        start.elapsed()
    );

    if let Some(dir) = dump_dir {
        dump_records(&document, &rules, dir)
            .with_context(|| format!("Failed to dump records to {}", dir.display()))?;
    }

    if let Some(path) = names {
        let count = write_item_names(&document, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Wrote {} names to {}", count, path.display());
    }

    Ok(())
}

#[cfg(feature = "unity")]
fn open_bundle(path: &Path) -> Result<Box<dyn ObjectSource>> {
    let bundle = UnityBundle::open(path)
        .with_context(|| format!("Failed to open bundle {}", path.display()))?;
    Ok(Box::new(bundle))
}

#[cfg(not(feature = "unity"))]
fn open_bundle(path: &Path) -> Result<Box<dyn ObjectSource>> {
    anyhow::bail!(
        "Cannot read {}: this build has no bundle decoder; rebuild with `--features unity`",
        path.display()
    )
}

fn cmd_report(input: &Path, output: &Path) -> Result<()> {
    let start = Instant::now();
    let document = load_document(input)?;

    let config = ReportConfig::default();
    let report = build_report(&document, &config).context("Failed to build report")?;

    write_workbook(&report, output, config.column_width)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    tracing::info!(
        "Report completed in {:?}: {} oils, {} sheets",
        start.elapsed(),
        report.comparison().rows.len(),
        report.sheets.len()
    );

    Ok(())
}
