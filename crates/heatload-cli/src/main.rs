//! heatload CLI - Heating loads reporting toolkit
//!
//! Extracts thermal rooms from a model snapshot, reduces the simulated
//! heating series to their peaks, and writes the formatted
//! "Heating Loads.xlsx" report.

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use heatload_core::{
    build_report, enumerate_rooms, extract_metrics, FileFilter, FilePicker, ReportRenderer,
    OUTPUT_FILENAME,
};
use heatload_render::ExcelRenderer;
use heatload_sources::{ModelSnapshot, PromptFilePicker, ResultsFile};

#[derive(Parser)]
#[command(name = "heatload")]
#[command(author, version, about = "Heating loads spreadsheet generator", long_about = None)]
struct Cli {
    /// Model snapshot file (JSON export of the building model)
    #[arg(value_name = "MODEL")]
    model: PathBuf,

    /// Results export file; prompted for interactively if not given
    #[arg(short, long, value_name = "FILE")]
    results: Option<PathBuf>,

    /// Output workbook path
    #[arg(short, long, value_name = "FILE", default_value = OUTPUT_FILENAME)]
    output: PathBuf,

    /// Do not open the written workbook in the platform viewer
    #[arg(long)]
    no_open: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; -v raises the default level, RUST_LOG overrides
    let default_level = if cli.verbose > 0 { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let model =
        ModelSnapshot::open(&cli.model).context("room enumeration: opening model snapshot")?;
    let rooms = enumerate_rooms(&model).context("room enumeration")?;

    let results_path = match cli.results {
        Some(path) => path,
        None => PromptFilePicker::new().pick(
            &FileFilter::new("HTG results export", "json"),
            "Navigate to and select a HTG results export",
        )?,
    };
    let results =
        ResultsFile::open(&results_path).context("results extraction: opening results file")?;
    let metrics = extract_metrics(&results, &rooms).context("results extraction")?;

    let report = build_report(rooms, metrics).context("report assembly")?;
    tracing::info!(rows = report.len(), "report assembled");

    let xlsx = ExcelRenderer::new()
        .render(&report)
        .context("report rendering")?;
    std::fs::write(&cli.output, xlsx)
        .with_context(|| format!("writing '{}'", cli.output.display()))?;
    tracing::info!(path = %cli.output.display(), "workbook written");

    // Convenience hand-off; the written file stands on its own
    if !cli.no_open {
        if let Err(e) = open_in_viewer(&cli.output) {
            tracing::warn!(path = %cli.output.display(), error = %e,
                "could not open workbook in the platform viewer");
        }
    }

    Ok(())
}

/// Open a file in the platform's default viewer, detached.
fn open_in_viewer(path: &Path) -> std::io::Result<()> {
    #[cfg(target_os = "windows")]
    let mut cmd = {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", ""]).arg(path);
        cmd
    };

    #[cfg(target_os = "macos")]
    let mut cmd = {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    };

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let mut cmd = {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    };

    cmd.spawn().map(|_| ())
}
