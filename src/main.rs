use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use log::info;
use scnir_redcap::config::DEFAULT_OUTPUT_FILENAME;
use scnir_redcap::{ConversionConfig, Diagnostics, Format, HeaderStyle};

/// Convert raw gene/variant mentions into a SCNIR REDCap upload
#[derive(Debug, Parser)]
#[command(name = "scnir-redcap", version, about)]
struct Cli {
    /// Raw mention table (tab-separated)
    #[arg(long)]
    data_location: PathBuf,

    /// Directory to write the upload file to
    #[arg(long)]
    output_dir: PathBuf,

    /// Name of the upload file
    #[arg(long, default_value = DEFAULT_OUTPUT_FILENAME)]
    output_filename: String,

    /// Input format (RAW_TSV or REDCAP)
    #[arg(long, default_value = "RAW_TSV")]
    input_format: Format,

    /// Output format (RAW_TSV or REDCAP)
    #[arg(long, default_value = "REDCAP")]
    output_format: Format,

    /// Prefix MRNs with a test marker and keep only the first two rows
    #[arg(long)]
    smoke_test: bool,

    /// Write every recorded degradation to this JSON file
    #[arg(long)]
    diagnostics_report: Option<PathBuf>,

    /// Header text to write above the columns
    #[arg(long, value_enum, default_value_t = HeaderArg::Names)]
    header_style: HeaderArg,

    /// Do not warn when genes or variants are dropped for lack of slots
    #[arg(long)]
    no_truncation_warnings: bool,

    /// Hide the progress bar
    #[arg(long)]
    no_progress: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HeaderArg {
    /// REDCap variable names
    Names,
    /// Human-readable field labels
    Labels,
}

impl From<HeaderArg> for HeaderStyle {
    fn from(arg: HeaderArg) -> Self {
        match arg {
            HeaderArg::Names => Self::VariableNames,
            HeaderArg::Labels => Self::Labels,
        }
    }
}

impl From<Cli> for ConversionConfig {
    fn from(cli: Cli) -> Self {
        Self {
            output_filename: cli.output_filename,
            input_format: cli.input_format,
            output_format: cli.output_format,
            smoke_test: cli.smoke_test,
            warn_on_truncation: !cli.no_truncation_warnings,
            header_style: cli.header_style.into(),
            diagnostics_report: cli.diagnostics_report,
            show_progress: !cli.no_progress,
            ..Self::new(cli.data_location, cli.output_dir)
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ConversionConfig::from(Cli::parse());
    info!("{config}");

    let start = Instant::now();
    let diagnostics = Diagnostics::new();
    let report = scnir_redcap::convert(&config, &diagnostics).with_context(|| {
        format!(
            "Failed to convert {} to {}",
            config.data_location.display(),
            config.output_path().display()
        )
    })?;

    info!(
        "Converted {} patients ({} rows written, {} degradations) to {} in {:?}",
        report.patients,
        report.rows_written,
        report.diagnostics.len(),
        report.output_path.display(),
        start.elapsed()
    );
    Ok(())
}
