//! Conversion pipeline
//!
//! load raw table -> resolve patients -> aggregate -> serialize -> write.
//! The format pre-check runs before any file is opened, and the output file is
//! only created once the whole table has been built in memory.

use std::borrow::Cow;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::ParallelProgressIterator;
use rayon::prelude::*;

use crate::algorithm::{MentionAggregator, VariantClassifier};
use crate::config::ConversionConfig;
use crate::diagnostics::{Degradation, Diagnostics};
use crate::error::util::{ensure_directory, safe_create_file, safe_open_file};
use crate::error::{ConvertError, Result};
use crate::formats::ensure_supported;
use crate::models::{PatientForm, REQUIRED_COLUMNS, RawMentionRow};
use crate::schema::{HeaderStyle, RedcapSchema};
use crate::serialize::{Cell, RowSerializer};
use crate::utils::logging::{
    create_main_progress_bar, finish_progress_bar, log_diagnostics_summary, log_table_done,
    log_table_start,
};

/// The fixed-width output table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputTable {
    /// Header text, one per column
    pub headers: Vec<String>,
    /// One row per patient, each exactly `headers.len()` cells
    pub rows: Vec<Vec<Cell>>,
}

impl OutputTable {
    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cells of one column by header text
    #[must_use]
    pub fn column(&self, header: &str) -> Option<Vec<&Cell>> {
        let index = self.headers.iter().position(|h| h == header)?;
        Some(self.rows.iter().map(|row| &row[index]).collect())
    }

    /// Write as comma-separated text with a header row
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::WriterBuilder::new().from_writer(writer);
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            let fields: Vec<Cow<'_, str>> = row.iter().map(Cell::as_field).collect();
            writer.write_record(fields.iter().map(|field| field.as_bytes()))?;
        }
        writer.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}

/// Outcome of a completed conversion
#[derive(Debug, Clone)]
pub struct ConversionReport {
    /// Distinct patients found in the input
    pub patients: usize,
    /// Patients grouped under a fallback identifier because no MRN was found
    pub unresolved_patients: usize,
    /// Rows written to the upload file
    pub rows_written: usize,
    /// Where the upload file was written
    pub output_path: PathBuf,
    /// Version tag of the column layout written
    pub schema_version: &'static str,
    /// Every degradation recorded during the run
    pub diagnostics: Vec<Degradation>,
}

/// Read a tab-separated raw mention table, masking the unknown sentinel
pub fn read_raw_table<R: io::Read>(
    reader: R,
    unknown_sentinel: &str,
) -> Result<Vec<RawMentionRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if let Some(missing) = REQUIRED_COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h == **column))
    {
        return Err(ConvertError::MissingColumn((*missing).to_string()));
    }

    reader
        .deserialize::<RawMentionRow>()
        .map(|row| Ok(row?.mask_unknown(unknown_sentinel)))
        .collect()
}

/// Load the raw mention table from disk
pub fn load_raw_table(path: &Path, unknown_sentinel: &str) -> Result<Vec<RawMentionRow>> {
    let start = Instant::now();
    log_table_start("Reading raw mentions", path);
    let file = safe_open_file(path, "raw mention table")?;
    let rows = read_raw_table(io::BufReader::new(file), unknown_sentinel)?;
    log_table_done("Read", path, rows.len(), start.elapsed());
    Ok(rows)
}

/// Group raw rows into one form per patient, in patient order
#[must_use]
pub fn aggregate_forms(rows: &[RawMentionRow], diagnostics: &Diagnostics) -> Vec<PatientForm> {
    let forms = MentionAggregator::new(diagnostics).aggregate(rows);
    log::info!(
        "Aggregated {} mention rows into {} patients with {} distinct variants",
        rows.len(),
        forms.len(),
        forms.iter().map(PatientForm::variant_count).sum::<usize>()
    );
    forms
}

/// Serialize forms into the output table.
///
/// In smoke-test mode only the first forms are kept and their identifiers
/// are prefixed.
#[must_use]
pub fn serialize_table(
    forms: &[PatientForm],
    config: &ConversionConfig,
    diagnostics: &Diagnostics,
) -> OutputTable {
    let forms = match config.row_limit() {
        Some(limit) => &forms[..forms.len().min(limit)],
        None => forms,
    };

    let classifier = VariantClassifier::new();
    let mut serializer = RowSerializer::new(&classifier, diagnostics)
        .with_truncation_warnings(config.warn_on_truncation);
    if let Some(prefix) = config.id_prefix() {
        serializer = serializer.with_id_prefix(prefix);
    }

    let table = OutputTable {
        headers: header_row(serializer.schema(), config.header_style),
        rows: serialize_forms(&serializer, forms, config.show_progress),
    };
    log::debug!(
        "Classified {} distinct significance strings",
        classifier.cached()
    );
    table
}

/// Aggregate and serialize raw rows into the output table
#[must_use]
pub fn build_output_table(
    rows: &[RawMentionRow],
    config: &ConversionConfig,
    diagnostics: &Diagnostics,
) -> OutputTable {
    serialize_table(&aggregate_forms(rows, diagnostics), config, diagnostics)
}

fn header_row(schema: &RedcapSchema, style: HeaderStyle) -> Vec<String> {
    schema.headers(style).into_iter().map(str::to_string).collect()
}

fn serialize_forms(
    serializer: &RowSerializer<'_>,
    forms: &[PatientForm],
    show_progress: bool,
) -> Vec<Vec<Cell>> {
    let pb = create_main_progress_bar(
        forms.len() as u64,
        Some("Serializing patients"),
        show_progress,
    );
    let rows = forms
        .par_iter()
        .progress_with(pb.clone())
        .map(|form| serializer.serialize(form))
        .collect();
    finish_progress_bar(&pb, Some("Serialized patients"));
    rows
}

/// Write the output table to `path`
pub fn write_output_table(table: &OutputTable, path: &Path) -> Result<()> {
    let start = Instant::now();
    log_table_start(
        &format!("Writing REDCap upload, schema {}", RedcapSchema::global()),
        path,
    );
    let file = safe_create_file(path)?;
    table.write_csv(io::BufWriter::new(file))?;
    log_table_done("Wrote", path, table.len(), start.elapsed());
    Ok(())
}

/// Run a full conversion as described by `config`
pub fn convert(config: &ConversionConfig, diagnostics: &Diagnostics) -> Result<ConversionReport> {
    ensure_supported(config.input_format, config.output_format)?;
    log::debug!("{config}");

    let rows = load_raw_table(&config.data_location, &config.unknown_sentinel)?;
    let forms = aggregate_forms(&rows, diagnostics);
    let table = serialize_table(&forms, config, diagnostics);

    ensure_directory(&config.output_dir, "output")?;
    let output_path = config.output_path();
    write_output_table(&table, &output_path)?;

    if let Some(report_path) = &config.diagnostics_report {
        let json = diagnostics.to_json()?;
        std::fs::write(report_path, json).map_err(|e| ConvertError::io(report_path, e))?;
        log::info!("Wrote diagnostics report to {}", report_path.display());
    }
    log_diagnostics_summary(diagnostics);

    Ok(ConversionReport {
        patients: forms.len(),
        unresolved_patients: forms
            .iter()
            .filter(|form| !form.patient_id.is_resolved())
            .count(),
        rows_written: table.len(),
        output_path,
        schema_version: RedcapSchema::global().version(),
        diagnostics: diagnostics.records(),
    })
}
