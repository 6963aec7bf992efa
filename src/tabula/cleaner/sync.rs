use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::tabula::cleaner::clean::clean_table;
use crate::tabula::cleaner::error::{Result, ToolError};
use crate::tabula::cleaner::export::{ExportArtifact, export_labelled};
use crate::tabula::cleaner::io::ingest;
use crate::tabula::cleaner::model::{CleanTable, FillPolicy};

/// Base name used for the exported file when none is given.
pub const DEFAULT_OUTPUT_NAME: &str = "cleaned_file";
/// Export format label used when none is given.
pub const DEFAULT_FORMAT_LABEL: &str = "Excel";

/// Settings for a single cleaning run.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    pub fill: FillPolicy,
    pub output_name: String,
    pub format: String,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            fill: FillPolicy::default(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            format: DEFAULT_FORMAT_LABEL.to_string(),
        }
    }
}

/// Result of a cleaning run: the cleaned table and, when the requested format
/// was recognised, the serialized export.
#[derive(Debug, Clone)]
pub struct CleanRun {
    pub table: CleanTable,
    pub artifact: Option<ExportArtifact>,
}

/// Ingests, cleans and exports an in-memory file.
#[instrument(
    level = "info",
    skip_all,
    fields(file = %file_name, size = bytes.len(), fill = %options.fill, format = %options.format)
)]
pub fn clean_bytes(bytes: &[u8], file_name: &str, options: &CleanOptions) -> Result<CleanRun> {
    let table = ingest(bytes, file_name)?;
    let table = clean_table(table, options.fill);
    info!(
        columns = table.columns.len(),
        rows = table.row_count(),
        "table cleaned"
    );

    let artifact = export_labelled(&table, &options.output_name, &options.format)?;
    Ok(CleanRun { table, artifact })
}

/// Reads `input` from disk and runs [`clean_bytes`] on its contents.
#[instrument(level = "info", skip_all, fields(input = %input.display()))]
pub fn clean_file(input: &Path, options: &CleanOptions) -> Result<CleanRun> {
    if !input.exists() {
        return Err(ToolError::MissingInput(input.to_path_buf()));
    }
    let bytes = fs::read(input)?;
    let file_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    clean_bytes(&bytes, &file_name, options)
}

/// Writes `artifact` into `dir` under its file name and returns the path.
#[instrument(
    level = "info",
    skip_all,
    fields(file = %artifact.file_name, dir = %dir.display())
)]
pub fn write_artifact(artifact: &ExportArtifact, dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.file_name);
    fs::write(&path, &artifact.bytes)?;
    info!(size = artifact.bytes.len(), mime = artifact.mime, "export written");
    Ok(path)
}
