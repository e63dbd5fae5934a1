//! Roster import pipeline with explicit stages.
//!
//! 1. **Configure**: load the optional TOML import configuration
//! 2. **Ingest**: read and tokenize the roster CSV
//! 3. **Map**: auto-map headers, or apply a saved mapping
//! 4. **Materialize**: convert rows into player records
//! 5. **Output**: write records as JSON
//!
//! Each stage takes the output of the previous stage and returns typed results.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info, info_span, trace, warn};

use rink_ingest::parse_csv_file;
use rink_map::{FieldMapper, ImportConfig, MappingRepository, MappingResult, SavedMapping};
use rink_model::{ParsedTable, PlayerRecord};

use crate::logging::redact_value;

// ============================================================================
// Stage 1: Configure
// ============================================================================

/// Loads the import configuration, falling back to built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<ImportConfig> {
    let Some(path) = path else {
        debug!("no configuration file, using defaults");
        return Ok(ImportConfig::default());
    };
    let config = ImportConfig::load(path)
        .with_context(|| format!("load configuration {}", path.display()))?;
    info!(
        path = %path.display(),
        extra_synonyms = config.synonyms.len(),
        replaced_synonyms = config.synonyms_replace.len(),
        "configuration loaded"
    );
    Ok(config)
}

// ============================================================================
// Stage 2: Ingest
// ============================================================================

/// Reads a roster file and rejects tables with no usable header row.
///
/// Per-line column-count problems are kept on the table; only an empty
/// file or a missing header stops the import.
pub fn ingest(path: &Path) -> Result<ParsedTable> {
    let table = parse_csv_file(path).with_context(|| format!("read {}", path.display()))?;
    if table.headers.is_empty() {
        let reason = table
            .parse_errors
            .first()
            .cloned()
            .unwrap_or_else(|| "No headers found in the file".to_string());
        bail!("{}: {reason}", path.display());
    }
    for error in &table.parse_errors {
        warn!(file = %path.display(), "{error}");
    }
    info!(
        file = %path.display(),
        columns = table.headers.len(),
        rows = table.row_count(),
        rejected = table.parse_errors.len(),
        "roster ingested"
    );
    Ok(table)
}

// ============================================================================
// Stage 3: Map
// ============================================================================

/// Maps the table's headers.
///
/// A saved mapping, when given, replaces auto-mapping entirely.
pub fn map_columns(
    table: &ParsedTable,
    config: &ImportConfig,
    saved: Option<&SavedMapping>,
) -> Result<MappingResult> {
    let result = match saved {
        Some(saved) => {
            debug!(mapping = %saved.name, "applying saved mapping");
            saved.apply_to(&table.headers)
        }
        None => {
            let catalog = config.catalog().context("build attribute catalog")?;
            FieldMapper::new(catalog).auto_map(&table.headers)
        }
    };
    for key in &result.missing_required {
        warn!(attribute = %key, "required attribute has no column");
    }
    info!(
        mapped = result.mappings.len(),
        unmapped = result.unmapped_columns.len(),
        missing_required = result.missing_required.len(),
        "columns mapped"
    );
    Ok(result)
}

/// Loads a named mapping from the repository.
pub fn load_saved_mapping(repository: &MappingRepository, name: &str) -> Result<SavedMapping> {
    repository
        .load(name)
        .with_context(|| format!("load saved mapping {name}"))?
        .with_context(|| {
            format!(
                "no saved mapping named {name} in {}",
                repository.base_dir().display()
            )
        })
}

// ============================================================================
// Stage 4: Materialize
// ============================================================================

/// Converts rows into records using the configured `is_active` policy.
pub fn materialize(
    table: &ParsedTable,
    mapping: &MappingResult,
    config: &ImportConfig,
) -> Vec<PlayerRecord> {
    let records = config
        .materializer()
        .materialize(&table.rows, &mapping.mappings);
    for (index, record) in records.iter().enumerate() {
        trace!(
            row = index + 1,
            first_name = redact_value(&record.first_name),
            last_name = redact_value(&record.last_name),
            "record built"
        );
    }
    records
}

// ============================================================================
// Stage 5: Output
// ============================================================================

/// Writes records as a pretty-printed JSON array.
pub fn write_records<W: Write>(writer: &mut W, records: &[PlayerRecord]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, records).context("serialize records")?;
    writeln!(writer).context("write records")?;
    Ok(())
}

// ============================================================================
// Full import
// ============================================================================

/// Inputs for a complete import run.
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    pub input: PathBuf,
    pub config: Option<PathBuf>,
    /// Directory of the mapping repository.
    pub mapping_dir: PathBuf,
    /// Saved mapping to apply instead of auto-mapping.
    pub use_mapping: Option<String>,
    /// Name under which to save the mapping used.
    pub save_mapping: Option<String>,
    /// Fail on missing required attributes or rejected lines.
    pub strict: bool,
}

/// Everything an import run produced.
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub input: PathBuf,
    pub mapping: MappingResult,
    pub records: Vec<PlayerRecord>,
    pub parse_errors: Vec<String>,
    /// Where the mapping was saved, when requested.
    pub saved_mapping: Option<PathBuf>,
}

/// Runs every stage except output.
pub fn run_import(options: &ImportOptions) -> Result<ImportOutcome> {
    let span = info_span!("import", file = %options.input.display());
    let _guard = span.enter();

    let config = load_config(options.config.as_deref())?;
    let table = ingest(&options.input)?;

    let repository = if options.use_mapping.is_some() || options.save_mapping.is_some() {
        Some(
            MappingRepository::new(&options.mapping_dir).with_context(|| {
                format!("open mapping directory {}", options.mapping_dir.display())
            })?,
        )
    } else {
        None
    };
    let saved = match (&repository, &options.use_mapping) {
        (Some(repository), Some(name)) => Some(load_saved_mapping(repository, name)?),
        _ => None,
    };
    let mapping = map_columns(&table, &config, saved.as_ref())?;

    if options.strict {
        check_strict(&mapping, &table)?;
    }

    let saved_mapping = match (&repository, &options.save_mapping) {
        (Some(repository), Some(name)) => {
            let path = repository
                .save(&SavedMapping::new(name.clone(), mapping.mappings.clone()))
                .with_context(|| format!("save mapping {name}"))?;
            info!(path = %path.display(), "mapping saved");
            Some(path)
        }
        _ => None,
    };

    let records = materialize(&table, &mapping, &config);
    info!(records = records.len(), "import complete");

    Ok(ImportOutcome {
        input: options.input.clone(),
        mapping,
        records,
        parse_errors: table.parse_errors,
        saved_mapping,
    })
}

fn check_strict(mapping: &MappingResult, table: &ParsedTable) -> Result<()> {
    if !mapping.missing_required.is_empty() {
        let names: Vec<&str> = mapping
            .missing_required
            .iter()
            .map(|key| key.as_str())
            .collect();
        bail!("required attributes not mapped: {}", names.join(", "));
    }
    if table.has_errors() {
        bail!("{} line(s) rejected while parsing", table.parse_errors.len());
    }
    Ok(())
}
