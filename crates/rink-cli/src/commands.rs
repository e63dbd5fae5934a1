use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use rink_cli::pipeline::{
    ImportOptions, ImportOutcome, ingest, load_config, map_columns, run_import, write_records,
};

use crate::cli::{MapArgs, MaterializeArgs};
use crate::summary::{print_catalog, print_import_summary, print_mapping};

/// Shows the auto-mapping for a file without materializing it.
pub fn run_map(args: &MapArgs, config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let table = ingest(&args.input)?;
    let result = map_columns(&table, &config, None)?;
    if args.json {
        let json = serde_json::to_string_pretty(&result).context("serialize mapping result")?;
        println!("{json}");
    } else {
        print_mapping(&result, &table.parse_errors);
    }
    Ok(())
}

/// Imports a file and writes its records.
pub fn run_materialize(
    args: &MaterializeArgs,
    config_path: Option<&Path>,
) -> Result<ImportOutcome> {
    let options = ImportOptions {
        input: args.input.clone(),
        config: config_path.map(Path::to_path_buf),
        mapping_dir: args.mapping_dir.clone(),
        use_mapping: args.mapping.clone(),
        save_mapping: args.save_mapping.clone(),
        strict: args.strict,
    };
    let outcome = run_import(&options)?;
    match &args.output {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_records(&mut writer, &outcome.records)?;
            writer
                .flush()
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "records written");
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_records(&mut handle, &outcome.records)?;
        }
    }
    print_import_summary(&outcome);
    Ok(outcome)
}

pub fn run_catalog(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let catalog = config.catalog().context("build attribute catalog")?;
    print_catalog(&catalog);
    Ok(())
}
