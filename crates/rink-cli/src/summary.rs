use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use rink_map::{ConfidenceLevel, ConfidenceThresholds, MappingResult, TargetCatalog};
use rink_model::FieldMapping;

use rink_cli::pipeline::ImportOutcome;

/// Prints the mapping table followed by unmapped columns, missing
/// attributes and rejected lines.
pub fn print_mapping(result: &MappingResult, parse_errors: &[String]) {
    println!("{}", mapping_table(result));
    if !result.unmapped_columns.is_empty() {
        println!("Unmapped columns: {}", result.unmapped_columns.join(", "));
    }
    if !result.missing_required.is_empty() {
        let names: Vec<&str> = result
            .missing_required
            .iter()
            .map(|key| key.as_str())
            .collect();
        println!("Missing required attributes: {}", names.join(", "));
    }
    print_parse_errors(parse_errors);
}

/// Prints the import summary to stderr so stdout stays valid JSON.
pub fn print_import_summary(outcome: &ImportOutcome) {
    eprintln!("Input: {}", outcome.input.display());
    eprintln!("{}", mapping_table(&outcome.mapping));
    eprintln!("Records: {}", outcome.records.len());
    if let Some(path) = &outcome.saved_mapping {
        eprintln!("Mapping saved: {}", path.display());
    }
    if !outcome.mapping.unmapped_columns.is_empty() {
        eprintln!(
            "Unmapped columns: {}",
            outcome.mapping.unmapped_columns.join(", ")
        );
    }
    if !outcome.mapping.missing_required.is_empty() {
        let names: Vec<&str> = outcome
            .mapping
            .missing_required
            .iter()
            .map(|key| key.as_str())
            .collect();
        eprintln!("Missing required attributes: {}", names.join(", "));
    }
    if !outcome.parse_errors.is_empty() {
        eprintln!("Rejected lines:");
        for error in &outcome.parse_errors {
            eprintln!("- {error}");
        }
    }
}

fn print_parse_errors(errors: &[String]) {
    if errors.is_empty() {
        return;
    }
    println!("Rejected lines:");
    for error in errors {
        println!("- {error}");
    }
}

pub fn mapping_table(result: &MappingResult) -> Table {
    let thresholds = ConfidenceThresholds::default();
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Attribute"),
        header_cell("Confidence"),
        header_cell("Level"),
        header_cell("Match"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for mapping in &result.mappings {
        table.add_row(mapping_row(mapping, &thresholds));
    }
    for column in &result.unmapped_columns {
        table.add_row(vec![
            Cell::new(column),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("unmapped"),
        ]);
    }
    table
}

fn mapping_row(mapping: &FieldMapping, thresholds: &ConfidenceThresholds) -> Vec<Cell> {
    let level = thresholds.categorize(mapping.confidence);
    let attribute = Cell::new(mapping.target_attribute.as_str());
    let attribute = if mapping.target_attribute.is_required() {
        attribute.add_attribute(Attribute::Bold)
    } else {
        attribute
    };
    vec![
        Cell::new(&mapping.source_column),
        attribute,
        Cell::new(format!("{:.2}", mapping.confidence)),
        level_cell(level),
        Cell::new(mapping.match_kind.as_str()),
    ]
}

/// Prints every target attribute with its synonyms.
pub fn print_catalog(catalog: &TargetCatalog) {
    let mut table = Table::new();
    table.set_header(vec!["Attribute", "Required", "Synonyms"]);
    apply_table_style(&mut table);
    for attribute in catalog.attributes() {
        table.add_row(vec![
            Cell::new(attribute.key.as_str()),
            Cell::new(if attribute.required { "yes" } else { "" }),
            Cell::new(attribute.synonyms.join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn level_cell(level: Option<ConfidenceLevel>) -> Cell {
    match level {
        Some(level) => Cell::new(level.as_str()).fg(level_color(level)),
        None => dim_cell("-"),
    }
}

fn level_color(level: ConfidenceLevel) -> Color {
    match level {
        ConfidenceLevel::High => Color::Green,
        ConfidenceLevel::Medium => Color::Yellow,
        ConfidenceLevel::Low => Color::Red,
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rink_map::auto_map;

    #[test]
    fn mapping_table_lists_mapped_and_unmapped_columns() {
        let headers = vec!["Prénom".to_string(), "Xyz".to_string()];
        let rendered = mapping_table(&auto_map(&headers)).to_string();
        assert!(rendered.contains("first_name"));
        assert!(rendered.contains("1.00"));
        assert!(rendered.contains("unmapped"));
    }
}
