//! Roster CSV parsing into a [`ParsedTable`].

use rink_model::{ParsedTable, RawRow};
use tracing::{debug, info};

use super::tokenize::split_csv_line;

/// Parses the full text of a roster CSV.
///
/// Lines are split before tokenization, so quoted fields cannot span lines.
/// Blank lines are skipped. A data line whose field count differs from the
/// header count is rejected with a diagnostic naming its 1-based line number;
/// the remaining lines are still parsed. This function never fails: every
/// structural problem ends up in `parse_errors`.
pub fn parse(raw: &str) -> ParsedTable {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| (idx + 1, line));

    let Some((_, header_line)) = lines.next() else {
        debug!("csv input has no non-blank lines");
        return ParsedTable::failed("The file is empty");
    };

    let headers: Vec<String> = split_csv_line(header_line)
        .iter()
        .map(|field| field.trim().to_string())
        .collect();
    if headers.iter().all(String::is_empty) {
        debug!("csv header line has no column names");
        return ParsedTable::failed("No headers found in the file");
    }

    let mut rows = Vec::new();
    let mut parse_errors = Vec::new();
    for (line_number, line) in lines {
        let fields = split_csv_line(line);
        if fields.len() != headers.len() {
            debug!(
                line = line_number,
                found = fields.len(),
                expected = headers.len(),
                "rejecting csv line with wrong column count"
            );
            parse_errors.push(format!(
                "Line {line_number}: found {} columns, expected {}",
                fields.len(),
                headers.len()
            ));
            continue;
        }
        let row: RawRow = headers
            .iter()
            .zip(fields)
            .map(|(header, value)| (header.clone(), value.trim().to_string()))
            .collect();
        rows.push(row);
    }

    info!(
        columns = headers.len(),
        rows = rows.len(),
        rejected = parse_errors.len(),
        "parsed csv input"
    );

    ParsedTable {
        headers,
        rows,
        parse_errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let table = parse("A,B\n1,2\n3,4\n");
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1]["A"], "3");
        assert!(table.parse_errors.is_empty());
    }

    #[test]
    fn test_parse_empty_input() {
        for input in ["", "\n\n", "   \n\t\n"] {
            let table = parse(input);
            assert!(table.headers.is_empty());
            assert!(table.rows.is_empty());
            assert_eq!(table.parse_errors, vec!["The file is empty"]);
        }
    }

    #[test]
    fn test_parse_no_headers() {
        let table = parse(" , ,\n1,2,3\n");
        assert!(table.headers.is_empty());
        assert!(table.rows.is_empty());
        assert_eq!(table.parse_errors, vec!["No headers found in the file"]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let table = parse("\n\nA,B\n\n1,2\n   \n3,4\n\n");
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows.len(), 2);
        assert!(table.parse_errors.is_empty());
    }

    #[test]
    fn test_parse_line_numbers_count_blank_lines() {
        let table = parse("A,B\n\n1\n");
        assert!(table.rows.is_empty());
        assert_eq!(table.parse_errors, vec!["Line 3: found 1 columns, expected 2"]);
    }

    #[test]
    fn test_parse_trims_headers_and_values() {
        let table = parse(" First , Last \n  Jean ,\" Tremblay \"\n");
        assert_eq!(table.headers, vec!["First", "Last"]);
        assert_eq!(table.rows[0]["First"], "Jean");
        assert_eq!(table.rows[0]["Last"], "Tremblay");
    }

    #[test]
    fn test_parse_crlf() {
        let table = parse("A,B\r\n1,2\r\n");
        assert_eq!(table.headers, vec!["A", "B"]);
        assert_eq!(table.rows[0]["B"], "2");
    }

    #[test]
    fn test_parse_strips_bom() {
        let table = parse("\u{feff}Prénom,Nom\nJean,Tremblay\n");
        assert_eq!(table.headers, vec!["Prénom", "Nom"]);
    }

    #[test]
    fn test_parse_duplicate_headers_last_value_wins_in_row() {
        let table = parse("Nom,Nom\nTremblay,Dubois\n");
        assert_eq!(table.headers, vec!["Nom", "Nom"]);
        assert_eq!(table.rows[0].len(), 1);
        assert_eq!(table.rows[0]["Nom"], "Dubois");
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse("A,B\n");
        assert_eq!(table.headers, vec!["A", "B"]);
        assert!(table.rows.is_empty());
        assert!(table.parse_errors.is_empty());
    }
}
