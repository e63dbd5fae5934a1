//! Roster CSV ingestion.
//!
//! This crate turns the raw text of a roster export into a
//! [`ParsedTable`](rink_model::ParsedTable): a header row, string-keyed data
//! rows and a list of structural diagnostics.
//!
//! # Example
//!
//! ```ignore
//! use rink_ingest::parse;
//!
//! let table = parse("Prénom,Nom\nJean,Tremblay\n");
//! assert_eq!(table.headers, vec!["Prénom", "Nom"]);
//! assert!(table.parse_errors.is_empty());
//! ```

mod csv;
mod error;
mod read;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Parsing ===
pub use csv::{parse, split_csv_line};

// === File Reading ===
pub use read::{
    MAX_CSV_FILE_SIZE, check_file_size, check_file_size_with_limit, decode_csv_bytes,
    parse_csv_file, read_csv_text, read_csv_text_with_limit,
};
