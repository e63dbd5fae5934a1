//! CSV parsing.

mod parser;
mod tokenize;

pub use parser::parse;
pub use tokenize::split_csv_line;
