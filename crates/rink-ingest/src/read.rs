//! Roster file reading and text decoding.

use std::path::Path;

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};
use rink_model::ParsedTable;

use crate::csv::parse;
use crate::error::{IngestError, Result};

/// Maximum roster file size (50 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Check file size before loading.
pub fn check_file_size(path: &Path) -> Result<()> {
    check_file_size_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Check file size against a custom limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| IngestError::io(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Reads a roster file as text using the default size limit.
pub fn read_csv_text(path: &Path) -> Result<String> {
    read_csv_text_with_limit(path, MAX_CSV_FILE_SIZE)
}

/// Reads a roster file as text, rejecting files above `max_size` bytes.
pub fn read_csv_text_with_limit(path: &Path, max_size: u64) -> Result<String> {
    check_file_size_with_limit(path, max_size)?;
    let bytes = std::fs::read(path).map_err(|e| IngestError::io(path, e))?;
    decode_csv_bytes(&bytes, path)
}

/// Decodes raw file bytes.
///
/// A UTF-8 byte-order mark is dropped. UTF-16 files are rejected. Bytes that
/// are not valid UTF-8 are decoded as Windows-1252, which is what
/// spreadsheet software commonly writes for French-language exports.
pub fn decode_csv_bytes(bytes: &[u8], path: &Path) -> Result<String> {
    let mut body = bytes;
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        if encoding != UTF_8 {
            return Err(IngestError::UnsupportedEncoding {
                path: path.to_path_buf(),
                encoding: encoding.name(),
            });
        }
        body = &bytes[bom_len..];
    }

    match std::str::from_utf8(body) {
        Ok(text) => {
            tracing::debug!(path = %path.display(), encoding = "UTF-8", "decoded roster file");
            Ok(text.to_string())
        }
        Err(_) => {
            let (text, had_errors) = WINDOWS_1252.decode_without_bom_handling(body);
            tracing::warn!(
                path = %path.display(),
                encoding = WINDOWS_1252.name(),
                had_errors,
                "roster file is not valid UTF-8, decoded with fallback encoding"
            );
            Ok(text.into_owned())
        }
    }
}

/// Reads and parses a roster file.
pub fn parse_csv_file(path: &Path) -> Result<ParsedTable> {
    let text = read_csv_text(path)?;
    Ok(parse(&text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_file(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_utf8() {
        let file = create_temp_file("Prénom,Nom\nJean,Tremblay\n".as_bytes());
        let text = read_csv_text(file.path()).unwrap();
        assert!(text.starts_with("Prénom"));
    }

    #[test]
    fn test_read_strips_utf8_bom() {
        let file = create_temp_file(b"\xEF\xBB\xBFA,B\n1,2\n");
        let text = read_csv_text(file.path()).unwrap();
        assert_eq!(text, "A,B\n1,2\n");
    }

    #[test]
    fn test_read_windows_1252_fallback() {
        // "Prénom" with é as the single byte 0xE9.
        let file = create_temp_file(b"Pr\xE9nom,Nom\n");
        let text = read_csv_text(file.path()).unwrap();
        assert_eq!(text, "Prénom,Nom\n");
    }

    #[test]
    fn test_read_rejects_utf16() {
        let file = create_temp_file(b"\xFF\xFEA\x00,\x00B\x00");
        let result = read_csv_text(file.path());
        assert!(matches!(
            result,
            Err(IngestError::UnsupportedEncoding {
                encoding: "UTF-16LE",
                ..
            })
        ));
    }

    #[test]
    fn test_size_limit() {
        let file = create_temp_file(b"A,B\n1,2\n");
        let result = read_csv_text_with_limit(file.path(), 4);
        assert!(matches!(result, Err(IngestError::FileTooLarge { size: 8, .. })));
        assert!(check_file_size(file.path()).is_ok());
    }

    #[test]
    fn test_missing_file() {
        let result = read_csv_text(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_parse_csv_file() {
        let file = create_temp_file(b"A,B\n1,2\n3\n");
        let table = parse_csv_file(file.path()).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.parse_errors.len(), 1);
    }
}
