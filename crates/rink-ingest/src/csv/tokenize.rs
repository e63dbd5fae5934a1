//! Quote-aware splitting of a single CSV line.

/// Splits one CSV line into raw fields.
///
/// Commas inside double quotes do not split, and `""` inside a quoted
/// section is a literal quote. Fields are returned untrimmed; the last
/// field is always emitted, so a trailing comma yields an empty field.
pub fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => {
                in_quotes = !in_quotes;
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => {
                current.push(c);
            }
        }
    }

    fields.push(current);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_simple() {
        assert_eq!(split_csv_line("a,b,c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_split_quoted_comma() {
        assert_eq!(split_csv_line("a,\"b,c\",d"), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_split_escaped_quote() {
        assert_eq!(split_csv_line("a,\"b\"\"c\",d"), vec!["a", "b\"c", "d"]);
    }

    #[test]
    fn test_split_trailing_comma() {
        assert_eq!(split_csv_line("a,b,"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_split_keeps_whitespace() {
        assert_eq!(split_csv_line("  a  , b "), vec!["  a  ", " b "]);
    }

    #[test]
    fn test_split_empty_line() {
        assert_eq!(split_csv_line(""), vec![""]);
    }

    #[test]
    fn test_unterminated_quote_swallows_rest_of_line() {
        assert_eq!(split_csv_line("a,\"b,c"), vec!["a", "b,c"]);
    }

    #[test]
    fn test_double_quote_outside_quotes_toggles_twice() {
        // `""` outside quotes opens and closes an empty quoted section.
        assert_eq!(split_csv_line("a\"\"b,c"), vec!["ab", "c"]);
    }
}
