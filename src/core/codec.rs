// RoleLens - core/codec.rs
//
// Reading and writing the audit report CSV format.
//
// The reader is deliberately narrower than RFC 4180: a double quote only
// toggles quoting (no "" escape), records end at the first newline even
// inside quotes, and every field is trimmed, quoted or not. Report
// generators never emit the cases this does not cover.
//
// The writer quotes a field when it contains a comma or a quote. The csv
// crate also quotes fields holding `\r` or `\n`, and a record made of one
// empty field; neither changes what the reader gets back.

use crate::core::model::{Dataset, Row};
use std::io::Write;

/// UTF-8 byte-order mark written by spreadsheet "CSV UTF-8" exports.
const BOM: char = '\u{feff}';

/// Field trim: Unicode whitespace plus stray byte-order marks.
fn trim_field(field: &str) -> String {
    field
        .trim_matches(|c: char| c.is_whitespace() || c == BOM)
        .to_string()
}

/// Split one line into trimmed fields.
pub fn parse_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(trim_field(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(trim_field(&current));
    fields
}

/// Parse a whole report. A leading byte-order mark is ignored. Line 0 is the
/// header row; later lines whose field count differs from the header count
/// are dropped.
pub fn parse(text: &str) -> Dataset {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut lines = text.trim().split('\n');
    let headers = lines.next().map(parse_line).unwrap_or_default();

    let candidates = lines
        .filter(|line| !line.is_empty())
        .map(parse_line);

    let dataset = Dataset::new(headers, candidates);
    tracing::debug!(
        columns = dataset.headers().len(),
        rows = dataset.len(),
        "Parsed report"
    );
    dataset
}

/// Write the header row followed by `rows` to `writer`.
///
/// Returns the number of data rows written.
pub fn write_csv<'a, W, I>(headers: &[String], rows: I, writer: W) -> Result<usize, csv::Error>
where
    W: Write,
    I: IntoIterator<Item = &'a Row>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);

    csv_writer.write_record(headers)?;

    let mut count = 0;
    for row in rows {
        csv_writer.write_record(row.values())?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Serialise to an in-memory CSV string.
pub fn serialize<'a, I>(headers: &[String], rows: I) -> String
where
    I: IntoIterator<Item = &'a Row>,
{
    let mut buf = Vec::new();
    // A Vec sink never reports an I/O failure.
    if let Err(e) = write_csv(headers, rows, &mut buf) {
        tracing::error!(error = %e, "In-memory CSV serialisation failed");
    }
    String::from_utf8_lossy(&buf).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line_simple() {
        assert_eq!(parse_line("GET,/a,DENIED"), vec!["GET", "/a", "DENIED"]);
    }

    #[test]
    fn test_parse_line_quoted_comma() {
        assert_eq!(
            parse_line(r#"GET,"/search?q=a,b",DENIED"#),
            vec!["GET", "/search?q=a,b", "DENIED"]
        );
    }

    #[test]
    fn test_parse_line_trims_inside_quotes() {
        assert_eq!(parse_line(r#"  GET , "  /a  " ,x"#), vec!["GET", "/a", "x"]);
    }

    #[test]
    fn test_parse_line_doubled_quote_is_not_an_escape() {
        // "a""b" toggles quoting four times and keeps neither quote.
        assert_eq!(parse_line(r#""a""b",c"#), vec!["ab", "c"]);
    }

    #[test]
    fn test_parse_line_unterminated_quote_swallows_commas() {
        assert_eq!(parse_line(r#"GET,"/a,DENIED"#), vec!["GET", "/a,DENIED"]);
    }

    #[test]
    fn test_parse_line_empty_fields() {
        assert_eq!(parse_line(",,"), vec!["", "", ""]);
        assert_eq!(parse_line(""), vec![""]);
    }

    #[test]
    fn test_parse_headers_and_rows() {
        let dataset = parse("Method,URL,Unauth\nGET,/a,ACCESSIBLE\nPOST,/b,DENIED\n");
        assert_eq!(dataset.headers(), ["Method", "URL", "Unauth"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[1].method(), "POST");
    }

    #[test]
    fn test_parse_drops_short_row_silently() {
        let dataset = parse("Method,URL,Unauth\nGET,/a\nPOST,/b,DENIED");
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows()[0].url(), "/b");
    }

    #[test]
    fn test_parse_skips_blank_lines_and_crlf() {
        let dataset = parse("\r\nMethod,URL,Admin\r\n\r\nGET,/a,DENIED\r\n\nPUT,/b,ERROR\r\n");
        assert_eq!(dataset.headers(), ["Method", "URL", "Admin"]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows()[0].values(), ["GET", "/a", "DENIED"]);
    }

    #[test]
    fn test_parse_embedded_newline_breaks_record() {
        let dataset = parse("Method,URL,Admin\nGET,\"/a\n/b\",DENIED\n");
        // Both halves have the wrong field count.
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_parse_ignores_byte_order_mark() {
        let dataset = parse("\u{feff}Method,URL,Unauth\r\nGET,/a,DENIED\r\n");
        assert_eq!(dataset.headers(), ["Method", "URL", "Unauth"]);
        assert_eq!(dataset.len(), 1);
        let text = serialize(dataset.headers(), dataset.rows());
        assert_eq!(text, "Method,URL,Unauth\nGET,/a,DENIED\n");
    }

    #[test]
    fn test_parse_line_trims_byte_order_mark() {
        assert_eq!(parse_line("\u{feff} Method ,URL\u{feff}"), vec!["Method", "URL"]);
    }

    #[test]
    fn test_parse_empty_text() {
        let dataset = parse("");
        assert_eq!(dataset.headers(), [""]);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_serialize_quotes_only_when_needed() {
        let dataset = parse("Method,URL,Admin\nGET,\"/a,b\",DENIED\nGET,/plain,ok");
        let text = serialize(dataset.headers(), dataset.rows());
        assert_eq!(
            text,
            "Method,URL,Admin\nGET,\"/a,b\",DENIED\nGET,/plain,ok\n"
        );
    }

    #[test]
    fn test_serialize_doubles_quotes() {
        let dataset = Dataset::new(
            vec!["Method".into(), "URL".into()],
            vec![vec!["GET".into(), "/say\"hi\"".into()]],
        );
        let text = serialize(dataset.headers(), dataset.rows());
        assert_eq!(text, "Method,URL\nGET,\"/say\"\"hi\"\"\"\n");
    }

    #[test]
    fn test_serialize_extra_quoting_reads_back_unchanged() {
        let dataset = Dataset::new(
            vec!["Method".into(), "URL".into()],
            vec![vec!["GET".into(), "/a\rb".into()]],
        );
        let text = serialize(dataset.headers(), dataset.rows());
        assert_eq!(text, "Method,URL\nGET,\"/a\rb\"\n");
        assert_eq!(parse(&text), dataset);

        let single = Dataset::new(vec!["Method".into()], vec![vec![String::new()]]);
        let text = serialize(single.headers(), single.rows());
        assert_eq!(text, "Method\n\"\"\n");
        assert_eq!(parse(&text), single);
    }

    #[test]
    fn test_round_trip_preserves_headers_and_rows() {
        let original = parse(
            "Method,URL,Unauth User,Admin\n\
             GET,/api/users,ACCESSIBLE,ACCESSIBLE\n\
             DELETE,\"/api/items?ids=1,2\",DENIED,REDIRECT\n\
             OPTIONS,/api,TIMEOUT,ERROR",
        );
        let text = serialize(original.headers(), original.rows());
        let reparsed = parse(&text);
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_write_csv_counts_rows() {
        let dataset = parse("Method,URL\nGET,/a\nGET,/b");
        let mut buf = Vec::new();
        let count = write_csv(dataset.headers(), dataset.rows(), &mut buf).unwrap();
        assert_eq!(count, 2);
        assert!(String::from_utf8(buf).unwrap().starts_with("Method,URL\n"));
    }
}
