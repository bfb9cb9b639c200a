use csv::ReaderBuilder;
use tracing::{debug, error, info};
use crate::domain::{
    error::ImportError,
    models::{CsvDocument, RawRow},
};

const BOM: char = '\u{feff}';
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Splits raw file content into trimmed headers and raw rows.
///
/// The first non-blank record becomes the header row. Data records whose
/// cells are all blank are skipped and counted in `skipped_rows`. Row numbers
/// are the 1-based source line at which each record starts.
pub fn parse_csv(text: &str) -> Result<CsvDocument, ImportError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    if text.trim().is_empty() {
        debug!("CSV input is empty after BOM strip");
        return Err(ImportError::EmptyInput);
    }

    let delimiter = detect_delimiter(text);
    debug!("Creating CSV reader with delimiter {:?}", delimiter as char);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut headers: Option<Vec<String>> = None;
    let mut rows = Vec::new();
    let mut skipped_rows = 0;
    let mut lines = LineCounter::new(text.as_bytes());

    for (index, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            error!("Failed to read CSV record {}: {}", index + 1, e);
            ImportError::Parse(e.to_string())
        })?;
        let row_number = match record.position() {
            Some(position) => lines.line_at(position.byte() as usize),
            None => index + 1,
        };
        let cells: Vec<String> = record.iter().map(str::to_string).collect();

        match headers {
            None => {
                if cells.iter().all(|c| c.trim().is_empty()) {
                    continue;
                }
                let normalized: Vec<String> = cells.iter().map(|c| normalize_header(c)).collect();
                debug!("CSV headers on line {}: {:?}", row_number, normalized);
                headers = Some(normalized);
            }
            Some(_) => {
                let row = RawRow { row_number, cells };
                if row.is_blank() {
                    debug!("Skipping blank row {}", row_number);
                    skipped_rows += 1;
                    continue;
                }
                rows.push(row);
            }
        }
    }

    let headers = headers.ok_or(ImportError::EmptyInput)?;
    if rows.is_empty() {
        debug!("CSV has headers but no data rows ({} skipped)", skipped_rows);
        return Err(ImportError::NoDataRows);
    }

    info!(
        "Parsed {} rows across {} columns ({} blank rows skipped)",
        rows.len(),
        headers.len(),
        skipped_rows
    );
    Ok(CsvDocument {
        headers,
        rows,
        skipped_rows,
        delimiter,
    })
}

/// Picks the candidate delimiter occurring most often in the first non-blank line.
pub fn detect_delimiter(text: &str) -> u8 {
    let first_line = text.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    let mut best = b',';
    let mut best_count = 0;
    for candidate in CANDIDATE_DELIMITERS {
        let count = first_line.bytes().filter(|b| *b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// Maps record start offsets to 1-based source lines.
///
/// The reader reports a CRLF-terminated record as starting on the `\n` of the
/// previous line, so line breaks at the offset are skipped before counting.
/// Offsets must be queried in increasing order.
struct LineCounter<'a> {
    bytes: &'a [u8],
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self {
            bytes,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        let mut start = offset.min(self.bytes.len());
        while start < self.bytes.len() && matches!(self.bytes[start], b'\r' | b'\n') {
            start += 1;
        }
        if start > self.offset {
            self.line += self.bytes[self.offset..start].iter().filter(|b| **b == b'\n').count();
            self.offset = start;
        }
        self.line
    }
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_trims_headers() {
        let doc = parse_csv("\u{feff} Product ID , \"Brand\" ,'Category'\nP1,Acme,Audio").unwrap();
        assert_eq!(doc.headers, vec!["Product ID", "Brand", "Category"]);
        assert_eq!(doc.rows.len(), 1);
        assert_eq!(doc.rows[0].row_number, 2);
    }

    #[test]
    fn handles_crlf_and_quoted_fields() {
        let text = "Name,Notes\r\n\"Smith, John\",\"Said \"\"hi\"\"\nthen left\"\r\nDoe,plain\r\n";
        let doc = parse_csv(text).unwrap();
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.rows[0].cells, vec!["Smith, John", "Said \"hi\"\nthen left"]);
        assert_eq!(doc.rows[0].row_number, 2);
        assert_eq!(doc.rows[1].row_number, 4);
    }

    #[test]
    fn crlf_rows_are_numbered_by_source_line() {
        let doc = parse_csv("A,B\r\n1,2\r\n , \r\n3,4\r\n\r\n5,6\r\n").unwrap();
        let numbers: Vec<usize> = doc.rows.iter().map(|r| r.row_number).collect();
        assert_eq!(numbers, vec![2, 4, 6]);
        assert_eq!(doc.skipped_rows, 1);
    }

    #[test]
    fn line_counter_skips_leading_breaks() {
        let text = b"h\r\na\r\n\nb";
        let mut lines = LineCounter::new(text);
        assert_eq!(lines.line_at(0), 1);
        assert_eq!(lines.line_at(2), 2);
        assert_eq!(lines.line_at(5), 4);
    }

    #[test]
    fn empty_input_fails() {
        assert_eq!(parse_csv("").unwrap_err(), ImportError::EmptyInput);
        assert_eq!(parse_csv("\u{feff}  \n ").unwrap_err(), ImportError::EmptyInput);
    }

    #[test]
    fn header_only_input_fails() {
        assert_eq!(
            parse_csv("Product ID,Brand\n").unwrap_err(),
            ImportError::NoDataRows
        );
    }

    #[test]
    fn blank_rows_are_skipped_and_counted() {
        let doc = parse_csv("A,B\n1,2\n , \n3,4").unwrap();
        assert_eq!(doc.rows.len(), 2);
        assert_eq!(doc.skipped_rows, 1);
        assert_eq!(doc.rows[1].row_number, 4);
    }

    #[test]
    fn detects_semicolon_and_tab_delimiters() {
        assert_eq!(detect_delimiter("a;b;c\n1;2;3"), b';');
        assert_eq!(detect_delimiter("a\tb\n"), b'\t');
        assert_eq!(detect_delimiter("single"), b',');
        let doc = parse_csv("A;B\n1;2").unwrap();
        assert_eq!(doc.rows[0].cells, vec!["1", "2"]);
    }
}
