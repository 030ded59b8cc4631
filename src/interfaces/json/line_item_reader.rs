use crate::domain::line_item::LineItem;
use crate::error::Result;
use std::io::{BufRead, BufReader, ErrorKind, Read};

/// Reads line items from newline-delimited JSON.
///
/// Each non-blank line holds one line item. A malformed line, including one
/// that is not valid UTF-8, yields an error for that line only and reading
/// continues with the next one. Any other I/O error is yielded once and ends
/// the stream.
pub struct LineItemReader<R: Read> {
    reader: BufReader<R>,
}

impl<R: Read> LineItemReader<R> {
    /// Creates a new `LineItemReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        Self {
            reader: BufReader::new(source),
        }
    }

    /// Returns an iterator that lazily reads and deserializes line items.
    pub fn line_items(self) -> impl Iterator<Item = Result<LineItem>> {
        let mut failed = false;
        self.reader
            .lines()
            .map_while(move |line| {
                if failed {
                    return None;
                }
                if let Err(err) = &line
                    && err.kind() != ErrorKind::InvalidData
                {
                    failed = true;
                }
                Some(line)
            })
            .filter(|line| !matches!(line, Ok(text) if text.trim().is_empty()))
            .map(|line| -> Result<LineItem> { Ok(serde_json::from_str(&line?)?) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_reader_valid_stream() {
        let data = concat!(
            r#"{"id": 1, "list_price": "200", "steps": [{"order": 1, "kind": "percentage", "value": "20"}]}"#,
            "\n\n",
            r#"{"id": 2, "catalog": 4, "list_price": 10}"#,
            "\n"
        );
        let reader = LineItemReader::new(data.as_bytes());
        let results: Vec<Result<LineItem>> = reader.line_items().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(first.steps.len(), 1);
        let second = results[1].as_ref().unwrap();
        assert_eq!(second.catalog, Some(4));
        assert_eq!(
            second.list_price.as_ref().and_then(|p| p.to_decimal()),
            Some(dec!(10))
        );
    }

    struct BrokenSource;

    impl Read for BrokenSource {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("device unplugged"))
        }
    }

    #[test]
    fn test_reader_stops_after_io_error() {
        let reader = LineItemReader::new(BrokenSource);
        let results: Vec<Result<LineItem>> = reader.line_items().take(5).collect();

        assert_eq!(results.len(), 1);
        assert!(results[0].is_err());
    }

    #[test]
    fn test_reader_skips_invalid_utf8_line() {
        let data: &[u8] = b"\xff\xfe\n{\"id\": 2}\n";
        let reader = LineItemReader::new(data);
        let results: Vec<Result<LineItem>> = reader.line_items().collect();

        assert_eq!(results.len(), 2);
        assert!(results[0].is_err());
        assert_eq!(results[1].as_ref().unwrap().id, 2);
    }

    #[test]
    fn test_reader_malformed_line() {
        let data = "{\"id\": 1\nnot json\n{\"id\": 3}";
        let reader = LineItemReader::new(data.as_bytes());
        let results: Vec<Result<LineItem>> = reader.line_items().collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_err());
        assert!(results[1].is_err());
        assert_eq!(results[2].as_ref().unwrap().id, 3);
    }
}
