//! Tallying values of `tag:` markers in plain text, one line at a time.

use std::{fmt, io::BufRead};

use crate::{open, Error, FrequencyStore, Result};

/// Scans a text source for lines containing a tag and counts what's left of
/// each after the `tag:` marker is cut out.
#[derive(Clone, Debug)]
pub struct LineParser {
    source_id: String,
    // Never advanced by line scanning, the summary line reports it as is.
    processed: usize,
    lines_read: usize,
    matched: usize,
}

impl LineParser {
    pub fn new(source_id: impl Into<String>) -> Self {
        LineParser {
            source_id: source_id.into(),
            processed: 0,
            lines_read: 0,
            matched: 0,
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    /// Total lines scanned so far.
    pub fn lines_read(&self) -> usize {
        self.lines_read
    }

    /// Lines that contained the tag and were added to a store.
    pub fn matched(&self) -> usize {
        self.matched
    }

    /// Open the source and scan it to the end.
    pub fn parse(
        &mut self,
        tag: &str,
        store: &mut FrequencyStore,
    ) -> Result<()> {
        log::debug!("parse: scanning {:?} for {tag:?}", self.source_id);
        let reader = open(&self.source_id)?;
        self.parse_reader(reader, tag, store)
    }

    /// Scan lines from `reader` until end of input.
    ///
    /// The store holds a partial tally until this returns.
    pub fn parse_reader(
        &mut self,
        mut reader: impl BufRead,
        tag: &str,
        store: &mut FrequencyStore,
    ) -> Result<()> {
        let marker = format!("{tag}:");

        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf).map_err(|e| {
                Error::SourceLoad {
                    source_id: self.source_id.clone(),
                    source: e,
                }
            })?;
            if n == 0 {
                break;
            }

            let mut bytes = &buf[..];
            if let Some(b) = bytes.strip_suffix(b"\n") {
                bytes = b.strip_suffix(b"\r").unwrap_or(b);
            }
            // Stray bytes in log files turn into U+FFFD instead of failing.
            let line = String::from_utf8_lossy(bytes);
            self.lines_read += 1;

            if !line.contains(tag) {
                continue;
            }

            self.matched += 1;
            store.add(line.replacen(&marker, "", 1));
        }

        log::debug!(
            "parse_reader: {} of {} lines matched {tag:?}",
            self.matched,
            self.lines_read
        );
        Ok(())
    }
}

impl fmt::Display for LineParser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Feature Count: {}", self.processed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(input: &str, tag: &str) -> (LineParser, FrequencyStore) {
        let mut parser = LineParser::new("test");
        let mut store = FrequencyStore::new();
        parser
            .parse_reader(input.as_bytes(), tag, &mut store)
            .unwrap();
        (parser, store)
    }

    #[test]
    fn test_tagged_lines() {
        let (parser, store) = tally(
            "\"user\":\"caleb\"\nirrelevant line\n\"user\":\"dana\"\n",
            "\"user\"",
        );

        assert_eq!(store.count("\"caleb\""), 1);
        assert_eq!(store.count("\"dana\""), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(parser.lines_read(), 3);
        assert_eq!(parser.matched(), 2);

        // Line scanning leaves the feature count alone.
        assert_eq!(parser.processed(), 0);
        assert_eq!(parser.to_string(), "Feature Count: 0");
    }

    #[test]
    fn test_increments_match_tagged_lines() {
        let input = "user: a\nfoo\nbar user baz\n\nuser: a\nuser:\n";
        let (parser, store) = tally(input, "user");

        let expected = input.lines().filter(|l| l.contains("user")).count();
        assert_eq!(store.total(), expected);
        assert_eq!(parser.matched(), expected);

        assert_eq!(store.count(" a"), 2);
        // Tag present without the colon, nothing gets cut.
        assert_eq!(store.count("bar user baz"), 1);
        assert_eq!(store.count(""), 1);
    }

    #[test]
    fn test_first_marker_only() {
        let (_, store) = tally("\"user\":\"user\":x", "\"user\"");
        assert_eq!(store.count("\"user\":x"), 1);

        // Surrounding text stays.
        let (_, store) = tally("  {\"user\": \"eve\"},", "\"user\"");
        assert_eq!(store.count("  { \"eve\"},"), 1);
    }

    #[test]
    fn test_crlf() {
        let (parser, store) = tally("user:a\r\nuser:b\r\n\r\nuser:a", "user");
        assert_eq!(parser.lines_read(), 4);
        assert_eq!(store.count("a"), 2);
        assert_eq!(store.count("b"), 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_invalid_utf8() {
        let input: &[u8] = b"\"user\":\"caleb\"\ncaf\xe9 log line\n\
            \"user\":\"dana\"\n\"user\":r\xe9my\n";

        let mut parser = LineParser::new("test");
        let mut store = FrequencyStore::new();
        parser.parse_reader(input, "\"user\"", &mut store).unwrap();

        assert_eq!(parser.lines_read(), 4);
        assert_eq!(parser.matched(), 3);
        assert_eq!(store.count("\"caleb\""), 1);
        assert_eq!(store.count("\"dana\""), 1);
        assert_eq!(store.count("r\u{FFFD}my"), 1);
    }

    #[test]
    fn test_stable() {
        let input = "x user:1\nuser:2 user:3\n";
        let (_, a) = tally(input, "user");
        let (_, b) = tally(input, "user");
        assert_eq!(a, b);
    }

    #[test]
    fn test_no_matches() {
        let (parser, store) = tally("nothing\nto see\n", "\"user\"");
        assert!(store.is_empty());
        assert_eq!(parser.lines_read(), 2);
        assert_eq!(parser.matched(), 0);
    }

    #[test]
    fn test_parse_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, "\"user\":\"caleb\"\n\"user\":\"caleb\"\n")
            .unwrap();

        let mut parser = LineParser::new(path.to_string_lossy());
        let mut store = FrequencyStore::new();
        parser.parse("\"user\"", &mut store).unwrap();
        assert_eq!(store.count("\"caleb\""), 2);

        let mut parser =
            LineParser::new(dir.path().join("nope.txt").to_string_lossy());
        assert!(matches!(
            parser.parse("\"user\"", &mut store),
            Err(Error::SourceLoad { .. })
        ));
    }
}
