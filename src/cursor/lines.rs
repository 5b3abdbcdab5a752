use std::io::{self, BufRead};

use super::{exhausted, Cursor};

/// Reads a stream line by line, keeping empty lines and stripping only the
/// line terminator.
#[derive(Debug)]
pub struct Lines<R> {
    reader: R,
    line: String,
    number: usize,
    end: bool,
    error: Option<io::Error>,
}

pub fn lines<R: BufRead>(reader: R) -> Lines<R> {
    Lines::new(reader)
}

impl<R: BufRead> Lines<R> {
    pub fn new(reader: R) -> Self {
        let mut lines = Self::at_end(reader);
        lines.end = false;
        lines.advance();
        lines
    }

    /// An end sentinel. The reader is not touched.
    pub fn at_end(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
            number: 0,
            end: true,
            error: None,
        }
    }

    /// 1-based number of the current line.
    pub fn line_number(&self) -> usize {
        self.number
    }

    /// The read error that ended the stream, if any.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> Cursor for Lines<R> {
    type Item = String;

    fn current(&self) -> &String {
        if self.end {
            exhausted::<Self>()
        }
        &self.line
    }

    fn advance(&mut self) {
        if self.end {
            return;
        }
        self.line.clear();
        match self.reader.read_line(&mut self.line) {
            Ok(0) => {
                tracing::debug!("Line source exhausted after {} lines", self.number);
                self.end = true;
            }
            Ok(_) => {
                if self.line.ends_with('\n') {
                    self.line.pop();
                    if self.line.ends_with('\r') {
                        self.line.pop();
                    }
                }
                self.number += 1;
                tracing::trace!("Read line {}: {:?}", self.number, self.line);
            }
            Err(e) => {
                tracing::warn!("Failed to read line {}: {}", self.number + 1, e);
                self.line.clear();
                self.error = Some(e);
                self.end = true;
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.end
    }
}

impl<R: BufRead, O: Cursor> PartialEq<O> for Lines<R> {
    fn eq(&self, other: &O) -> bool {
        self.ended_with(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    #[test]
    fn reads_lines_without_terminators() {
        let mut lines = lines("header0 header1 header2\n  2.5 3.7   4.2\n".as_bytes());
        assert_eq!(lines.current(), "header0 header1 header2");
        assert_eq!(lines.line_number(), 1);
        lines.advance();
        assert_eq!(lines.current(), "  2.5 3.7   4.2");
        assert_eq!(lines.line_number(), 2);
        lines.advance();
        assert!(lines.is_at_end());
    }

    #[test]
    fn last_line_without_newline_is_kept() {
        let values = lines("a\r\nb".as_bytes()).values().collect::<Vec<_>>();
        assert_eq!(values, vec!["a", "b"]);
    }

    #[test]
    fn empty_lines_are_values() {
        let values = lines("a\n\n\n".as_bytes()).values().collect::<Vec<_>>();
        assert_eq!(values, vec!["a", "", ""]);
    }

    #[test]
    fn empty_stream_starts_at_end() {
        let lines = lines(io::empty());
        assert!(lines.is_at_end());
        assert!(lines.try_current().is_err());
    }

    #[test]
    fn is_at_end_does_not_advance() {
        let mut lines = lines("only\n".as_bytes());
        for _ in 0..3 {
            assert!(!lines.is_at_end());
            assert_eq!(lines.current(), "only");
        }
        lines.advance();
        for _ in 0..3 {
            assert!(lines.is_at_end());
        }
    }

    #[test]
    fn end_sentinel_does_not_read() {
        let mut reader = "untouched\n".as_bytes();
        let sentinel = Lines::at_end(&mut reader);
        assert!(sentinel.is_at_end());
        drop(sentinel);
        assert_eq!(reader, b"untouched\n");
    }

    #[test]
    fn borrowed_reader_resumes_after_cursor() {
        let mut reader = "one\ntwo\nthree\n".as_bytes();
        {
            let lines = lines(&mut reader);
            assert_eq!(lines.current(), "one");
        }
        let rest = lines(&mut reader).values().collect::<Vec<_>>();
        assert_eq!(rest, vec!["two", "three"]);
    }

    #[test]
    fn read_error_ends_stream() {
        let mut lines = lines(&b"ok\n\xff\xfe\nlater\n"[..]);
        assert_eq!(lines.current(), "ok");
        lines.advance();
        assert!(lines.is_at_end());
        let err = lines.take_error().expect("invalid UTF-8 should be reported");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        lines.advance();
        assert!(lines.is_at_end());
        assert!(lines.take_error().is_none());
    }

    proptest! {
        #[test]
        fn test_k_lines_k_values(content in prop::collection::vec("[^\r\n]*", 0..20)) {
            let text = content.iter().map(|l| format!("{l}\n")).collect::<String>();
            let mut lines = lines(text.as_bytes());
            for expected in &content {
                prop_assert!(!lines.is_at_end());
                prop_assert_eq!(lines.current(), expected);
                lines.advance();
            }
            prop_assert!(lines.is_at_end());
            lines.advance();
            prop_assert!(lines.is_at_end());
            prop_assert_eq!(lines.line_number(), content.len());
        }
    }
}
