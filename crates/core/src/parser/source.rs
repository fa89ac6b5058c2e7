//! Forward-only line sources with one line of lookahead.
//!
//! Mapping files can be large, so parsers never buffer a whole file: they
//! peek at the next line to decide whether it still belongs to the current
//! record, and take it only when it does.

use std::io::{self, BufRead};

pub trait LineSource {
    /// The next line without consuming it.
    fn peek_line(&self) -> Option<&str>;

    /// Consume and return the next line.
    fn take_line(&mut self) -> Option<String>;

    /// 1-based number of the line most recently taken (0 before the first).
    fn line_number(&self) -> usize {
        0
    }

    /// Read failure that ended the stream early, if any.
    fn take_error(&mut self) -> Option<io::Error> {
        None
    }
}

/// [`LineSource`] over any buffered reader. Line terminators (`\n`, `\r\n`)
/// are stripped.
pub struct PeekableLines<R> {
    reader: R,
    next: Option<String>,
    taken: usize,
    error: Option<io::Error>,
}

impl<R: BufRead> PeekableLines<R> {
    pub fn new(reader: R) -> Self {
        let mut lines = Self {
            reader,
            next: None,
            taken: 0,
            error: None,
        };
        lines.next = lines.read_next();
        lines
    }

    fn read_next(&mut self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        let mut buf = String::new();
        match self.reader.read_line(&mut buf) {
            Ok(0) => None,
            Ok(_) => {
                if buf.ends_with('\n') {
                    buf.pop();
                    if buf.ends_with('\r') {
                        buf.pop();
                    }
                }
                Some(buf)
            }
            Err(e) => {
                self.error = Some(e);
                None
            }
        }
    }
}

impl<'a> PeekableLines<&'a [u8]> {
    /// In-memory source, mostly for tests and small inputs.
    pub fn from_text(text: &'a str) -> Self {
        Self::new(text.as_bytes())
    }
}

impl<R: BufRead> LineSource for PeekableLines<R> {
    fn peek_line(&self) -> Option<&str> {
        self.next.as_deref()
    }

    fn take_line(&mut self) -> Option<String> {
        let current = self.next.take()?;
        self.taken += 1;
        self.next = self.read_next();
        Some(current)
    }

    fn line_number(&self) -> usize {
        self.taken
    }

    fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_then_take() {
        let mut lines = PeekableLines::from_text("first\r\nsecond\n\nlast");
        assert_eq!(lines.peek_line(), Some("first"));
        assert_eq!(lines.peek_line(), Some("first"));
        assert_eq!(lines.take_line().as_deref(), Some("first"));
        assert_eq!(lines.line_number(), 1);
        assert_eq!(lines.take_line().as_deref(), Some("second"));
        assert_eq!(lines.take_line().as_deref(), Some(""));
        assert_eq!(lines.take_line().as_deref(), Some("last"));
        assert_eq!(lines.peek_line(), None);
        assert_eq!(lines.take_line(), None);
        assert_eq!(lines.line_number(), 4);
    }

    struct FailingReader;

    impl io::Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "connection reset"))
        }
    }

    #[test]
    fn test_read_error_ends_stream() {
        let mut lines = PeekableLines::new(io::BufReader::new(FailingReader));
        assert_eq!(lines.peek_line(), None);
        let err = lines.take_error().unwrap();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
