// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Pistonite

use std::fs::File;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use cu::pre::*;

/// Number of bytes read from the file at a time
pub const WINDOW: usize = 255;

/// The first line of a file, and the window read right after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstLines {
    /// The first line, including the `\n` if one was found.
    /// A NUL byte also ends the line but is not included
    pub first: Vec<u8>,
    /// Absolute position the second window was read from
    pub offset: u64,
    /// Up to [`WINDOW`] bytes starting at `offset`, as read
    pub rest: Vec<u8>,
}

impl FirstLines {
    /// Write the first line, then the second window, then a newline
    pub fn write_to(&self, mut out: impl Write) -> cu::Result<()> {
        cu::check!(out.write_all(&self.first), "failed to write the first line")?;
        cu::check!(out.write_all(&self.rest), "failed to write the second window")?;
        cu::check!(out.write_all(b"\n"), "failed to write the final newline")?;
        cu::check!(out.flush(), "failed to flush output")
    }
}

/// Open the file at `path` and write its first lines to `out`.
///
/// The file is closed before returning, on success or error
pub fn run(path: &Path, out: impl Write) -> cu::Result<()> {
    let shown = path.display();
    let file = cu::check!(File::open(path), "failed to open '{shown}'")?;
    let lines = cu::check!(extract(file), "failed to read '{shown}'")?;
    lines.write_to(out)
}

/// Read the first line and the window following it.
///
/// The first line is scanned one window at a time. A window that is
/// exactly full without a terminator means the line continues, so
/// another window is read. Scanning stops at the first `\n`, NUL, or
/// at the end of the input.
pub fn extract<R: Read + Seek>(mut reader: R) -> cu::Result<FirstLines> {
    cu::check!(reader.rewind(), "failed to seek to the start")?;
    let mut first = Vec::new();
    let mut scanned = 0u64;
    let offset = loop {
        let window = read_window(&mut reader)?;
        match window.iter().position(|b| matches!(b, b'\n' | 0)) {
            Some(i) => {
                let end = if window[i] == b'\n' { i + 1 } else { i };
                first.extend_from_slice(&window[..end]);
                // one past the terminator, NUL included
                break scanned + i as u64 + 1;
            }
            None => {
                first.extend_from_slice(&window);
                scanned += window.len() as u64;
                if window.len() < WINDOW {
                    break scanned;
                }
            }
        }
    };

    cu::check!(
        reader.seek(SeekFrom::Start(offset)),
        "failed to seek to offset {offset}"
    )?;
    let rest = read_window(&mut reader)?;

    Ok(FirstLines {
        first,
        offset,
        rest,
    })
}

/// Read until the window is full or the input ends
fn read_window(reader: &mut impl Read) -> cu::Result<Vec<u8>> {
    let mut window = Vec::with_capacity(WINDOW);
    cu::check!(
        reader.by_ref().take(WINDOW as u64).read_to_end(&mut window),
        "failed to read {WINDOW} bytes"
    )?;
    Ok(window)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn extract_bytes(input: &[u8]) -> FirstLines {
        extract(Cursor::new(input.to_vec())).unwrap()
    }

    fn output_of(input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        extract_bytes(input).write_to(&mut out).unwrap();
        out
    }

    #[test]
    fn test_two_lines() {
        let lines = extract_bytes(b"hello\nworld");
        assert_eq!(lines.first, b"hello\n");
        assert_eq!(lines.offset, 6);
        assert_eq!(lines.rest, b"world");
        assert_eq!(output_of(b"hello\nworld"), b"hello\nworld\n");
    }

    #[test]
    fn test_rest_is_not_split_on_lines() {
        let lines = extract_bytes(b"a\nb\nc\n");
        assert_eq!(lines.first, b"a\n");
        assert_eq!(lines.rest, b"b\nc\n");
    }

    #[test]
    fn test_nul_ends_first_line() {
        let lines = extract_bytes(b"abc\0def\nghi");
        assert_eq!(lines.first, b"abc");
        assert_eq!(lines.offset, 4);
        assert_eq!(lines.rest, b"def\nghi");
    }

    #[test]
    fn test_no_newline() {
        let lines = extract_bytes(b"just one line");
        assert_eq!(lines.first, b"just one line");
        assert_eq!(lines.offset, 13);
        assert!(lines.rest.is_empty());
        assert_eq!(output_of(b"just one line"), b"just one line\n");
    }

    #[test]
    fn test_empty() {
        let lines = extract_bytes(b"");
        assert!(lines.first.is_empty());
        assert_eq!(lines.offset, 0);
        assert_eq!(output_of(b""), b"\n");
    }

    #[test]
    fn test_first_line_exactly_one_window() {
        let mut input = vec![b'x'; WINDOW];
        input.extend_from_slice(b"\nnext");
        let lines = extract_bytes(&input);
        assert_eq!(lines.first.len(), WINDOW + 1);
        assert_eq!(lines.first.last(), Some(&b'\n'));
        assert_eq!(lines.offset, WINDOW as u64 + 1);
        assert_eq!(lines.rest, b"next");
    }

    #[test]
    fn test_first_line_spans_windows() {
        let mut input = vec![b'y'; WINDOW * 2 + 10];
        input.push(b'\n');
        input.extend_from_slice(b"tail");
        let lines = extract_bytes(&input);
        assert_eq!(lines.first.len(), WINDOW * 2 + 11);
        assert_eq!(lines.rest, b"tail");
    }

    #[test]
    fn test_file_is_exactly_one_window() {
        let input = vec![b'z'; WINDOW];
        let lines = extract_bytes(&input);
        assert_eq!(lines.first.len(), WINDOW);
        assert_eq!(lines.offset, WINDOW as u64);
        assert!(lines.rest.is_empty());
    }

    #[test]
    fn test_rest_is_capped_at_window() {
        let mut input = b"head\n".to_vec();
        input.extend(std::iter::repeat_n(b'r', WINDOW + 100));
        let lines = extract_bytes(&input);
        assert_eq!(lines.rest.len(), WINDOW);
    }

    #[test]
    fn test_reader_not_at_start() {
        let mut cursor = Cursor::new(b"one\ntwo".to_vec());
        cursor.set_position(5);
        let lines = extract(cursor).unwrap();
        assert_eq!(lines.first, b"one\n");
        assert_eq!(lines.rest, b"two");
    }
}
