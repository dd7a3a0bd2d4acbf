//! Line-at-a-time JSONL reading.
//!
//! Only one raw line is buffered at a time, so transcripts of any size can be
//! scanned with constant memory. Blank lines are skipped; lines that are not
//! valid JSON (including invalid UTF-8) are reported, not fatal.

use std::borrow::Cow;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

/// One non-blank line of a JSONL stream.
#[derive(Debug)]
pub struct Line {
    /// 1-based line number in the file
    pub number: usize,
    pub parsed: Result<Value, serde_json::Error>,
}

/// Iterator over the non-blank lines of a JSONL reader.
pub struct JsonlReader<R> {
    reader: R,
    buf: Vec<u8>,
    line_number: usize,
}

impl JsonlReader<BufReader<fs::File>> {
    /// Open a JSONL file for sequential reading.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file =
            fs::File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> JsonlReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line_number: 0,
        }
    }
}

impl<R: BufRead> Iterator for JsonlReader<R> {
    type Item = io::Result<Line>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }
            self.line_number += 1;

            let trimmed = self.buf.trim_ascii();
            if trimmed.is_empty() {
                continue;
            }

            return Some(Ok(Line {
                number: self.line_number,
                parsed: parse_line(trimmed),
            }));
        }
    }
}

/// Parse one JSON line.
///
/// serde_json rejects a `\ud83d` escape without its low half, which shows up
/// when a transcript cut an emoji in two. Such lines are retried once with
/// every unpaired surrogate escape replaced by `\ufffd`; the original error is
/// kept if that fails too.
pub fn parse_line(bytes: &[u8]) -> Result<Value, serde_json::Error> {
    serde_json::from_slice(bytes).or_else(|err| match replace_lone_surrogates(bytes) {
        Cow::Owned(repaired) => serde_json::from_slice(&repaired).map_err(|_| err),
        Cow::Borrowed(_) => Err(err),
    })
}

const REPLACEMENT_ESCAPE: &[u8] = br"\ufffd";

fn replace_lone_surrogates(bytes: &[u8]) -> Cow<'_, [u8]> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut changed = false;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'\\' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        match utf16_escape(bytes, i) {
            Some(0xD800..=0xDBFF)
                if matches!(utf16_escape(bytes, i + 6), Some(0xDC00..=0xDFFF)) =>
            {
                out.extend_from_slice(&bytes[i..i + 12]);
                i += 12;
            }
            Some(0xD800..=0xDFFF) => {
                out.extend_from_slice(REPLACEMENT_ESCAPE);
                changed = true;
                i += 6;
            }
            _ => {
                // Any other escape, `\\` included, is copied as a pair
                let end = (i + 2).min(bytes.len());
                out.extend_from_slice(&bytes[i..end]);
                i = end;
            }
        }
    }

    if changed {
        Cow::Owned(out)
    } else {
        Cow::Borrowed(bytes)
    }
}

/// Code unit of the `\uXXXX` escape starting at `at`.
fn utf16_escape(bytes: &[u8], at: usize) -> Option<u16> {
    let hex = bytes.get(at..at + 6)?.strip_prefix(b"\\u")?;
    u16::from_str_radix(std::str::from_utf8(hex).ok()?, 16).ok()
}
