//! Groups of raw lines produced by the segmenter.

use std::io::{self, Write};

/// An ordered run of raw input lines, aligned on entry boundaries.
///
/// Every line keeps its original bytes, including the line terminator.
/// A group with no entries is a preamble of orphan lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineGroup {
    lines: Vec<Vec<u8>>,
    entries: usize,
    first_line: usize,
    byte_len: usize,
}

impl LineGroup {
    pub(crate) fn new(first_line: usize) -> Self {
        Self {
            first_line,
            ..Self::default()
        }
    }

    pub(crate) fn push_entry(&mut self, line: Vec<u8>) {
        self.entries += 1;
        self.push_line(line);
    }

    pub(crate) fn push_line(&mut self, line: Vec<u8>) {
        self.byte_len += line.len();
        self.lines.push(line);
    }

    /// Raw lines in input order.
    pub fn lines(&self) -> &[Vec<u8>] {
        &self.lines
    }

    /// Number of entry-start lines in the group.
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// 1-based input line number of the first line.
    pub fn first_line(&self) -> usize {
        self.first_line
    }

    /// Total size of the group in bytes.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True for a group of orphan lines that precede the first entry.
    pub fn is_preamble(&self) -> bool {
        self.entries == 0 && !self.lines.is_empty()
    }

    /// Write the lines verbatim to `out`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in &self.lines {
            out.write_all(line)?;
        }
        Ok(())
    }

    /// Concatenated bytes of all lines.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.byte_len);
        for line in &self.lines {
            bytes.extend_from_slice(line);
        }
        bytes
    }
}
