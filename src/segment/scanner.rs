//! Single-pass line scanner that groups entries into bounded chunks.

use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::trace;

use super::group::LineGroup;
use super::pattern::BoundaryPattern;
use super::{OrphanPolicy, ScanError};

/// Counters collected while scanning.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SegmentStats {
    pub lines_read: usize,
    pub entries: usize,
    pub orphans_dropped: usize,
    pub groups_emitted: usize,
}

/// Streaming segmenter over any buffered reader.
///
/// Yields one [`LineGroup`] per chunk. Only the group being accumulated (and,
/// under [`OrphanPolicy::Preamble`], the buffered orphan lines) is held in
/// memory.
///
/// # Example
///
/// ```
/// use logseg::segment::{BoundaryPattern, Segmenter};
///
/// let input = "E1 start\nE2 start\n  at frame\nE3 start\n";
/// let pattern = BoundaryPattern::new("E").unwrap();
/// let groups: Vec<_> = Segmenter::new(input.as_bytes(), pattern, 2)
///     .collect::<Result<_, _>>()
///     .unwrap();
///
/// assert_eq!(groups.len(), 2);
/// assert_eq!(groups[0].to_bytes(), b"E1 start\nE2 start\n  at frame\n");
/// assert_eq!(groups[1].to_bytes(), b"E3 start\n");
/// ```
pub struct Segmenter<R> {
    reader: R,
    pattern: BoundaryPattern,
    max_entries: usize,
    orphan_policy: OrphanPolicy,
    cancel: Option<Arc<AtomicBool>>,
    current: Option<LineGroup>,
    preamble: Option<LineGroup>,
    line_no: usize,
    stats: SegmentStats,
    finished: bool,
}

impl<R: BufRead> Segmenter<R> {
    /// Create a segmenter emitting at most `max_entries` entries per group.
    ///
    /// A `max_entries` of zero is treated as one.
    pub fn new(reader: R, pattern: BoundaryPattern, max_entries: usize) -> Self {
        Self {
            reader,
            pattern,
            max_entries: max_entries.max(1),
            orphan_policy: OrphanPolicy::default(),
            cancel: None,
            current: None,
            preamble: None,
            line_no: 0,
            stats: SegmentStats::default(),
            finished: false,
        }
    }

    /// Set how lines before the first entry are handled.
    pub fn orphan_policy(mut self, policy: OrphanPolicy) -> Self {
        self.orphan_policy = policy;
        self
    }

    /// Stop with [`ScanError::Cancelled`] once `flag` is set.
    ///
    /// The flag is checked before every line read.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Counters for the lines consumed so far.
    pub fn stats(&self) -> SegmentStats {
        self.stats
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Classify one line, returning a group if it completed one.
    fn consume(&mut self, line: Vec<u8>) -> Option<LineGroup> {
        if self.pattern.is_entry_start(&line) {
            self.stats.entries += 1;

            let has_room = self
                .current
                .as_ref()
                .is_some_and(|group| group.entry_count() < self.max_entries);
            if has_room {
                if let Some(group) = self.current.as_mut() {
                    group.push_entry(line);
                }
                return None;
            }

            let mut fresh = LineGroup::new(self.line_no);
            fresh.push_entry(line);
            trace!(line = self.line_no, "opening new group");

            // The first entry flushes any buffered preamble instead.
            let done = match self.current.replace(fresh) {
                Some(full) => Some(full),
                None => self.preamble.take(),
            };
            return done.map(|group| self.emit(group));
        }

        if let Some(group) = self.current.as_mut() {
            group.push_line(line);
            return None;
        }

        match self.orphan_policy {
            OrphanPolicy::Drop => {
                self.stats.orphans_dropped += 1;
                trace!(line = self.line_no, "dropping orphan line");
            }
            OrphanPolicy::Preamble => {
                let line_no = self.line_no;
                self.preamble
                    .get_or_insert_with(|| LineGroup::new(line_no))
                    .push_line(line);
            }
        }
        None
    }

    fn emit(&mut self, group: LineGroup) -> LineGroup {
        self.stats.groups_emitted += 1;
        group
    }

    fn finish(&mut self) -> Option<LineGroup> {
        let last = self.preamble.take().or_else(|| self.current.take());
        last.filter(|group| !group.is_empty())
            .map(|group| self.emit(group))
    }
}

impl<R: BufRead> Iterator for Segmenter<R> {
    type Item = Result<LineGroup, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            if self.is_cancelled() {
                self.finished = true;
                return Some(Err(ScanError::Cancelled {
                    line: self.line_no,
                }));
            }

            let mut line = Vec::new();
            match self.reader.read_until(b'\n', &mut line) {
                Ok(0) => {
                    self.finished = true;
                    return self.finish().map(Ok);
                }
                Ok(_) => {
                    self.line_no += 1;
                    self.stats.lines_read += 1;
                    if let Some(group) = self.consume(line) {
                        return Some(Ok(group));
                    }
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.finished = true;
                    return Some(Err(ScanError::Io {
                        line: self.line_no + 1,
                        source: e,
                    }));
                }
            }
        }
    }
}
