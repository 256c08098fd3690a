//! Reference records and the table that collects them.

use std::ops::Range;

/// Default upper bound on the number of records kept from one scan.
pub const DEFAULT_MAX_RECORDS: usize = 100;

/// A byte range into the captured output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// First byte.
    pub start: usize,
    /// One past the last byte.
    pub stop: usize,
}

impl Span {
    /// Create a span; `stop` must not precede `start`.
    #[inline]
    pub const fn new(start: usize, stop: usize) -> Self {
        debug_assert!(stop >= start);
        Self { start, stop }
    }

    /// Shift both ends by `offset`.
    #[inline]
    pub const fn offset_by(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.stop + offset)
    }

    /// Length in bytes.
    #[inline]
    pub const fn len(self) -> usize {
        self.stop - self.start
    }

    /// Check if the span covers no bytes.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.stop
    }

    /// The span as a range, for slicing.
    #[inline]
    pub const fn range(self) -> Range<usize> {
        self.start..self.stop
    }

    /// Slice `text` by this span.
    ///
    /// # Panics
    ///
    /// Panics if the span lies outside `text`.
    #[inline]
    pub fn slice(self, text: &[u8]) -> &[u8] {
        &text[self.range()]
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// One file reference found in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRecord {
    /// The whole match, which is what gets highlighted.
    pub matched: Span,
    /// The path.
    pub path: Span,
    /// The line number, if the pattern captured one.
    pub line: Option<Span>,
    /// The column number, if the pattern captured one.
    pub column: Option<Span>,
    /// Index of the search root the path was found under; `None` means the
    /// path is used as written.
    pub root: Option<usize>,
}

impl ReferenceRecord {
    /// The path bytes as text.
    pub fn path_text(self, text: &[u8]) -> String {
        String::from_utf8_lossy(self.path.slice(text)).into_owned()
    }
}

/// Records extracted from one scan, in output order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTable {
    records: Vec<ReferenceRecord>,
    limit: usize,
}

impl FieldTable {
    /// Create an empty table holding at most `limit` records.
    pub const fn new(limit: usize) -> Self {
        Self {
            records: Vec::new(),
            limit,
        }
    }

    /// Append a record. Returns `false` and drops the record when the table
    /// is already full.
    pub fn push(&mut self, record: ReferenceRecord) -> bool {
        if self.is_full() {
            return false;
        }
        self.records.push(record);
        true
    }

    /// Check if the limit has been reached.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.records.len() >= self.limit
    }

    /// Number of records.
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the table holds no records.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Get a record by index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&ReferenceRecord> {
        self.records.get(index)
    }

    /// All records.
    #[inline]
    pub fn records(&self) -> &[ReferenceRecord] {
        &self.records
    }

    /// Iterate over the records.
    pub fn iter(&self) -> std::slice::Iter<'_, ReferenceRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a FieldTable {
    type Item = &'a ReferenceRecord;
    type IntoIter = std::slice::Iter<'a, ReferenceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
