//! Scanner: Run the pattern list over captured output, one logical line at a
//! time.
//!
//! Logical lines are split on `\n` only. Display wrapping is irrelevant here;
//! a path that the terminal broke over two rows is still one match.

use super::exists::RecordFilter;
use super::field::{FieldTable, ReferenceRecord, Span};
use super::list::PatternList;
use tracing::{debug, warn};

/// Match a single line against the patterns.
///
/// `offset` is the position of the line within the whole output; the spans
/// of the returned record are absolute. A pattern that matches without
/// capturing a path is skipped with a warning and the next one is tried.
pub fn match_line(line: &[u8], offset: usize, patterns: &PatternList) -> Option<ReferenceRecord> {
    for pattern in patterns {
        let Some(captures) = pattern.regex().captures(line) else {
            continue;
        };

        let Some(path) = captures.get(1) else {
            warn!(pattern = pattern.source(), "match has no path capture, skipping");
            continue;
        };

        let span = |m: regex::bytes::Match<'_>| Span::from(m.range()).offset_by(offset);

        return Some(ReferenceRecord {
            matched: span(captures.get(0)?),
            path: span(path),
            line: captures.get(2).map(span),
            column: captures.get(3).map(span),
            root: None,
        });
    }

    None
}

/// Extract up to `limit` references from `text`.
///
/// When a `filter` is given it sees every matched record and may reject it
/// or fill in its search root. Scanning stops as soon as the table is full.
pub fn scan(
    text: &[u8],
    patterns: &PatternList,
    limit: usize,
    filter: Option<&dyn RecordFilter>,
) -> FieldTable {
    let mut table = FieldTable::new(limit);
    let mut offset = 0;

    for line in text.split(|&b| b == b'\n') {
        let start = offset;
        offset += line.len() + 1;

        if table.is_full() {
            debug!(limit, "record limit reached, ignoring the rest of the output");
            break;
        }

        let Some(mut record) = match_line(line, start, patterns) else {
            continue;
        };

        if let Some(filter) = filter {
            if !filter.accept(text, &mut record) {
                debug!(path = %record.path_text(text), "reference rejected");
                continue;
            }
        }

        table.push(record);
    }

    debug!(records = table.len(), bytes = text.len(), "scan finished");
    table
}
