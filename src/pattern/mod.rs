//! Pattern module: Turn captured text into file references.
//!
//! This module contains:
//! - [`Pattern`] / [`PatternList`]: Compiled reference patterns, in priority order
//! - [`scan`]: Line-by-line extraction into a [`FieldTable`]
//! - [`RecordFilter`] / [`ExistingPaths`]: Optional veto on extracted records
//!
//! Patterns capture the path in group 1, the line in group 2 and the column
//! in group 3. Only the path is required.

mod exists;
mod field;
mod list;
mod scan;

pub use exists::{ExistingPaths, RecordFilter};
pub use field::{FieldTable, ReferenceRecord, Span, DEFAULT_MAX_RECORDS};
pub use list::{Pattern, PatternList, DEFAULT_PATTERNS};
pub use scan::{match_line, scan};
