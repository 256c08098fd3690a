//! Command templating: Fill an editor command with a reference.

use crate::pattern::{ReferenceRecord, Span};
use std::path::Path;

/// Replace the first `placeholder` in `command` with `value`.
///
/// Returns `false` when there is no such placeholder.
fn replace_first(command: &mut String, placeholder: &str, value: &str) -> bool {
    match command.find(placeholder) {
        Some(at) => {
            command.replace_range(at..at + placeholder.len(), value);
            true
        }
        None => false,
    }
}

/// Build the command that opens `record`.
///
/// The first `%d` becomes the line number and the next the column, each `0`
/// when the record has none. The first `%s` becomes the path, prefixed with
/// `root/` when the reference was found under a search root. Without a `%s`
/// the path is appended, separated by a space unless the command already
/// ends in one.
///
/// Substitution works on the template as it grows, so a `%d` or `%s` inside
/// a substituted value is never expanded: the captured line and column are
/// digits, and the path is substituted last.
pub fn expand(template: &str, record: &ReferenceRecord, text: &[u8], root: Option<&Path>) -> String {
    let mut command = template.to_owned();

    let number = |span: Option<Span>| {
        span.map_or_else(
            || "0".to_owned(),
            |span| String::from_utf8_lossy(span.slice(text)).into_owned(),
        )
    };

    let line = number(record.line);
    let column = number(record.column);
    replace_first(&mut command, "%d", &line);
    replace_first(&mut command, "%d", &column);

    let path = match root {
        Some(root) => format!("{}/{}", root.display(), record.path_text(text)),
        None => record.path_text(text),
    };

    if !replace_first(&mut command, "%s", &path) {
        if !command.is_empty() && !command.ends_with(char::is_whitespace) {
            command.push(' ');
        }
        command.push_str(&path);
    }

    command
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records over `"foo.go:42:7"`.
    const TEXT: &[u8] = b"foo.go:42:7";

    fn record(line: bool, column: bool) -> ReferenceRecord {
        ReferenceRecord {
            matched: Span::new(0, 11),
            path: Span::new(0, 6),
            line: line.then_some(Span::new(7, 9)),
            column: column.then_some(Span::new(10, 11)),
            root: None,
        }
    }

    #[test]
    fn test_line_and_path() {
        assert_eq!(expand("edit +%d %s", &record(true, false), TEXT, None), "edit +42 foo.go");
    }

    #[test]
    fn test_appends_path() {
        let text = b"bar.rs";
        let record = ReferenceRecord {
            matched: Span::new(0, 6),
            path: Span::new(0, 6),
            line: None,
            column: None,
            root: None,
        };
        assert_eq!(expand("run", &record, text, None), "run bar.rs");
        assert_eq!(expand("run ", &record, text, None), "run bar.rs");
        assert_eq!(expand("", &record, text, None), "bar.rs");
    }

    #[test]
    fn test_vim_cursor() {
        assert_eq!(
            expand("vim +'call cursor(%d, %d)'", &record(true, true), TEXT, None),
            "vim +'call cursor(42, 7)' foo.go"
        );
    }

    #[test]
    fn test_missing_numbers_are_zero() {
        assert_eq!(
            expand("vim +'call cursor(%d, %d)'", &record(false, false), TEXT, None),
            "vim +'call cursor(0, 0)' foo.go"
        );
    }

    #[test]
    fn test_path_before_numbers() {
        assert_eq!(
            expand("subl %s:%d:%d", &record(true, true), TEXT, None),
            "subl foo.go:42:7"
        );
    }

    #[test]
    fn test_root_prefix() {
        assert_eq!(
            expand("edit +%d %s", &record(true, false), TEXT, Some(Path::new("/src/proj"))),
            "edit +42 /src/proj/foo.go"
        );
    }

    #[test]
    fn test_placeholder_in_path_not_expanded() {
        let text = b"%d.rs:3";
        let record = ReferenceRecord {
            matched: Span::new(0, 7),
            path: Span::new(0, 5),
            line: Some(Span::new(6, 7)),
            column: None,
            root: None,
        };
        assert_eq!(expand("e %s +%d", &record, text, None), "e %d.rs +3");
    }
}
