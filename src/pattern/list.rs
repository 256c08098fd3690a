//! Compiled patterns and the ordered list they live in.

use crate::error::{Error, Result};
use regex::bytes::Regex;

/// Built-in patterns, tried in this order before any user patterns.
pub const DEFAULT_PATTERNS: &[&str] = &[
    // An optional colour sequence, as clang emits before the path.
    r"(?:\x1b\[\dm)?([\w\-./]+\.\w+):(\d+)(?::(\d+))?",
    r"file: ([\w./]+) line: (\d+)",
    r"in (.+?) on line (\d+)",
    r"([\w./]+)\((\d+),(\d+)\)",
    r#"File "(.+?)", line (\d+)"#,
];

/// A compiled reference pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    /// Compile a pattern.
    ///
    /// A pattern that does not compile is a configuration error; the error
    /// names the pattern so the user can find it.
    pub fn compile(source: &str) -> Result<Self> {
        let regex = Regex::new(source).map_err(|source_err| Error::PatternCompile {
            pattern: source.to_owned(),
            source: source_err,
        })?;

        Ok(Self {
            source: source.to_owned(),
            regex,
        })
    }

    /// The pattern as written.
    #[inline]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The compiled expression.
    #[inline]
    pub const fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Patterns in priority order: the first one matching a line wins.
#[derive(Debug, Clone, Default)]
pub struct PatternList {
    patterns: Vec<Pattern>,
}

impl PatternList {
    /// Create an empty list.
    pub const fn new() -> Self {
        Self {
            patterns: Vec::new(),
        }
    }

    /// Create a list holding [`DEFAULT_PATTERNS`].
    pub fn with_defaults() -> Result<Self> {
        let mut list = Self::new();
        list.extend(DEFAULT_PATTERNS.iter().copied())?;
        Ok(list)
    }

    /// Compile and append one pattern.
    pub fn push(&mut self, source: &str) -> Result<()> {
        self.patterns.push(Pattern::compile(source)?);
        Ok(())
    }

    /// Compile and append patterns in order, stopping at the first failure.
    pub fn extend<I, S>(&mut self, sources: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for source in sources {
            self.push(source.as_ref())?;
        }
        Ok(())
    }

    /// Number of patterns.
    #[inline]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Iterate over the patterns in priority order.
    pub fn iter(&self) -> std::slice::Iter<'_, Pattern> {
        self.patterns.iter()
    }
}

impl<'a> IntoIterator for &'a PatternList {
    type Item = &'a Pattern;
    type IntoIter = std::slice::Iter<'a, Pattern>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_compile() {
        let list = PatternList::with_defaults().unwrap();
        assert_eq!(list.len(), DEFAULT_PATTERNS.len());
        assert_eq!(list.iter().next().unwrap().source(), DEFAULT_PATTERNS[0]);
    }

    #[test]
    fn test_compile_error_names_pattern() {
        let err = Pattern::compile("(unclosed").unwrap_err();
        match &err {
            Error::PatternCompile { pattern, .. } => assert_eq!(pattern, "(unclosed"),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("'(unclosed'"));
    }

    #[test]
    fn test_extend_appends_in_order() {
        let mut list = PatternList::with_defaults().unwrap();
        list.extend(["^(\\S+)#(\\d+)$", "at (\\S+)"]).unwrap();
        let sources: Vec<_> = list.iter().map(Pattern::source).collect();
        assert_eq!(sources[DEFAULT_PATTERNS.len()], "^(\\S+)#(\\d+)$");
        assert_eq!(sources[DEFAULT_PATTERNS.len() + 1], "at (\\S+)");
    }

    #[test]
    fn test_extend_stops_at_bad_pattern() {
        let mut list = PatternList::new();
        let result = list.extend(["(a)", "[", "(b)"]);
        assert!(result.is_err());
        assert_eq!(list.len(), 1);
    }
}
