//! Existence filter: Keep only references to files that are actually there.

use super::field::ReferenceRecord;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::trace;

/// A veto over records produced by the scanner.
///
/// Implementations may also annotate the record, for example with the
/// search root under which the path was found.
pub trait RecordFilter {
    /// Return `false` to drop the record.
    fn accept(&self, text: &[u8], record: &mut ReferenceRecord) -> bool;
}

impl<F> RecordFilter for F
where
    F: Fn(&[u8], &mut ReferenceRecord) -> bool,
{
    fn accept(&self, text: &[u8], record: &mut ReferenceRecord) -> bool {
        self(text, record)
    }
}

/// Accepts paths that exist relative to the working directory or under one
/// of the configured search roots.
#[derive(Debug, Clone, Default)]
pub struct ExistingPaths {
    roots: Vec<PathBuf>,
}

impl ExistingPaths {
    /// Create a filter trying `roots` in order after the working directory.
    pub const fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Locate `path`.
    ///
    /// Returns `Some(None)` if it exists as written, `Some(Some(i))` if it
    /// exists under root `i`, and `None` if it cannot be found.
    pub fn resolve(&self, path: &Path) -> Option<Option<usize>> {
        if path.exists() {
            return Some(None);
        }

        self.roots
            .iter()
            .position(|root| under_root(root, path).exists())
            .map(Some)
    }
}

/// `root/path`, the same way the editor command spells it.
///
/// An absolute `path` stays under `root`; `Path::join` would discard the
/// root instead.
fn under_root(root: &Path, path: &Path) -> PathBuf {
    let mut joined = OsString::from(root.as_os_str());
    joined.push("/");
    joined.push(path.as_os_str());
    PathBuf::from(joined)
}

impl RecordFilter for ExistingPaths {
    fn accept(&self, text: &[u8], record: &mut ReferenceRecord) -> bool {
        let path = path_from_bytes(record.path.slice(text));

        match self.resolve(&path) {
            Some(root) => {
                trace!(path = %path.display(), ?root, "reference exists");
                record.root = root;
                true
            }
            None => false,
        }
    }
}

#[cfg(unix)]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    PathBuf::from(OsStr::from_bytes(bytes))
}

#[cfg(not(unix))]
fn path_from_bytes(bytes: &[u8]) -> PathBuf {
    PathBuf::from(String::from_utf8_lossy(bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{scan, PatternList};
    use std::fs;

    #[test]
    fn test_resolve_order() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        fs::write(second.path().join("only_second.rs"), "").unwrap();
        fs::create_dir(first.path().join("src")).unwrap();
        fs::write(first.path().join("src/both.rs"), "").unwrap();
        fs::create_dir(second.path().join("src")).unwrap();
        fs::write(second.path().join("src/both.rs"), "").unwrap();

        let filter = ExistingPaths::new(vec![first.path().to_owned(), second.path().to_owned()]);

        assert_eq!(filter.resolve(Path::new("only_second.rs")), Some(Some(1)));
        assert_eq!(filter.resolve(Path::new("src/both.rs")), Some(Some(0)));
        assert_eq!(filter.resolve(Path::new("missing.rs")), None);
    }

    #[test]
    fn test_resolve_working_directory_first() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("Cargo.toml"), "").unwrap();
        let filter = ExistingPaths::new(vec![root.path().to_owned()]);

        // The crate's own manifest exists relative to the test's working
        // directory, so no root is needed.
        assert_eq!(filter.resolve(Path::new("Cargo.toml")), Some(None));
    }

    #[test]
    fn test_scan_with_existing_paths() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join("found.rs"), "").unwrap();
        let filter = ExistingPaths::new(vec![root.path().to_owned()]);

        let text = b"found.rs:1\nnowhere_to_be_seen.rs:2\nCargo.toml:3\n";
        let table = scan(text, &PatternList::with_defaults().unwrap(), 10, Some(&filter));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(0).unwrap().root, Some(0));
        assert_eq!(table.get(1).unwrap().root, None);
    }

    #[test]
    fn test_absolute_path_under_root() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("pls_checkout_srv/app")).unwrap();
        fs::write(root.path().join("pls_checkout_srv/app/index.php"), "").unwrap();
        let filter = ExistingPaths::new(vec![root.path().to_owned()]);

        assert_eq!(
            filter.resolve(Path::new("/pls_checkout_srv/app/index.php")),
            Some(Some(0))
        );

        let text = b"PHP Fatal error: boom in /pls_checkout_srv/app/index.php on line 15\n";
        let table = scan(text, &PatternList::with_defaults().unwrap(), 10, Some(&filter));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0).unwrap().root, Some(0));
    }

    #[test]
    fn test_under_root_keeps_root() {
        assert_eq!(
            under_root(Path::new("/checkout"), Path::new("/srv/x.php")),
            PathBuf::from("/checkout//srv/x.php")
        );
        assert_eq!(
            under_root(Path::new("/checkout"), Path::new("lib/y.rs")),
            PathBuf::from("/checkout/lib/y.rs")
        );
    }
}
