//! Configuration: Command-line options and the pattern file.

use crate::pattern::DEFAULT_MAX_RECORDS;
use crate::select::InitialSelection;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Name of the pattern file in the home directory.
pub const RC_FILE_NAME: &str = ".plsrc";

/// Usage text printed for `-h` and on usage errors.
pub const USAGE: &str = "usage: pls [-lace] [-m max] [-p path]... [utility [args...]]";

/// Option help printed for `-h`.
pub const OPTION_HELP: &str = "Arguments:
  -e          Only select existing filenames
  -l          Set initial selection to the last path
  -p path     Add path to the list of directories searched for selected files
  -a          Show selection interface even if utility exits with 0 status
  -c          Select on the alternate screen
  -m max      Keep at most max references (default 100)
  -v          Print the version and exit
  -h          Print this help and exit";

/// A malformed command line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UsageError {
    /// A flag that is not recognised.
    #[error("unknown option '-{0}'")]
    UnknownOption(char),

    /// A flag that takes a value was last on the command line.
    #[error("option '-{0}' requires a value")]
    MissingValue(char),

    /// The record limit is not a positive number.
    #[error("invalid maximum '{0}'")]
    InvalidMaximum(String),
}

/// What the command line asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Capture and select.
    Run(Options),
    /// Print the version.
    Version,
    /// Print usage with option help.
    Help,
}

/// Options for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Which reference to highlight first.
    pub initial: InitialSelection,
    /// Select even when the utility succeeded.
    pub always_select: bool,
    /// Only keep references to files that exist.
    pub only_existing: bool,
    /// Select on the alternate screen.
    pub alternate_screen: bool,
    /// Directories searched for referenced files, in order.
    pub roots: Vec<PathBuf>,
    /// Most references kept.
    pub max_records: usize,
    /// The utility and its arguments; empty means read standard input.
    pub utility: Vec<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            initial: InitialSelection::First,
            always_select: false,
            only_existing: false,
            alternate_screen: false,
            roots: Vec::new(),
            max_records: DEFAULT_MAX_RECORDS,
            utility: Vec::new(),
        }
    }
}

/// Parse the arguments after the program name.
///
/// Flags may be bundled (`-la`) and a value may be attached (`-psrc`) or
/// given as the next argument. Parsing stops at the first argument that is
/// not a flag, or after `--`; what remains is the utility's argv.
pub fn parse_options<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        if arg == "--" {
            break;
        }
        let Some(flags) = arg.strip_prefix('-').filter(|flags| !flags.is_empty()) else {
            options.utility.push(arg);
            break;
        };

        for (at, flag) in flags.char_indices() {
            match flag {
                'l' => options.initial = InitialSelection::Last,
                'a' => options.always_select = true,
                'e' => options.only_existing = true,
                'c' => options.alternate_screen = true,
                'v' => return Ok(Command::Version),
                'h' => return Ok(Command::Help),
                'p' | 'm' => {
                    let attached = &flags[at + flag.len_utf8()..];
                    let value = if attached.is_empty() {
                        args.next().ok_or(UsageError::MissingValue(flag))?
                    } else {
                        attached.to_owned()
                    };

                    if flag == 'p' {
                        options.roots.push(PathBuf::from(value));
                    } else {
                        options.max_records = match value.parse::<usize>() {
                            Ok(max) if max > 0 => max,
                            _ => return Err(UsageError::InvalidMaximum(value)),
                        };
                    }
                    break;
                }
                other => return Err(UsageError::UnknownOption(other)),
            }
        }
    }

    options.utility.extend(args);
    Ok(Command::Run(options))
}

/// Where the pattern file lives, if there is a home directory.
pub fn rc_path() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(|home| Path::new(&home).join(RC_FILE_NAME))
}

/// Extract patterns from the contents of a pattern file.
///
/// Each line is one pattern. Blank lines and lines starting with `#` are
/// skipped.
pub fn parse_rc(contents: &str) -> Vec<String> {
    contents
        .lines()
        .filter(|line| !line.trim().is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect()
}

/// Read extra patterns from `path`.
///
/// A missing file yields no patterns. A file that exists but cannot be read
/// is logged and skipped.
pub fn load_rc_patterns(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(contents) => {
            let patterns = parse_rc(&contents);
            debug!(path = %path.display(), count = patterns.len(), "loaded pattern file");
            patterns
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "could not read pattern file");
            Vec::new()
        }
    }
}
