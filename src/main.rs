//! pls CLI entrypoint.
//!
//! Runs the utility given on the command line (or reads standard input),
//! lets the user pick a reference from the output, and opens it.
//!
//! Set `PLS_LOG` (e.g. `PLS_LOG=pls=debug`) to see what it is doing.

use std::io::{self, Write};
use std::path::PathBuf;

use pls::capture::{read_to_buffer, run_command};
use pls::config::{self, Command, Options, OPTION_HELP, USAGE};
use pls::pattern::RecordFilter;
use pls::select::{self, Outcome, SelectConfig, TerminalKeys};
use pls::terminal::{stdout_is_terminal, SessionConfig, TerminalGeometry, TerminalSession};
use pls::{editor, scan, Error, ExistingPaths, InputBuffer, PatternList};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PLS_LOG";

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Only fails if a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// The built-in patterns followed by those from the pattern file.
fn load_patterns() -> pls::Result<PatternList> {
    let mut patterns = PatternList::with_defaults()?;
    if let Some(path) = config::rc_path() {
        patterns.extend(config::load_rc_patterns(&path))?;
    }

    if patterns.is_empty() {
        return Err(Error::NoPatterns);
    }
    debug!(count = patterns.len(), "patterns loaded");
    Ok(patterns)
}

fn run(options: &Options) -> pls::Result<()> {
    if !stdout_is_terminal() {
        return Err(Error::NotATerminal);
    }

    let patterns = load_patterns()?;
    let geometry = TerminalGeometry::query();
    let mut buffer = InputBuffer::new();

    {
        let mut echo = io::stdout().lock();
        if options.utility.is_empty() {
            read_to_buffer(io::stdin().lock(), &mut buffer, geometry.width(), &mut echo)?;
        } else {
            let status = run_command(&options.utility, &mut buffer, geometry.width(), &mut echo)?;
            if status.success() && !options.always_select {
                return Ok(());
            }
        }
        echo.flush()?;
    }

    if buffer.is_empty() {
        return Ok(());
    }

    if !options.roots.is_empty() && !options.only_existing {
        debug!("search roots are only consulted with -e");
    }
    let existing = options
        .only_existing
        .then(|| ExistingPaths::new(options.roots.clone()));
    let filter = existing.as_ref().map(|filter| filter as &dyn RecordFilter);

    let fields = scan(buffer.as_bytes(), &patterns, options.max_records, filter);
    if fields.is_empty() {
        return Ok(());
    }

    let outcome = {
        let session = TerminalSession::enter(SessionConfig {
            alternate_screen: options.alternate_screen,
        })?;

        // The echoed output sits above the cursor unless we moved to a
        // fresh screen.
        let cursor_row = if session.alternate_screen() {
            0
        } else {
            buffer.line_count().min(geometry.view_height())
        };

        let config = SelectConfig {
            initial: options.initial,
            view_height: geometry.view_height(),
            cursor_row,
        };
        let mut out = io::stdout().lock();
        let outcome = select::run(&buffer, &fields, config, &mut TerminalKeys, &mut out);
        drop(out);
        drop(session);
        outcome?
    };

    let Outcome::Edit(index) = outcome else {
        return Ok(());
    };
    let Some(record) = fields.get(index) else {
        return Ok(());
    };

    let root = record
        .root
        .and_then(|root| options.roots.get(root))
        .map(PathBuf::as_path);
    let command = editor::expand(&editor::command_template(), record, buffer.as_bytes(), root);

    let status = editor::launch(&command)?;
    if !status.success() {
        warn!(%status, %command, "editor exited with failure");
    }
    Ok(())
}

fn main() {
    init_logging();

    let options = match config::parse_options(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Version) => {
            println!("pls {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        Ok(Command::Help) => {
            println!("{USAGE}\n\n{OPTION_HELP}");
            return;
        }
        Err(e) => {
            eprintln!("pls: {e}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&options) {
        eprintln!("\x1b[1mError\x1b[0m: {e}");
        std::process::exit(1);
    }
}
