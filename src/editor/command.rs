//! Editor discovery and launch.

use std::fs::File;
use std::io;
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info};

/// The command used when neither `PLS` nor `EDITOR` is set.
pub const DEFAULT_TEMPLATE: &str = "vim +'call cursor(%d, %d)'";

/// Editors with a known way of jumping to a position, and the arguments
/// that do it.
const KNOWN_EDITORS: &[(&[&str], &str)] = &[
    (&["mate", "mate_wait"], " --line %d:%d"),
    (&["subl", "atom"], " %s:%d:%d"),
    (&["vim", "vi"], " +'call cursor(%d, %d)'"),
    (&["phpstorm", "idea"], " --line %d \"$PWD/%s\""),
    (&["emacs"], " +%d:%d"),
];

/// Check whether the program in `command` is called `name`.
///
/// Only the file name of the first word counts, so
/// `"/usr/local/bin/subl -n"` is named `subl`.
pub fn is_named_executable(command: &str, name: &str) -> bool {
    let program = command.split_whitespace().next().unwrap_or_default();
    program.rsplit('/').next() == Some(name)
}

/// The editor command template from the environment.
pub fn command_template() -> String {
    command_template_from(|key| std::env::var(key).ok())
}

/// The editor command template, looking variables up with `var`.
///
/// `PLS` is taken as written. Otherwise an `EDITOR` naming a known editor
/// gets the arguments that place its cursor, and any other `EDITOR` is taken
/// as written. With neither set the result is [`DEFAULT_TEMPLATE`].
pub fn command_template_from<F>(var: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(template) = var("PLS") {
        debug!(%template, "editor from PLS");
        return template;
    }

    let Some(editor) = var("EDITOR") else {
        return DEFAULT_TEMPLATE.to_owned();
    };

    for (names, arguments) in KNOWN_EDITORS {
        if names.iter().any(|name| is_named_executable(&editor, name)) {
            debug!(%editor, "known editor");
            return format!("{editor}{arguments}");
        }
    }

    editor
}

/// Run `command` through the shell.
///
/// The editor gets the terminal as standard input even when ours was a
/// pipe. Output goes wherever ours goes.
pub fn launch(command: &str) -> io::Result<ExitStatus> {
    let tty = File::open("/dev/tty")?;

    info!(%command, "launching editor");
    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .stdin(Stdio::from(tty))
        .status()?;

    debug!(%status, "editor exited");
    Ok(status)
}
