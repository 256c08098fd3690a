//! Editor module: Open the selected reference.
//!
//! This module contains:
//! - [`command_template`]: Which editor to run, from `PLS` or `EDITOR`
//! - [`expand`]: Substitute a reference into the template
//! - [`launch`]: Run the result through `sh -c`

mod command;
mod template;

pub use command::{
    command_template, command_template_from, is_named_executable, launch, DEFAULT_TEMPLATE,
};
pub use template::expand;
