//! CLI command handlers.
//!
//! One handler per subcommand, kept out of main.rs so they can be unit
//! tested.

mod evaluate;
mod report;

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

pub use evaluate::{handle_evaluate, run_evaluate};
pub use report::{OutputFormat, handle_report, parse_format_list, run_report};

use crate::error::{GateError, Result};

/// Result type for handler functions that can be tested.
#[derive(Debug, Clone, PartialEq)]
pub enum HandlerResult {
    Success,
    Error(u8),
}

impl From<HandlerResult> for ExitCode {
    fn from(result: HandlerResult) -> Self {
        match result {
            HandlerResult::Success => ExitCode::SUCCESS,
            HandlerResult::Error(code) => ExitCode::from(code),
        }
    }
}

/// Exit code for fatal runtime errors.
pub(crate) const FATAL_EXIT: u8 = 2;

pub(crate) fn write_output(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| GateError::WriteError {
        path: path.display().to_string(),
        source: e,
    })
}

pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_output(path, &json)
}
