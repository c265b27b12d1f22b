//! Terminal file picker.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use heatload_core::{ExtractError, FileFilter, FilePicker};

/// Prompts on the terminal for a file path matching an extension filter.
///
/// An empty line is a cancellation and aborts the run. A path with the wrong
/// extension is re-prompted once; a second mismatch is fatal. Whether the
/// file actually opens is left to the results reader.
#[derive(Clone, Copy, Debug, Default)]
pub struct PromptFilePicker;

impl PromptFilePicker {
    pub fn new() -> Self {
        Self
    }

    fn pick_from(
        reader: &mut dyn BufRead,
        out: &mut dyn Write,
        filter: &FileFilter,
        title: &str,
    ) -> Result<PathBuf, ExtractError> {
        for attempt in 0..2 {
            if attempt == 0 {
                writeln!(out, "{title}").map_err(io_unavailable)?;
            }
            writeln!(out, "Enter path to a {} (*.{}):", filter.description, filter.extension)
                .map_err(io_unavailable)?;
            out.flush().map_err(io_unavailable)?;

            let mut line = String::new();
            let read = reader.read_line(&mut line).map_err(io_unavailable)?;
            let trimmed = line.trim();
            if read == 0 || trimmed.is_empty() {
                return Err(ExtractError::UserCancelled);
            }

            let path = PathBuf::from(trimmed);
            if filter.matches(&path) {
                return Ok(path);
            }
            tracing::warn!(path = %path.display(), extension = %filter.extension,
                "selected file does not match the filter");
        }

        Err(ExtractError::DataUnavailable(format!(
            "no file matching *.{} was selected",
            filter.extension
        )))
    }
}

fn io_unavailable(e: std::io::Error) -> ExtractError {
    ExtractError::DataUnavailable(format!("terminal unavailable: {e}"))
}

impl FilePicker for PromptFilePicker {
    fn pick(&self, filter: &FileFilter, title: &str) -> Result<PathBuf, ExtractError> {
        let stdin = std::io::stdin();
        let stderr = std::io::stderr();
        Self::pick_from(&mut stdin.lock(), &mut stderr.lock(), filter, title)
    }
}
