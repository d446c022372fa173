//! Output file writing.
//!
//! Stage 3 of the pipeline. The output format is the frameglass count on the
//! first line, then one line per frameglass listing its photo ids:
//!
//! ```text
//! 3
//! 0
//! 3
//! 1 2
//! ```
//!
//! The file is first written to a temporary file next to the destination and
//! then renamed over it, so a failed run never leaves a half-written output
//! and an existing file is only replaced once the new one is complete.

use crate::types::Frameglass;
use std::fmt::Write as _;
use std::io::Write as _;
use std::path::Path;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum WriteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render frameglasses in the output format. Always ends with a newline.
pub fn render(frameglasses: &[Frameglass]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", frameglasses.len());
    for fg in frameglasses {
        let ids: Vec<String> = fg.ids().iter().map(|id| id.to_string()).collect();
        let _ = writeln!(out, "{}", ids.join(" "));
    }
    out
}

/// Write frameglasses to `path`, replacing any existing file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn write_output(path: &Path, frameglasses: &[Frameglass]) -> Result<(), WriteError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(render(frameglasses).as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    debug!(lines = frameglasses.len() + 1, "wrote output");
    Ok(())
}
