//! CLI output formatting.
//!
//! Each command has a `format_*` function returning `Vec<String>` for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! Photos
//!     3 total (1 landscape, 2 portrait)
//!
//! Frameglasses (sequential)
//!     2 written to out.txt
//!     001 [0] cat dog
//!     002 [1 2] moon sun
//! ```
//!
//! ## Check
//!
//! ```text
//! Photos
//!     3 total (1 landscape, 2 portrait)
//!     12 distinct tags
//! ```
//!
//! ## Inspect
//!
//! Pretty-printed JSON with every frameglass and its tag union:
//!
//! ```text
//! {
//!   "policy": "sequential",
//!   "landscapes": 1,
//!   "portraits": 2,
//!   "dropped": null,
//!   "frameglasses": [
//!     { "ids": [0], "tags": ["cat", "dog"] },
//!     ...
//! ```

use crate::pairing::PairingPolicy;
use crate::pipeline::RunSummary;
use crate::types::{Frameglass, Photo, PhotoId};
use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

/// How many frameglasses the build output previews.
pub const PREVIEW_LEN: usize = 5;

/// Longest tag list shown on a preview line before it is cut short.
const MAX_TAGS_SHOWN: usize = 8;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn counts_line(landscapes: usize, portraits: usize) -> String {
    format!(
        "    {} total ({} landscape, {} portrait)",
        landscapes + portraits,
        landscapes,
        portraits
    )
}

/// One preview line: index, member ids, then tags.
///
/// ```text
/// 002 [1 2] moon sun
/// 003 [5] (no tags)
/// ```
fn frameglass_line(index: usize, fg: &Frameglass) -> String {
    let ids: Vec<String> = fg.ids().iter().map(|id| id.to_string()).collect();
    let tags = if fg.tags().is_empty() {
        "(no tags)".to_string()
    } else {
        let shown: Vec<&str> = fg
            .tags()
            .iter()
            .take(MAX_TAGS_SHOWN)
            .map(String::as_str)
            .collect();
        let hidden = fg.tags().len().saturating_sub(MAX_TAGS_SHOWN);
        if hidden > 0 {
            format!("{} (+{} more)", shown.join(" "), hidden)
        } else {
            shown.join(" ")
        }
    };
    format!("{} [{}] {}", format_index(index), ids.join(" "), tags)
}

// ============================================================================
// Commands
// ============================================================================

/// Format the result of a `build` run.
pub fn format_build_output(
    summary: &RunSummary,
    policy: PairingPolicy,
    output: &Path,
) -> Vec<String> {
    let frameglasses = &summary.assembly.frameglasses;
    let mut lines = vec![
        "Photos".to_string(),
        counts_line(summary.landscapes, summary.portraits),
    ];
    if let Some(id) = summary.assembly.dropped {
        lines.push(format!("    Left out: portrait {} (odd portrait count)", id));
    }

    lines.push(String::new());
    lines.push(format!("Frameglasses ({})", policy));
    lines.push(format!(
        "    {} written to {}",
        frameglasses.len(),
        output.display()
    ));
    for (i, fg) in frameglasses.iter().take(PREVIEW_LEN).enumerate() {
        lines.push(format!("    {}", frameglass_line(i + 1, fg)));
    }
    if frameglasses.len() > PREVIEW_LEN {
        lines.push(format!("    ... {} more", frameglasses.len() - PREVIEW_LEN));
    }
    lines
}

/// Format the result of a `check` run.
pub fn format_check_output(photos: &[Photo]) -> Vec<String> {
    let portraits = photos.iter().filter(|p| p.is_portrait()).count();
    let landscapes = photos.len() - portraits;
    let distinct: BTreeSet<&str> = photos
        .iter()
        .flat_map(|p| p.tags.iter().map(String::as_str))
        .collect();

    let mut lines = vec![
        "Photos".to_string(),
        counts_line(landscapes, portraits),
        format!("    {} distinct tags", distinct.len()),
    ];
    if portraits % 2 == 1 {
        lines.push("    Odd portrait count: one portrait will be left out".to_string());
    }
    lines
}

/// JSON view of a build, used by `inspect`.
#[derive(Debug, Serialize)]
pub struct InspectReport<'a> {
    pub policy: PairingPolicy,
    pub landscapes: usize,
    pub portraits: usize,
    pub dropped: Option<PhotoId>,
    pub frameglasses: &'a [Frameglass],
}

/// Render a build as pretty JSON.
pub fn format_inspect_json(
    summary: &RunSummary,
    policy: PairingPolicy,
) -> Result<String, serde_json::Error> {
    let report = InspectReport {
        policy,
        landscapes: summary.landscapes,
        portraits: summary.portraits,
        dropped: summary.assembly.dropped,
        frameglasses: &summary.assembly.frameglasses,
    };
    serde_json::to_string_pretty(&report)
}

pub fn print_build_output(summary: &RunSummary, policy: PairingPolicy, output: &Path) {
    for line in format_build_output(summary, policy, output) {
        println!("{}", line);
    }
}

pub fn print_check_output(photos: &[Photo]) {
    for line in format_check_output(photos) {
        println!("{}", line);
    }
}
