//! Input file parsing.
//!
//! Stage 1 of the pipeline. Reads the photo list format into [`Photo`] records.
//!
//! ## Input Format
//!
//! ```text
//! 4                 # number of photo records that follow
//! L 3 cat beach sun # <type> <tag_count> <tag>...
//! P 2 selfie smile
//! P 2 garden selfie
//! L 2 garden cat
//! ```
//!
//! `<type>` is `L` (Landscape) or `P` (Portrait). Each record gets the id of
//! its position among the records, starting at 0, so the first record above
//! is photo 0 regardless of what line of the file it sits on.
//!
//! ## Tags
//!
//! Exactly `tag_count` tokens are read as tags. Repeated tags collapse into
//! one. Tokens past the declared count are ignored.
//!
//! ## Validation
//!
//! Every [`FormatError`] names the 1-based line of the file it came from.
//! Lines after the last declared record are never read, so trailing junk
//! does not fail a run; a file that ends early fails with
//! [`ParseError::Truncated`].

use crate::types::{Orientation, Photo, PhotoId, Tags};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Format error: {0}")]
    Format(#[from] FormatError),
    #[error("Input declares {declared} photos but ends after {found}")]
    Truncated { declared: usize, found: usize },
}

/// A malformed header or record line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("line {line}: photo count {value:?} is not a non-negative integer")]
    InvalidHeader { line: usize, value: String },
    #[error("line {line}: record is empty")]
    EmptyRecord { line: usize },
    #[error("line {line}: unknown photo type {value:?} (expected L or P)")]
    UnknownOrientation { line: usize, value: String },
    #[error("line {line}: tag count {value:?} is not a non-negative integer")]
    InvalidTagCount { line: usize, value: String },
    #[error("line {line}: expected {expected} tokens, found {found}")]
    MissingTokens {
        line: usize,
        expected: usize,
        found: usize,
    },
}

impl FormatError {
    /// 1-based line number in the input file.
    pub fn line(&self) -> usize {
        match self {
            FormatError::InvalidHeader { line, .. }
            | FormatError::EmptyRecord { line }
            | FormatError::UnknownOrientation { line, .. }
            | FormatError::InvalidTagCount { line, .. }
            | FormatError::MissingTokens { line, .. } => *line,
        }
    }
}

/// Read and parse an input file.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn parse_file(path: &Path) -> Result<Vec<Photo>, ParseError> {
    let content = fs::read_to_string(path)?;
    parse_str(&content)
}

/// Parse input already held in memory.
pub fn parse_str(content: &str) -> Result<Vec<Photo>, ParseError> {
    let mut lines = content.lines();

    let header = lines.next().unwrap_or("").trim();
    let declared: usize = header.parse().map_err(|_| FormatError::InvalidHeader {
        line: 1,
        value: header.to_string(),
    })?;

    let mut photos = Vec::new();
    for id in 0..declared {
        let Some(line) = lines.next() else {
            return Err(ParseError::Truncated {
                declared,
                found: id,
            });
        };
        // Header is line 1, so record `id` sits on line `id + 2`.
        photos.push(parse_record(id, id + 2, line)?);
    }

    debug!(photos = photos.len(), "parsed input");
    Ok(photos)
}

/// Parse one `<type> <tag_count> <tag>...` record.
fn parse_record(id: PhotoId, line: usize, text: &str) -> Result<Photo, FormatError> {
    let mut tokens = text.split_whitespace();

    let code = tokens.next().ok_or(FormatError::EmptyRecord { line })?;
    let orientation =
        Orientation::from_code(code).ok_or_else(|| FormatError::UnknownOrientation {
            line,
            value: code.to_string(),
        })?;

    let count = tokens.next().ok_or(FormatError::MissingTokens {
        line,
        expected: 2,
        found: 1,
    })?;
    let tag_count: usize = count.parse().map_err(|_| FormatError::InvalidTagCount {
        line,
        value: count.to_string(),
    })?;

    let taken: Vec<&str> = tokens.by_ref().take(tag_count).collect();
    if taken.len() < tag_count {
        return Err(FormatError::MissingTokens {
            line,
            expected: tag_count.saturating_add(2),
            found: taken.len() + 2,
        });
    }

    let extra = tokens.count();
    if extra > 0 {
        debug!(line, extra, "ignoring tokens past declared tag count");
    }

    let tags: Tags = taken.into_iter().map(str::to_owned).collect();
    Ok(Photo {
        id,
        orientation,
        tags,
    })
}
