//! Shared test utilities for the frameglass test suite.
//!
//! Photo constructors, an input file writer, a deterministic shuffler, and
//! extractors that flatten builder output into plain id lists for asserts.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let photos = vec![landscape(0, &["cat"]), portrait(1, &[]), portrait(2, &[])];
//! let assembly = pair_sequential(&photos);
//! assert_eq!(frame_ids(&assembly), vec![vec![0], vec![1, 2]]);
//! ```

use std::path::{Path, PathBuf};

use crate::pairing::{Assembly, Shuffler};
use crate::types::{Orientation, Photo, PhotoId, Tags};

// =========================================================================
// Photo constructors
// =========================================================================

fn photo(id: PhotoId, orientation: Orientation, tags: &[&str]) -> Photo {
    Photo {
        id,
        orientation,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

pub fn landscape(id: PhotoId, tags: &[&str]) -> Photo {
    photo(id, Orientation::Landscape, tags)
}

pub fn portrait(id: PhotoId, tags: &[&str]) -> Photo {
    photo(id, Orientation::Portrait, tags)
}

// =========================================================================
// Fixture files
// =========================================================================

/// Write an input file with the correct count header followed by `records`.
pub fn write_input(dir: &Path, name: &str, records: &[&str]) -> PathBuf {
    let mut content = format!("{}\n", records.len());
    for record in records {
        content.push_str(record);
        content.push('\n');
    }
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// =========================================================================
// Shufflers
// =========================================================================

/// Deterministic stand-in for a random shuffler: reverses the slice and
/// counts how often it was asked.
#[derive(Debug, Default)]
pub struct ReverseShuffler {
    pub calls: usize,
}

impl Shuffler for ReverseShuffler {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        self.calls += 1;
        items.reverse();
    }
}

// =========================================================================
// Extractors
// =========================================================================

/// Member ids of each frameglass, in output order.
pub fn frame_ids(assembly: &Assembly) -> Vec<Vec<PhotoId>> {
    assembly
        .frameglasses
        .iter()
        .map(|fg| fg.ids().to_vec())
        .collect()
}

/// Every placed id, flattened in output order.
pub fn all_ids(assembly: &Assembly) -> Vec<PhotoId> {
    frame_ids(assembly).into_iter().flatten().collect()
}

/// Tags as sorted `&str`s.
pub fn tag_list(tags: &Tags) -> Vec<&str> {
    tags.iter().map(String::as_str).collect()
}
