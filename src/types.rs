//! Photo and frameglass records shared by the parser, builder and writer.
//!
//! Both types are immutable once constructed. A [`Frameglass`] can only be
//! made through [`Frameglass::landscape`] or [`Frameglass::portraits`], so
//! the one-Landscape-or-two-Portraits shape is enforced at construction.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Position of a photo among the input records, starting at 0.
pub type PhotoId = usize;

/// Tag set of a photo or frameglass. Ordered so output is stable.
pub type Tags = BTreeSet<String>;

/// Photo orientation, written as `L` or `P` in the input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Landscape,
    Portrait,
}

impl Orientation {
    /// Decode the single-letter type code. Anything but `L`/`P` is rejected.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "L" => Some(Orientation::Landscape),
            "P" => Some(Orientation::Portrait),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            Orientation::Landscape => 'L',
            Orientation::Portrait => 'P',
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Landscape => f.write_str("landscape"),
            Orientation::Portrait => f.write_str("portrait"),
        }
    }
}

/// One input record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub id: PhotoId,
    pub orientation: Orientation,
    pub tags: Tags,
}

impl Photo {
    pub fn is_portrait(&self) -> bool {
        self.orientation == Orientation::Portrait
    }
}

/// A display unit: one Landscape, or two Portraits side by side.
///
/// `ids` keeps member order (for Portrait pairs, the first-placed photo comes
/// first). `tags` is the union of member tags; the writer never reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Frameglass {
    ids: Vec<PhotoId>,
    tags: Tags,
}

impl Frameglass {
    pub fn landscape(photo: &Photo) -> Self {
        debug_assert_eq!(photo.orientation, Orientation::Landscape);
        Self {
            ids: vec![photo.id],
            tags: photo.tags.clone(),
        }
    }

    pub fn portraits(first: &Photo, second: &Photo) -> Self {
        debug_assert!(first.is_portrait() && second.is_portrait());
        debug_assert_ne!(first.id, second.id);
        Self {
            ids: vec![first.id, second.id],
            tags: first.tags.union(&second.tags).cloned().collect(),
        }
    }

    pub fn ids(&self) -> &[PhotoId] {
        &self.ids
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn is_pair(&self) -> bool {
        self.ids.len() == 2
    }
}
