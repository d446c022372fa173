//! Frameglass construction.
//!
//! Stage 2 of the pipeline. Every Landscape becomes a frameglass of its own;
//! Portraits are combined two at a time. Two policies decide which Portraits
//! end up together and in what order frameglasses come out.
//!
//! ## Sequential
//!
//! One left-to-right scan. A Landscape is emitted as soon as it is seen. A
//! Portrait is held back until the next Portrait arrives, then the two are
//! emitted as a pair, held one first. Landscapes and pairs interleave in
//! exactly the order the scan completes them.
//!
//! ## Shuffled
//!
//! Landscapes are emitted first, in input order. The Portraits are then put
//! through a random permutation and paired off as `(p0, p1), (p2, p3), ...`.
//! With `final_shuffle` on, the whole assembled list is permuted once more.
//!
//! ## Odd Portrait Out
//!
//! Both policies need an even number of Portraits to use them all. When the
//! count is odd, one Portrait is left over: under sequential it is the last
//! Portrait of the input, under shuffled it is the last one of the
//! permutation. It is excluded from the output and reported in
//! [`Assembly::dropped`] rather than emitted as a singleton.
//!
//! ## Randomness
//!
//! Permutations go through the [`Shuffler`] trait so callers pick the source.
//! [`RandomShuffler`] wraps a seedable RNG; a fixed seed makes every shuffle
//! reproducible.

use crate::types::{Frameglass, Orientation, Photo, PhotoId};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// How Portraits are matched up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PairingPolicy {
    /// Pair Portraits in input order, interleaved with Landscapes.
    #[default]
    Sequential,
    /// Pair Portraits after a random permutation.
    Shuffled,
}

impl fmt::Display for PairingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingPolicy::Sequential => f.write_str("sequential"),
            PairingPolicy::Shuffled => f.write_str("shuffled"),
        }
    }
}

/// Source of permutations for the shuffled policy.
pub trait Shuffler {
    /// Reorder `items` in place.
    fn shuffle<T>(&mut self, items: &mut [T]);
}

/// Uniform random permutations from a [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomShuffler {
    rng: StdRng,
}

impl RandomShuffler {
    /// Reproducible shuffler: the same seed always yields the same permutations.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Shuffler seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy-seeded otherwise.
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl Shuffler for RandomShuffler {
    fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }
}

/// Builder output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembly {
    pub frameglasses: Vec<Frameglass>,
    /// The unpaired Portrait left over when the Portrait count is odd.
    pub dropped: Option<PhotoId>,
}

impl Assembly {
    /// Number of photo ids placed across all frameglasses.
    pub fn placed_photos(&self) -> usize {
        self.frameglasses.iter().map(|fg| fg.ids().len()).sum()
    }
}

/// Group `photos` into frameglasses under `policy`.
///
/// `final_shuffle` only applies to [`PairingPolicy::Shuffled`]; the
/// sequential policy never consults the shuffler.
pub fn build_frameglasses<S: Shuffler>(
    photos: &[Photo],
    policy: PairingPolicy,
    final_shuffle: bool,
    shuffler: &mut S,
) -> Assembly {
    let assembly = match policy {
        PairingPolicy::Sequential => pair_sequential(photos),
        PairingPolicy::Shuffled => pair_shuffled(photos, final_shuffle, shuffler),
    };
    if let Some(id) = assembly.dropped {
        info!(photo = id, "odd portrait count, leaving one portrait out");
    }
    debug!(
        %policy,
        frameglasses = assembly.frameglasses.len(),
        "built frameglasses"
    );
    assembly
}

/// Single scan in input order, see the module docs.
pub fn pair_sequential(photos: &[Photo]) -> Assembly {
    let mut frameglasses = Vec::new();
    let mut pending: Option<&Photo> = None;

    for photo in photos {
        match photo.orientation {
            Orientation::Landscape => frameglasses.push(Frameglass::landscape(photo)),
            Orientation::Portrait => match pending.take() {
                Some(first) => frameglasses.push(Frameglass::portraits(first, photo)),
                None => pending = Some(photo),
            },
        }
    }

    Assembly {
        frameglasses,
        dropped: pending.map(|p| p.id),
    }
}

/// Landscapes in input order, then randomly paired Portraits, see the module docs.
pub fn pair_shuffled<S: Shuffler>(
    photos: &[Photo],
    final_shuffle: bool,
    shuffler: &mut S,
) -> Assembly {
    let mut frameglasses: Vec<Frameglass> = photos
        .iter()
        .filter(|p| p.orientation == Orientation::Landscape)
        .map(Frameglass::landscape)
        .collect();

    let mut portraits: Vec<&Photo> = photos.iter().filter(|p| p.is_portrait()).collect();
    shuffler.shuffle(&mut portraits);

    let mut pairs = portraits.chunks_exact(2);
    frameglasses.extend(pairs.by_ref().map(|pair| Frameglass::portraits(pair[0], pair[1])));
    let dropped = pairs.remainder().first().map(|p| p.id);

    if final_shuffle {
        shuffler.shuffle(&mut frameglasses);
    }

    Assembly {
        frameglasses,
        dropped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ReverseShuffler, all_ids, frame_ids, landscape, portrait};

    /// L0 P1 P2 L3 P4 P5 P6
    fn mixed() -> Vec<Photo> {
        vec![
            landscape(0, &["cat"]),
            portrait(1, &["sun"]),
            portrait(2, &["moon"]),
            landscape(3, &[]),
            portrait(4, &["a"]),
            portrait(5, &["b"]),
            portrait(6, &["c"]),
        ]
    }

    // =========================================================================
    // Sequential
    // =========================================================================

    #[test]
    fn sequential_pairs_in_encounter_order() {
        let photos = vec![
            landscape(0, &["cat", "dog"]),
            portrait(1, &["sun"]),
            portrait(2, &["moon"]),
        ];
        let assembly = pair_sequential(&photos);

        assert_eq!(frame_ids(&assembly), vec![vec![0], vec![1, 2]]);
        assert_eq!(assembly.dropped, None);
    }

    #[test]
    fn sequential_interleaves_as_scan_completes() {
        let assembly = pair_sequential(&mixed());
        assert_eq!(
            frame_ids(&assembly),
            vec![vec![0], vec![1, 2], vec![3], vec![4, 5]]
        );
    }

    #[test]
    fn sequential_emits_landscape_while_portrait_pending() {
        let photos = vec![portrait(0, &[]), landscape(1, &[]), portrait(2, &[])];
        let assembly = pair_sequential(&photos);
        assert_eq!(frame_ids(&assembly), vec![vec![1], vec![0, 2]]);
    }

    #[test]
    fn sequential_drops_last_odd_portrait() {
        let assembly = pair_sequential(&mixed());
        assert_eq!(assembly.dropped, Some(6));
        assert!(!all_ids(&assembly).contains(&6));
    }

    #[test]
    fn sequential_single_portrait_yields_nothing() {
        let assembly = pair_sequential(&[portrait(0, &["x"])]);
        assert!(assembly.frameglasses.is_empty());
        assert_eq!(assembly.dropped, Some(0));
    }

    #[test]
    fn sequential_places_every_id_once() {
        let photos = mixed();
        let assembly = pair_sequential(&photos);
        let mut ids = all_ids(&assembly);
        if let Some(d) = assembly.dropped {
            ids.push(d);
        }
        ids.sort();
        let expected: Vec<PhotoId> = photos.iter().map(|p| p.id).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn sequential_ignores_shuffler() {
        let mut shuffler = ReverseShuffler::default();
        let assembly =
            build_frameglasses(&mixed(), PairingPolicy::Sequential, true, &mut shuffler);
        assert_eq!(shuffler.calls, 0);
        assert_eq!(assembly, pair_sequential(&mixed()));
    }

    // =========================================================================
    // Shuffled
    // =========================================================================

    #[test]
    fn shuffled_puts_landscapes_first_then_permuted_pairs() {
        let mut shuffler = ReverseShuffler::default();
        let assembly = pair_shuffled(&mixed(), false, &mut shuffler);

        // Portraits 1 2 4 5 6 reversed: 6 5 4 2 1 -> (6,5) (4,2), 1 left over.
        assert_eq!(
            frame_ids(&assembly),
            vec![vec![0], vec![3], vec![6, 5], vec![4, 2]]
        );
        assert_eq!(assembly.dropped, Some(1));
        assert_eq!(shuffler.calls, 1);
    }

    #[test]
    fn shuffled_final_shuffle_permutes_whole_list() {
        let mut shuffler = ReverseShuffler::default();
        let assembly = pair_shuffled(&mixed(), true, &mut shuffler);

        assert_eq!(
            frame_ids(&assembly),
            vec![vec![4, 2], vec![6, 5], vec![3], vec![0]]
        );
        assert_eq!(shuffler.calls, 2);
    }

    #[test]
    fn shuffled_pair_tags_are_unions() {
        let photos = vec![portrait(0, &["sun", "sea"]), portrait(1, &["sea", "sky"])];
        let assembly = pair_shuffled(&photos, false, &mut ReverseShuffler::default());
        let tags: Vec<&str> = assembly.frameglasses[0]
            .tags()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(tags, vec!["sea", "sky", "sun"]);
    }

    #[test]
    fn shuffled_with_same_seed_is_reproducible() {
        let photos: Vec<Photo> = (0..40)
            .map(|i| if i % 3 == 0 { landscape(i, &[]) } else { portrait(i, &[]) })
            .collect();

        let a = pair_shuffled(&photos, true, &mut RandomShuffler::seeded(7));
        let b = pair_shuffled(&photos, true, &mut RandomShuffler::seeded(7));
        assert_eq!(a, b);
    }

    #[test]
    fn shuffled_count_invariant_holds() {
        let photos: Vec<Photo> = (0..26)
            .map(|i| if i % 4 == 0 { landscape(i, &[]) } else { portrait(i, &[]) })
            .collect();
        let landscapes = photos.iter().filter(|p| !p.is_portrait()).count();
        let portraits = photos.len() - landscapes;

        let assembly = pair_shuffled(&photos, true, &mut RandomShuffler::from_entropy());

        assert_eq!(assembly.placed_photos(), landscapes + 2 * (portraits / 2));
        let mut ids = all_ids(&assembly);
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), assembly.placed_photos());
        assert!(assembly.dropped.is_some());
    }

    #[test]
    fn empty_input_builds_nothing() {
        for policy in [PairingPolicy::Sequential, PairingPolicy::Shuffled] {
            let assembly =
                build_frameglasses(&[], policy, true, &mut RandomShuffler::seeded(1));
            assert!(assembly.frameglasses.is_empty());
            assert_eq!(assembly.dropped, None);
        }
    }

    #[test]
    fn policy_parses_from_toml_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: PairingPolicy,
        }
        let w: Wrapper = toml::from_str("policy = \"shuffled\"").unwrap();
        assert_eq!(w.policy, PairingPolicy::Shuffled);
        assert_eq!(PairingPolicy::default(), PairingPolicy::Sequential);
    }
}
