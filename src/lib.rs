//! # Frameglass
//!
//! Turns a list of tagged photos into *frameglasses*, the display units of a
//! slideshow submission. A Landscape photo fills a frameglass on its own; two
//! Portrait photos share one.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Parse      input.txt  →  Vec<Photo>       (text records → typed photos)
//! 2. Pair       photos     →  Vec<Frameglass>  (Landscapes alone, Portraits in twos)
//! 3. Serialize  frames     →  output.txt       (count header + one id line each)
//! ```
//!
//! Each stage is a plain function over owned or borrowed data. Nothing runs at
//! load time and no state survives between runs; [`pipeline::run`] wires the
//! three stages together for one input/output pair.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`parse`] | Stage 1 — reads the `N` + `<type> <tag_count> <tags>` input format |
//! | [`pairing`] | Stage 2 — sequential and shuffled pairing policies, seedable shuffler |
//! | [`serialize`] | Stage 3 — writes the output format atomically |
//! | [`pipeline`] | Runs the three stages and reports what happened |
//! | [`config`] | `frameglass.toml` loading, merging with CLI overrides, validation |
//! | [`types`] | `Photo` and `Frameglass` records shared by every stage |
//! | [`output`] | CLI output formatting for each command |
//!
//! # Design Decisions
//!
//! ## 0-Based Ids, Frameglass-Count Header
//!
//! A photo's id is its position among the input records, starting at 0. The
//! first output line is the number of frameglasses, not the number of photos.
//!
//! ## Odd Portrait Out
//!
//! With an odd number of Portraits, one cannot be paired. It is left out of
//! the output entirely and reported in [`pairing::Assembly::dropped`] so the
//! caller can see which photo went missing.
//!
//! ## Injected Randomness
//!
//! The shuffled policy draws its permutations from a [`pairing::Shuffler`]
//! passed in by the caller. A `random_seed` in the config makes runs
//! reproducible; tests use a deterministic shuffler.

pub mod config;
pub mod output;
pub mod pairing;
pub mod parse;
pub mod pipeline;
pub mod serialize;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
