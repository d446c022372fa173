//! One complete run: parse → build → write.
//!
//! The output file is only touched after parsing and building have both
//! succeeded, so any input error leaves the destination as it was.

use crate::config::RunConfig;
use crate::pairing::{self, Assembly, RandomShuffler, Shuffler};
use crate::parse::{self, ParseError};
use crate::serialize::{self, WriteError};
use crate::types::{Orientation, Photo};
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("Failed to read input: {0}")]
    Parse(#[from] ParseError),
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),
}

/// What a run read and produced.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub landscapes: usize,
    pub portraits: usize,
    pub assembly: Assembly,
}

impl RunSummary {
    pub fn total_photos(&self) -> usize {
        self.landscapes + self.portraits
    }
}

/// Run the pipeline with the shuffler `config` asks for.
pub fn run(input: &Path, output: &Path, config: &RunConfig) -> Result<RunSummary, RunError> {
    let mut shuffler = RandomShuffler::new(config.random_seed);
    run_with(input, output, config, &mut shuffler)
}

/// Run the pipeline with a caller-supplied shuffler.
#[tracing::instrument(skip_all, fields(input = %input.display(), output = %output.display()))]
pub fn run_with<S: Shuffler>(
    input: &Path,
    output: &Path,
    config: &RunConfig,
    shuffler: &mut S,
) -> Result<RunSummary, RunError> {
    let photos = parse::parse_file(input)?;
    let summary = assemble(photos, config, shuffler);
    serialize::write_output(output, &summary.assembly.frameglasses)?;
    info!(
        photos = summary.total_photos(),
        frameglasses = summary.assembly.frameglasses.len(),
        "run complete"
    );
    Ok(summary)
}

/// Parse and build without writing anything.
pub fn preview(input: &Path, config: &RunConfig) -> Result<RunSummary, RunError> {
    let photos = parse::parse_file(input)?;
    let mut shuffler = RandomShuffler::new(config.random_seed);
    Ok(assemble(photos, config, &mut shuffler))
}

fn assemble<S: Shuffler>(photos: Vec<Photo>, config: &RunConfig, shuffler: &mut S) -> RunSummary {
    let landscapes = photos
        .iter()
        .filter(|p| p.orientation == Orientation::Landscape)
        .count();
    let assembly = pairing::build_frameglasses(
        &photos,
        config.pairing_policy,
        config.final_shuffle,
        shuffler,
    );
    RunSummary {
        landscapes,
        portraits: photos.len() - landscapes,
        assembly,
    }
}
