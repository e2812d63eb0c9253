use crate::error::{MultibatError, Result};
use serde::Serialize;

/// One batch-generation request: where the scene lives, where frames go, and
/// which frames to render in how large steps.
///
/// Only constructible through [`RenderJob::new`], so a job in hand always has
/// `step >= 1` and `first <= last`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderJob {
    project: String,
    input_file: String,
    output_directory: String,
    first: i64,
    last: i64,
    step: i64,
}

impl RenderJob {
    pub fn new(
        project: impl Into<String>,
        input_file: impl Into<String>,
        output_directory: impl Into<String>,
        first: i64,
        last: i64,
        step: i64,
    ) -> Result<Self> {
        validate_range(first, last, step)?;

        Ok(Self {
            project: project.into(),
            input_file: input_file.into(),
            output_directory: output_directory.into(),
            first,
            last,
            step,
        })
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn input_file(&self) -> &str {
        &self.input_file
    }

    pub fn output_directory(&self) -> &str {
        &self.output_directory
    }

    pub fn first(&self) -> i64 {
        self.first
    }

    pub fn last(&self) -> i64 {
        self.last
    }

    pub fn step(&self) -> i64 {
        self.step
    }
}

/// Rejects ranges the chunker cannot walk: a non-positive step or a reversed
/// range.
pub(crate) fn validate_range(first: i64, last: i64, step: i64) -> Result<()> {
    if step <= 0 {
        return Err(MultibatError::InvalidRange(format!(
            "step must be at least 1, got {}",
            step
        )));
    }
    if first > last {
        return Err(MultibatError::InvalidRange(format!(
            "first frame {} is after last frame {}",
            first, last
        )));
    }
    Ok(())
}

/// A contiguous, inclusive sub-range of frames handled by one script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Chunk {
    pub index: usize,
    pub start: i64,
    pub end: i64,
}

impl Chunk {
    pub fn new(index: usize, start: i64, end: i64) -> Self {
        Self { index, start, end }
    }

    /// Number of frames covered, both ends included.
    pub fn frame_count(&self) -> u64 {
        self.end.abs_diff(self.start) + 1
    }
}

/// How the chunker treats the end of the range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChunkPolicy {
    /// Always cover `[first, last]` completely.
    #[default]
    Complete,
    /// Reproduce the historical loop, which emits nothing when
    /// `first + step >= last`.
    Legacy,
}
