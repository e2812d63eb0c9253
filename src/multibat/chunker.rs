//! # Range Chunker
//!
//! Splits an inclusive frame range `[first, last]` into consecutive chunks of
//! at most `step` frames. Chunk `i` starts at `first + step * i` and ends at
//! `min(first + step * (i + 1) - 1, last)`.
//!
//! The result is a plain `Vec`, so enumerating it twice always gives the same
//! chunks.
//!
//! ## Boundary policies
//!
//! [`ChunkPolicy::Complete`] guarantees the chunks cover the whole range, so
//! even a single frame yields one chunk.
//!
//! [`ChunkPolicy::Legacy`] replays the historical loop, which tests the
//! *previous* chunk's end against `last` before emitting the next chunk and
//! seeds that end with `first + step`. Whenever `first + step >= last` the
//! loop never runs and no chunks are produced (`101..=101`, or `1..=3` in
//! steps of 2). It exists only to reproduce old batches exactly.

use crate::error::Result;
use crate::model::{validate_range, Chunk, ChunkPolicy, RenderJob};
use tracing::debug;

/// Chunks for an already validated job.
pub fn chunks_for(job: &RenderJob, policy: ChunkPolicy) -> Vec<Chunk> {
    let chunks = match policy {
        ChunkPolicy::Complete => complete_chunks(job.first(), job.last(), job.step()),
        ChunkPolicy::Legacy => legacy_chunks(job.first(), job.last(), job.step()),
    };
    debug!(
        first = job.first(),
        last = job.last(),
        step = job.step(),
        ?policy,
        count = chunks.len(),
        "chunked frame range"
    );
    chunks
}

/// Validates the raw bounds, then chunks them.
pub fn chunk_range(first: i64, last: i64, step: i64, policy: ChunkPolicy) -> Result<Vec<Chunk>> {
    validate_range(first, last, step)?;

    Ok(match policy {
        ChunkPolicy::Complete => complete_chunks(first, last, step),
        ChunkPolicy::Legacy => legacy_chunks(first, last, step),
    })
}

fn chunk_end(start: i64, last: i64, step: i64) -> i64 {
    start.saturating_add(step - 1).min(last)
}

fn complete_chunks(first: i64, last: i64, step: i64) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut start = first;

    loop {
        let end = chunk_end(start, last, step);
        chunks.push(Chunk::new(chunks.len(), start, end));
        if end >= last {
            break;
        }
        start = end + 1;
    }

    chunks
}

fn legacy_chunks(first: i64, last: i64, step: i64) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut cur_end = first.saturating_add(step);

    while cur_end < last {
        // The previous end is below `last` here, so `+ 1` cannot overflow.
        let start = if chunks.is_empty() { first } else { cur_end + 1 };
        cur_end = chunk_end(start, last, step);
        chunks.push(Chunk::new(chunks.len(), start, cur_end));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MultibatError;

    fn bounds(chunks: &[Chunk]) -> Vec<(i64, i64)> {
        chunks.iter().map(|c| (c.start, c.end)).collect()
    }

    fn assert_partitions(chunks: &[Chunk], first: i64, last: i64, step: i64) {
        assert!(!chunks.is_empty(), "no chunks for {}..={}", first, last);
        assert_eq!(chunks[0].start, first);
        assert_eq!(chunks[chunks.len() - 1].end, last);
        for (i, chunk) in chunks.iter().enumerate() {
            assert_eq!(chunk.index, i);
            assert!(chunk.start <= chunk.end);
            assert!(chunk.frame_count() <= step as u64);
            if i > 0 {
                assert_eq!(chunk.start, chunks[i - 1].end + 1, "gap or overlap at {}", i);
            }
        }
    }

    #[test]
    fn test_reference_example() {
        let chunks = chunk_range(101, 110, 2, ChunkPolicy::Complete).unwrap();
        assert_eq!(
            bounds(&chunks),
            vec![(101, 102), (103, 104), (105, 106), (107, 108), (109, 110)]
        );
    }

    #[test]
    fn test_reference_example_matches_legacy() {
        let complete = chunk_range(101, 110, 2, ChunkPolicy::Complete).unwrap();
        let legacy = chunk_range(101, 110, 2, ChunkPolicy::Legacy).unwrap();
        assert_eq!(complete, legacy);
    }

    #[test]
    fn test_partitions_many_ranges() {
        for first in -5..5 {
            for len in 1..25 {
                for step in 1..12 {
                    let last = first + len - 1;
                    let chunks = chunk_range(first, last, step, ChunkPolicy::Complete).unwrap();
                    assert_partitions(&chunks, first, last, step);
                }
            }
        }
    }

    #[test]
    fn test_chunk_starts_follow_step() {
        let chunks = chunk_range(10, 40, 7, ChunkPolicy::Complete).unwrap();
        for chunk in &chunks {
            assert_eq!(chunk.start, 10 + 7 * chunk.index as i64);
        }
        assert_eq!(bounds(&chunks).last(), Some(&(38, 40)));
    }

    #[test]
    fn test_single_frame_yields_one_chunk() {
        let chunks = chunk_range(101, 101, 2, ChunkPolicy::Complete).unwrap();
        assert_eq!(bounds(&chunks), vec![(101, 101)]);
    }

    #[test]
    fn test_step_larger_than_range_yields_one_chunk() {
        let chunks = chunk_range(1, 5, 10, ChunkPolicy::Complete).unwrap();
        assert_eq!(bounds(&chunks), vec![(1, 5)]);
    }

    #[test]
    fn test_step_of_one() {
        let chunks = chunk_range(3, 6, 1, ChunkPolicy::Complete).unwrap();
        assert_eq!(bounds(&chunks), vec![(3, 3), (4, 4), (5, 5), (6, 6)]);
    }

    #[test]
    fn test_repeatable() {
        let a = chunk_range(0, 99, 8, ChunkPolicy::Complete).unwrap();
        let b = chunk_range(0, 99, 8, ChunkPolicy::Complete).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_range_at_i64_max_does_not_overflow() {
        let chunks = chunk_range(i64::MAX - 4, i64::MAX, 3, ChunkPolicy::Complete).unwrap();
        assert_eq!(
            bounds(&chunks),
            vec![(i64::MAX - 4, i64::MAX - 2), (i64::MAX - 1, i64::MAX)]
        );

        let huge_step = chunk_range(0, 10, i64::MAX, ChunkPolicy::Complete).unwrap();
        assert_eq!(bounds(&huge_step), vec![(0, 10)]);
    }

    #[test]
    fn test_legacy_drops_single_frame() {
        let chunks = chunk_range(101, 101, 2, ChunkPolicy::Legacy).unwrap();
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_legacy_drops_short_ranges() {
        // first + step reaches last before the loop starts
        assert!(chunk_range(1, 3, 2, ChunkPolicy::Legacy).unwrap().is_empty());
        assert!(chunk_range(1, 5, 10, ChunkPolicy::Legacy).unwrap().is_empty());
        assert_eq!(
            bounds(&chunk_range(1, 3, 2, ChunkPolicy::Complete).unwrap()),
            vec![(1, 2), (3, 3)]
        );
    }

    #[test]
    fn test_legacy_keeps_short_final_chunk() {
        let chunks = chunk_range(1, 5, 2, ChunkPolicy::Legacy).unwrap();
        assert_eq!(bounds(&chunks), vec![(1, 2), (3, 4), (5, 5)]);
    }

    #[test]
    fn test_legacy_agrees_once_range_is_long_enough() {
        for first in 0..4 {
            for step in 1..6 {
                for last in (first + step + 1)..(first + 30) {
                    assert_eq!(
                        chunk_range(first, last, step, ChunkPolicy::Legacy).unwrap(),
                        chunk_range(first, last, step, ChunkPolicy::Complete).unwrap(),
                        "first={} last={} step={}",
                        first,
                        last,
                        step
                    );
                }
            }
        }
    }

    #[test]
    fn test_rejects_invalid_bounds() {
        assert!(matches!(
            chunk_range(1, 10, 0, ChunkPolicy::Complete),
            Err(MultibatError::InvalidRange(_))
        ));
        assert!(matches!(
            chunk_range(10, 1, 2, ChunkPolicy::Legacy),
            Err(MultibatError::InvalidRange(_))
        ));
    }

    #[test]
    fn test_chunks_for_job() {
        let job = RenderJob::new("p", "i", "o", 1, 4, 2).unwrap();
        assert_eq!(
            bounds(&chunks_for(&job, ChunkPolicy::Complete)),
            vec![(1, 2), (3, 4)]
        );
    }
}
