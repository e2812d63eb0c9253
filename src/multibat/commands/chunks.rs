use crate::chunker::chunks_for;
use crate::commands::{no_chunks_message, CmdResult};
use crate::error::Result;
use crate::model::{ChunkPolicy, RenderJob};

pub fn run(job: &RenderJob, policy: ChunkPolicy) -> Result<CmdResult> {
    let chunks = chunks_for(job, policy);

    let mut result = CmdResult::default();
    if chunks.is_empty() {
        result.add_message(no_chunks_message());
    }
    Ok(result.with_chunks(chunks))
}
