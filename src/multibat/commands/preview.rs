use crate::chunker::chunks_for;
use crate::clock::Clock;
use crate::commands::{no_chunks_message, CmdResult};
use crate::error::Result;
use crate::model::{ChunkPolicy, RenderJob};
use crate::template::{render_documents, render_text, RenderedDocument, TemplateSet};

/// One rendered script per chunk, in chunk order.
pub fn render_data<C: Clock + ?Sized>(
    templates: &TemplateSet,
    clock: &C,
    job: &RenderJob,
    policy: ChunkPolicy,
) -> Result<Vec<RenderedDocument>> {
    let chunks = chunks_for(job, policy);
    render_documents(templates, job, &chunks, clock)
}

/// Renders the whole batch as a single stream.
pub fn run<C: Clock + ?Sized>(
    templates: &TemplateSet,
    clock: &C,
    job: &RenderJob,
    policy: ChunkPolicy,
) -> Result<CmdResult> {
    let documents = render_data(templates, clock, job, policy)?;

    let mut result = CmdResult::default();
    if documents.is_empty() {
        result.add_message(no_chunks_message());
    }

    let chunks = documents.iter().map(|d| d.chunk).collect();
    Ok(result
        .with_chunks(chunks)
        .with_text(render_text(&documents)))
}
