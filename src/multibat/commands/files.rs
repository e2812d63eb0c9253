use crate::clock::Clock;
use crate::commands::{no_chunks_message, preview, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ChunkPolicy, RenderJob};
use crate::packager::{package_in, PackageLayout, PackageMode};
use crate::template::TemplateSet;
use std::path::Path;

/// Writes one script per chunk into a fresh directory under `work_dir`.
pub fn run<C: Clock + ?Sized>(
    templates: &TemplateSet,
    clock: &C,
    job: &RenderJob,
    policy: ChunkPolicy,
    layout: &PackageLayout,
    work_dir: &Path,
) -> Result<CmdResult> {
    let documents = preview::render_data(templates, clock, job, policy)?;

    let mut result = CmdResult::default();
    if documents.is_empty() {
        result.add_message(no_chunks_message());
        return Ok(result);
    }

    let outcome = package_in(work_dir, &documents, layout, PackageMode::Files)?;
    result.add_message(CmdMessage::success(format!(
        "Wrote {} scripts to {}",
        outcome.script_count,
        outcome.directory.display()
    )));

    let chunks = documents.iter().map(|d| d.chunk).collect();
    Ok(result
        .with_chunks(chunks)
        .with_directory(outcome.directory)
        .with_paths(outcome.files))
}
