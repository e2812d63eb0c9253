use crate::clock::Clock;
use crate::commands::{no_chunks_message, preview, CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{ChunkPolicy, RenderJob};
use crate::packager::{package_in, PackageLayout, PackageMode};
use crate::template::TemplateSet;
use std::path::Path;

/// Renders the batch and bundles it into a single archive under `work_dir`.
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

    let outcome = package_in(work_dir, &documents, layout, PackageMode::Archive)?;
    let chunks = documents.iter().map(|d| d.chunk).collect();
    result = result
        .with_chunks(chunks)
        .with_directory(outcome.directory);

    if let Some(archive) = outcome.archive {
        result.add_message(CmdMessage::success(format!(
            "Archived {} scripts",
            outcome.script_count
        )));
        result = result.with_archive(archive);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use flate2::read::GzDecoder;
    use std::fs::File;

    #[test]
    fn test_archives_every_chunk() {
        let work = tempfile::tempdir().unwrap();
        let templates = TemplateSet::builtin().unwrap();
        let job = RenderJob::new("paper_dancer", "scene.ma", "images", 1, 10, 3).unwrap();

        let res = run(
            &templates,
            &SystemClock,
            &job,
            ChunkPolicy::Complete,
            &PackageLayout::default(),
            work.path(),
        )
        .unwrap();

        let archive = res.archive.unwrap();
        assert!(archive.ends_with("beals_render.tar.gz"));
        assert_eq!(res.chunks.len(), 4);

        let mut tar = tar::Archive::new(GzDecoder::new(File::open(&archive).unwrap()));
        let names: Vec<String> = tar
            .entries()
            .unwrap()
            .map(|e| e.unwrap().path().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            vec![
                "beals_render/beals_render_0.bat",
                "beals_render/beals_render_1.bat",
                "beals_render/beals_render_2.bat",
                "beals_render/beals_render_3.bat",
            ]
        );
    }

    #[test]
    fn test_custom_layout() {
        let work = tempfile::tempdir().unwrap();
        let templates = TemplateSet::builtin().unwrap();
        let job = RenderJob::new("p", "i", "o", 1, 2, 1).unwrap();
        let layout = PackageLayout {
            archive_name: "shots.tar.gz".into(),
            temp_prefix: "shots_".into(),
            ..PackageLayout::default()
        };

        let res = run(
            &templates,
            &SystemClock,
            &job,
            ChunkPolicy::Complete,
            &layout,
            work.path(),
        )
        .unwrap();

        let archive = res.archive.unwrap();
        assert!(archive.ends_with("shots.tar.gz"));
        let dir_name = res.directory.unwrap();
        assert!(dir_name
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("shots_"));
    }
}
