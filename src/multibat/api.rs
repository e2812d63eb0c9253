//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! multibat operation, whatever the UI.
//!
//! The facade owns the pieces that stay fixed across calls (the clock, the
//! compiled template, the package layout and the directory fresh batches are
//! created under) and passes them to `commands::*`. It does no business logic
//! and no terminal I/O; results come back as [`CmdResult`] values.
//!
//! ## Generic Over Clock
//!
//! `MultibatApi<C: Clock>` is generic over the time source:
//! - Production: `MultibatApi<SystemClock>`
//! - Testing: `MultibatApi<FixedClock>`, so rendered output is reproducible.

use crate::clock::Clock;
use crate::commands;
use crate::error::Result;
use crate::model::{ChunkPolicy, RenderJob};
use crate::packager::PackageLayout;
use crate::template::{render_text, RenderedDocument, TemplateSet};
use std::path::{Path, PathBuf};

pub struct MultibatApi<C: Clock> {
    clock: C,
    templates: TemplateSet,
    layout: PackageLayout,
    work_dir: PathBuf,
}

impl<C: Clock> MultibatApi<C> {
    pub fn new(clock: C, templates: TemplateSet, layout: PackageLayout) -> Self {
        Self {
            clock,
            templates,
            layout,
            work_dir: std::env::temp_dir(),
        }
    }

    /// Creates batch directories under `dir` instead of the system temp dir.
    pub fn with_work_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.work_dir = dir.into();
        self
    }

    pub fn chunks(&self, job: &RenderJob, policy: ChunkPolicy) -> Result<commands::CmdResult> {
        commands::chunks::run(job, policy)
    }

    pub fn render_data(
        &self,
        job: &RenderJob,
        policy: ChunkPolicy,
    ) -> Result<Vec<RenderedDocument>> {
        commands::preview::render_data(&self.templates, &self.clock, job, policy)
    }

    pub fn render_text(&self, job: &RenderJob, policy: ChunkPolicy) -> Result<String> {
        Ok(render_text(&self.render_data(job, policy)?))
    }

    pub fn preview(&self, job: &RenderJob, policy: ChunkPolicy) -> Result<commands::CmdResult> {
        commands::preview::run(&self.templates, &self.clock, job, policy)
    }

    pub fn write_files(
        &self,
        job: &RenderJob,
        policy: ChunkPolicy,
    ) -> Result<commands::CmdResult> {
        commands::files::run(
            &self.templates,
            &self.clock,
            job,
            policy,
            &self.layout,
            &self.work_dir,
        )
    }

    pub fn archive(&self, job: &RenderJob, policy: ChunkPolicy) -> Result<commands::CmdResult> {
        commands::archive::run(
            &self.templates,
            &self.clock,
            job,
            policy,
            &self.layout,
            &self.work_dir,
        )
    }

    pub fn layout(&self) -> &PackageLayout {
        &self.layout
    }
}

/// Writes a starter config file. Needs no job, so it is not tied to an
/// `MultibatApi` instance.
pub fn init_config(path: &Path, force: bool) -> Result<commands::CmdResult> {
    commands::init::run(path, force)
}

pub use commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::template::{split_documents, DEFAULT_MARKER};
    use chrono::NaiveDate;

    fn api() -> MultibatApi<FixedClock> {
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2026, 10, 19)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
        );
        MultibatApi::new(
            clock,
            TemplateSet::builtin().unwrap(),
            PackageLayout::default(),
        )
    }

    fn job() -> RenderJob {
        RenderJob::new("paper_dancer", "scene.ma", "images", 101, 110, 2).unwrap()
    }

    #[test]
    fn test_chunks_dispatch() {
        let res = api().chunks(&job(), ChunkPolicy::Complete).unwrap();
        assert_eq!(res.chunks.len(), 5);
    }

    #[test]
    fn test_render_text_matches_preview() {
        let api = api();
        let text = api.render_text(&job(), ChunkPolicy::Complete).unwrap();
        let preview = api.preview(&job(), ChunkPolicy::Complete).unwrap();
        assert_eq!(preview.text.as_deref(), Some(text.as_str()));

        let docs = api.render_data(&job(), ChunkPolicy::Complete).unwrap();
        assert_eq!(split_documents(&text, DEFAULT_MARKER).len(), docs.len());
        assert!(text.contains("at Mon Oct 19 08:00:00 2026"));
    }

    #[test]
    fn test_write_files_uses_work_dir() {
        let work = tempfile::tempdir().unwrap();
        let api = api().with_work_dir(work.path());
        let res = api.write_files(&job(), ChunkPolicy::Complete).unwrap();
        assert!(res.directory.unwrap().starts_with(work.path()));
        assert_eq!(res.paths.len(), 5);
    }

    #[test]
    fn test_archive_uses_layout() {
        let work = tempfile::tempdir().unwrap();
        let api = api().with_work_dir(work.path());
        let res = api.archive(&job(), ChunkPolicy::Complete).unwrap();
        let archive = res.archive.unwrap();
        assert!(archive.ends_with(&api.layout().archive_name));
        assert!(archive.exists());
    }

    #[test]
    fn test_init_config_dispatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multibat.json");
        init_config(&path, false).unwrap();
        assert!(path.exists());
    }
}
