//! # Packager
//!
//! Persists rendered scripts. Every call works in a fresh temporary directory:
//! scripts are written as `<prefix>_<index>.<ext>`, and in archive mode they
//! are bundled into a gzip tar under a common top-level folder and the loose
//! copies removed.
//!
//! The directory is handed back to the caller on success. If any step fails
//! the error names the offending path and the whole directory is removed on a
//! best-effort basis.

use crate::error::{MultibatError, Result};
use crate::template::RenderedDocument;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

fn default_file_prefix() -> String {
    "beals_render".to_string()
}

fn default_file_ext() -> String {
    "bat".to_string()
}

fn default_archive_folder() -> String {
    "beals_render".to_string()
}

fn default_archive_name() -> String {
    "beals_render.tar.gz".to_string()
}

fn default_temp_prefix() -> String {
    "beals_render_".to_string()
}

/// Names used for generated files, the archive, and its temp directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PackageLayout {
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Extension without the leading dot
    #[serde(default = "default_file_ext")]
    pub file_ext: String,

    /// Top-level folder every archive entry is stored under
    #[serde(default = "default_archive_folder")]
    pub archive_folder: String,

    #[serde(default = "default_archive_name")]
    pub archive_name: String,

    #[serde(default = "default_temp_prefix")]
    pub temp_prefix: String,
}

impl Default for PackageLayout {
    fn default() -> Self {
        Self {
            file_prefix: default_file_prefix(),
            file_ext: default_file_ext(),
            archive_folder: default_archive_folder(),
            archive_name: default_archive_name(),
            temp_prefix: default_temp_prefix(),
        }
    }
}

impl PackageLayout {
    pub fn file_name(&self, index: usize) -> String {
        format!(
            "{}_{}.{}",
            self.file_prefix,
            index,
            self.file_ext.trim_start_matches('.')
        )
    }

    pub fn entry_name(&self, file_name: &str) -> String {
        format!("{}/{}", self.archive_folder, file_name)
    }

    /// Every name must stay a single component inside the batch directory,
    /// and the archive must not share a name with any script.
    pub fn validate(&self) -> Result<()> {
        check_component("file_prefix", &self.file_prefix)?;
        check_component("file_ext", self.file_ext.trim_start_matches('.'))?;
        check_component("archive_folder", &self.archive_folder)?;
        check_component("archive_name", &self.archive_name)?;
        if self.temp_prefix.contains(['/', '\\']) {
            return Err(MultibatError::InvalidLayout(format!(
                "temp_prefix {:?} contains a path separator",
                self.temp_prefix
            )));
        }

        if self.is_script_name(&self.archive_name) {
            return Err(MultibatError::InvalidLayout(format!(
                "archive_name {:?} collides with a script name",
                self.archive_name
            )));
        }
        Ok(())
    }

    fn is_script_name(&self, name: &str) -> bool {
        let prefix = format!("{}_", self.file_prefix);
        let suffix = format!(".{}", self.file_ext.trim_start_matches('.'));
        name.strip_prefix(&prefix)
            .and_then(|rest| rest.strip_suffix(&suffix))
            .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
    }
}

fn check_component(field: &str, value: &str) -> Result<()> {
    if value.is_empty() || value == "." || value == ".." || value.contains(['/', '\\']) {
        return Err(MultibatError::InvalidLayout(format!(
            "{} {:?} must be a plain file name",
            field, value
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageMode {
    /// Leave the scripts in the temporary directory.
    Files,
    /// Bundle the scripts into one archive and delete the loose copies.
    Archive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageOutcome {
    pub directory: PathBuf,
    /// Scripts still present on disk (empty in archive mode).
    pub files: Vec<PathBuf>,
    pub archive: Option<PathBuf>,
    pub script_count: usize,
}

/// Packages `documents` in a new directory under `parent`.
pub fn package_in(
    parent: &Path,
    documents: &[RenderedDocument],
    layout: &PackageLayout,
    mode: PackageMode,
) -> Result<PackageOutcome> {
    layout.validate()?;

    // Dropping `temp` on an early return deletes everything written so far.
    let temp = tempfile::Builder::new()
        .prefix(&layout.temp_prefix)
        .tempdir_in(parent)?;
    debug!(dir = %temp.path().display(), "created temporary script directory");

    let written = write_files(temp.path(), documents, layout)?;

    let (files, archive) = match mode {
        PackageMode::Files => (written, None),
        PackageMode::Archive => {
            let archive_path = temp.path().join(&layout.archive_name);
            let file = File::create(&archive_path)
                .map_err(|e| MultibatError::write_file(&archive_path, e))?;
            write_archive(file, &archive_path, &written, layout)?;

            remove_files(&written)?;
            info!(
                archive = %archive_path.display(),
                scripts = written.len(),
                "wrote script archive"
            );
            (Vec::new(), Some(archive_path))
        }
    };

    Ok(PackageOutcome {
        directory: temp.keep(),
        files,
        archive,
        script_count: documents.len(),
    })
}

/// Writes each document to `dir`, in order. Stops at the first failure.
pub fn write_files(
    dir: &Path,
    documents: &[RenderedDocument],
    layout: &PackageLayout,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::with_capacity(documents.len());

    for (index, document) in documents.iter().enumerate() {
        let path = dir.join(layout.file_name(index));
        let mut file = File::create(&path).map_err(|e| MultibatError::write_file(&path, e))?;
        file.write_all(document.as_str().as_bytes())
            .map_err(|e| MultibatError::write_file(&path, e))?;
        debug!(path = %path.display(), "wrote script");
        paths.push(path);
    }

    info!(dir = %dir.display(), scripts = paths.len(), "wrote scripts");
    Ok(paths)
}

fn remove_files(paths: &[PathBuf]) -> Result<()> {
    for path in paths {
        fs::remove_file(path).map_err(|e| MultibatError::write_file(path, e))?;
    }
    Ok(())
}

fn write_archive<W: Write>(
    writer: W,
    archive_path: &Path,
    files: &[PathBuf],
    layout: &PackageLayout,
) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for path in files {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        tar.append_path_with_name(path, layout.entry_name(&name))
            .map_err(|e| MultibatError::write_file(archive_path, e))?;
    }

    tar.into_inner()
        .and_then(|enc| enc.finish())
        .map_err(|e| MultibatError::write_file(archive_path, e))?;
    Ok(())
}
