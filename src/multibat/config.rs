//! # Configuration
//!
//! Every job field can come from the command line or from a JSON config file.
//! Sources are resolved in priority order:
//!
//! 1. **Command-line flags** ([`JobOverrides`]).
//! 2. **Explicit file**: `--config <FILE>` or `MULTIBAT_CONFIG`.
//! 3. **Project file**: `multibat.json` in the current directory.
//! 4. **Global file**: `config.json` in the OS config directory.
//! 5. **Compiled defaults**: default [`PackageLayout`] and the built-in template.
//!
//! Only the first file found among 2–4 is read; files are not merged with one
//! another.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `project` | — | Project name (`proj` placeholder) |
//! | `input` | — | Scene file (`infile` placeholder) |
//! | `output_dir` | — | Render output directory (`out` placeholder) |
//! | `first` / `last` / `step` | — | Frame range and chunk size |
//! | `template_path` | built-in | Custom script template |
//! | `legacy_bounds` | `false` | Reproduce the historical chunk boundaries |
//! | `vars` | `{}` | Extra template variables |
//! | `layout` | see [`PackageLayout`] | File, archive and temp-dir names |

use crate::error::{MultibatError, Result};
use crate::model::{ChunkPolicy, RenderJob};
use crate::packager::PackageLayout;
use crate::template::TemplateSet;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

pub const CONFIG_FILENAME: &str = "config.json";
pub const PROJECT_CONFIG_FILENAME: &str = "multibat.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct MultibatConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template_path: Option<PathBuf>,

    pub legacy_bounds: bool,

    pub vars: BTreeMap<String, String>,

    pub layout: PackageLayout,
}

/// Values given on the command line. `None` falls through to the config file.
#[derive(Debug, Clone, Default)]
pub struct JobOverrides {
    pub project: Option<String>,
    pub input: Option<String>,
    pub output_dir: Option<String>,
    pub first: Option<i64>,
    pub last: Option<i64>,
    pub step: Option<i64>,
    pub template_path: Option<PathBuf>,
    pub legacy_bounds: bool,
}

/// Directory holding the global `config.json`, if the platform has one.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "multibat", "multibat").map(|dirs| dirs.config_dir().to_path_buf())
}

impl MultibatConfig {
    /// Reads a config file that must exist.
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|source| MultibatError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `config.json` from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&config_path)
    }

    /// Finds the highest-priority config file and loads it. Returns the path
    /// that was read, if any.
    pub fn discover(
        explicit: Option<&Path>,
        cwd: &Path,
        global_dir: Option<&Path>,
    ) -> Result<(Self, Option<PathBuf>)> {
        if let Some(path) = explicit {
            return Ok((Self::load_file(path)?, Some(path.to_path_buf())));
        }

        let project_path = cwd.join(PROJECT_CONFIG_FILENAME);
        if project_path.exists() {
            return Ok((Self::load_file(&project_path)?, Some(project_path)));
        }

        if let Some(dir) = global_dir {
            let global_path = dir.join(CONFIG_FILENAME);
            if global_path.exists() {
                return Ok((Self::load_file(&global_path)?, Some(global_path)));
            }
        }

        debug!("no config file found, using defaults");
        Ok((Self::default(), None))
    }

    /// Writes the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content =
            serde_json::to_string_pretty(self).map_err(|source| MultibatError::Config {
                path: path.to_path_buf(),
                source,
            })?;
        fs::write(path, content).map_err(|e| MultibatError::write_file(path, e))?;
        Ok(())
    }

    /// Applies command-line values on top of the file values.
    pub fn merged(mut self, overrides: JobOverrides) -> Self {
        self.project = overrides.project.or(self.project);
        self.input = overrides.input.or(self.input);
        self.output_dir = overrides.output_dir.or(self.output_dir);
        self.first = overrides.first.or(self.first);
        self.last = overrides.last.or(self.last);
        self.step = overrides.step.or(self.step);
        self.template_path = overrides.template_path.or(self.template_path);
        self.legacy_bounds |= overrides.legacy_bounds;
        self
    }

    /// Builds the validated job, naming the flag for any missing field.
    pub fn render_job(&self) -> Result<RenderJob> {
        RenderJob::new(
            required(&self.project, "--project")?.clone(),
            required(&self.input, "--input")?.clone(),
            required(&self.output_dir, "--output-dir")?.clone(),
            *required(&self.first, "--first")?,
            *required(&self.last, "--last")?,
            *required(&self.step, "--step")?,
        )
    }

    pub fn chunk_policy(&self) -> ChunkPolicy {
        if self.legacy_bounds {
            ChunkPolicy::Legacy
        } else {
            ChunkPolicy::Complete
        }
    }

    /// The configured template, or the built-in one, with `vars` attached.
    pub fn template_set(&self) -> Result<TemplateSet> {
        let templates = match &self.template_path {
            Some(path) => TemplateSet::from_file(path)?,
            None => TemplateSet::builtin()?,
        };
        Ok(templates.with_vars(self.vars.clone()))
    }
}

fn required<'a, T>(value: &'a Option<T>, flag: &str) -> Result<&'a T> {
    value
        .as_ref()
        .ok_or_else(|| MultibatError::MissingArgument(flag.to_string()))
}
