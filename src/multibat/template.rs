//! # Template Renderer
//!
//! Fills one script template per [`Chunk`]. Templates are minijinja sources
//! using `{{ name }}` placeholders; the engine is configured so that:
//!
//! - an unknown placeholder is an error, never an empty string;
//! - values go in verbatim (no HTML escaping, backslashes untouched);
//! - the template's leading and trailing newlines survive rendering.
//!
//! | Placeholder | Value |
//! |-------------|-------|
//! | `start` | first frame of the chunk |
//! | `end` | last frame of the chunk |
//! | `lognum` | zero-based chunk index |
//! | `proj` | project name |
//! | `infile` | scene file handed to the renderer |
//! | `out` | directory the renderer writes frames to |
//! | `current_time` | render time, read from the [`Clock`] once per document |
//!
//! Extra string variables can be attached with [`TemplateSet::with_vars`].

use crate::clock::Clock;
use crate::error::Result;
use crate::model::{Chunk, RenderJob};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

const TEMPLATE_NAME: &str = "script.bat";

/// Placeholder names filled from the job and chunk. Extra variables may not
/// reuse them.
pub const RESERVED_PLACEHOLDERS: [&str; 7] = [
    "start",
    "end",
    "lognum",
    "proj",
    "infile",
    "out",
    "current_time",
];

/// Maya/Arnold render command, one invocation per chunk.
pub const DEFAULT_TEMPLATE: &str = r#"
REM Generated by multibat at {{ current_time }}
"C:\Program Files\Autodesk\Maya2013\bin\Render.exe" -r arnold -rl shadow1 -s {{ start }} -e {{ end }} -ai:lfn C:\Users\jonathan\Desktop\renderlog_{{ proj }}_{{ lognum }}.log -rd {{ out }} {{ infile }}

pause
"#;

/// Text every document rendered from [`DEFAULT_TEMPLATE`] starts with.
pub const DEFAULT_MARKER: &str = "\nREM Generated by ";

#[derive(Serialize)]
struct Placeholders<'a> {
    start: i64,
    end: i64,
    lognum: usize,
    proj: &'a str,
    infile: &'a str,
    out: &'a str,
    current_time: String,
    #[serde(flatten)]
    extra: &'a BTreeMap<String, String>,
}

/// The text of one generated script, together with the chunk it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub chunk: Chunk,
    pub text: String,
}

impl RenderedDocument {
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl AsRef<str> for RenderedDocument {
    fn as_ref(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for RenderedDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A compiled script template plus any extra variables.
pub struct TemplateSet {
    env: Environment<'static>,
    vars: BTreeMap<String, String>,
}

impl TemplateSet {
    /// Compiles `source`. Syntax errors surface here rather than at render
    /// time.
    pub fn new(source: impl Into<String>) -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template_owned(TEMPLATE_NAME, source.into())?;

        Ok(Self {
            env,
            vars: BTreeMap::new(),
        })
    }

    pub fn builtin() -> Result<Self> {
        Self::new(DEFAULT_TEMPLATE)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)?;
        debug!(path = %path.display(), "loaded script template");
        Self::new(source)
    }

    /// Attaches extra variables. Names that collide with a built-in
    /// placeholder are dropped.
    pub fn with_vars(mut self, vars: BTreeMap<String, String>) -> Self {
        self.vars = vars
            .into_iter()
            .filter(|(name, _)| {
                let reserved = RESERVED_PLACEHOLDERS.contains(&name.as_str());
                if reserved {
                    warn!(name = %name, "ignoring template variable that shadows a placeholder");
                }
                !reserved
            })
            .collect();
        self
    }

    pub fn vars(&self) -> &BTreeMap<String, String> {
        &self.vars
    }

    /// Renders the script for one chunk, reading the clock once.
    pub fn render<C: Clock + ?Sized>(
        &self,
        job: &RenderJob,
        chunk: &Chunk,
        clock: &C,
    ) -> Result<RenderedDocument> {
        let placeholders = Placeholders {
            start: chunk.start,
            end: chunk.end,
            lognum: chunk.index,
            proj: job.project(),
            infile: job.input_file(),
            out: job.output_directory(),
            current_time: clock.timestamp(),
            extra: &self.vars,
        };

        let text = self
            .env
            .get_template(TEMPLATE_NAME)?
            .render(&placeholders)?;
        debug!(index = chunk.index, start = chunk.start, end = chunk.end, "rendered script");

        Ok(RenderedDocument {
            chunk: *chunk,
            text,
        })
    }
}

/// Renders every chunk in order.
pub fn render_documents<C: Clock + ?Sized>(
    templates: &TemplateSet,
    job: &RenderJob,
    chunks: &[Chunk],
    clock: &C,
) -> Result<Vec<RenderedDocument>> {
    chunks
        .iter()
        .map(|chunk| templates.render(job, chunk, clock))
        .collect()
}

/// Joins documents in chunk order with no separator.
pub fn render_text(documents: &[RenderedDocument]) -> String {
    documents.iter().map(RenderedDocument::as_str).collect()
}

/// Splits concatenated output back into documents. Each document starts at an
/// occurrence of `marker`; text ahead of the first marker becomes a document
/// of its own.
pub fn split_documents(text: &str, marker: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    if marker.is_empty() {
        return vec![text.to_string()];
    }

    let mut starts: Vec<usize> = text.match_indices(marker).map(|(i, _)| i).collect();
    if starts.first() != Some(&0) {
        starts.insert(0, 0);
    }

    starts
        .iter()
        .enumerate()
        .map(|(n, &start)| {
            let end = starts.get(n + 1).copied().unwrap_or(text.len());
            text[start..end].to_string()
        })
        .collect()
}
