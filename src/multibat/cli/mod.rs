//! # CLI Behavior
//!
//! This is **one possible UI client** for multibat, not the application
//! itself. It is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## Naked Execution (`multibat`)
//!
//! Running `multibat` without a subcommand is `multibat preview`: every
//! rendered script printed as one stream, nothing written to disk.
//!
//! ## Where Job Values Come From
//!
//! Flags win over the config file; see [`multibat::config`] for the lookup
//! order. A field missing from both fails with the flag that would supply it.
//!
//! ## Output Streams
//!
//! Scripts, chunk tables, and written paths go to stdout. Logs go to stderr.
//! `multibat archive` prints only the archive path (plus a status line), so
//! it can be captured by a calling script.
//!
//! ## Module Structure
//!
//! - `commands`: Dispatch and per-command handlers
//! - `render`: Output formatting
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
