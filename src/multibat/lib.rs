//! # Multibat Architecture
//!
//! Multibat turns one render job (a scene, an output directory and a frame
//! range) into a batch of Windows command scripts, one per chunk of frames,
//! and can bundle them into a single archive.
//!
//! It is a library that happens to have a CLI client. Everything below the
//! CLI takes plain Rust values and returns plain Rust types.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses flags, resolves config files, installs logging    │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade holding clock, template and layout           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - chunks, preview, files, archive, init                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (chunker.rs, template.rs, packager.rs)                │
//! │  - Range chunking, script rendering, file/archive output    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr, never calls
//! `std::process::exit`, and only touches the filesystem inside the
//! temporary directory a batch is packaged into. Diagnostics go through
//! `tracing`; installing a subscriber is the binary's job.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: One module per user-facing operation
//! - [`chunker`]: Frame-range chunking
//! - [`template`]: Script templates and rendering
//! - [`packager`]: Writing scripts and archives
//! - [`model`]: `RenderJob`, `Chunk`, `ChunkPolicy`
//! - [`clock`]: Time source for `current_time`
//! - [`config`]: Config files and flag merging
//! - [`error`]: Error types

pub mod api;
pub mod chunker;
pub mod clock;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod packager;
pub mod template;
