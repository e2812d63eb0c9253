use colored::Colorize;
use multibat::api::{CmdMessage, MessageLevel};
use multibat::error::Result;
use multibat::model::Chunk;
use std::path::PathBuf;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn render_chunk_table(chunks: &[Chunk]) -> String {
    let mut output = format!(
        "{:>5}  {:>10}  {:>10}  {:>7}\n",
        "#", "start", "end", "frames"
    );
    for chunk in chunks {
        output.push_str(&format!(
            "{:>5}  {:>10}  {:>10}  {:>7}\n",
            chunk.index,
            chunk.start,
            chunk.end,
            chunk.frame_count()
        ));
    }
    output
}

pub(super) fn render_chunk_json(chunks: &[Chunk]) -> Result<String> {
    Ok(serde_json::to_string_pretty(chunks)?)
}

pub(super) fn print_paths(paths: &[PathBuf]) {
    for path in paths {
        println!("{}", path.display());
    }
}
