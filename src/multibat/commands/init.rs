use crate::commands::{CmdMessage, CmdResult};
use crate::config::MultibatConfig;
use crate::error::Result;
use std::path::Path;

/// A starter config with example job values and the default layout.
pub fn sample_config() -> MultibatConfig {
    MultibatConfig {
        project: Some("paper_dancer".to_string()),
        input: Some(r"\\server\jobs\paper_dancer\scenes\shot_010.ma".to_string()),
        output_dir: Some(r"\\server\jobs\paper_dancer\images".to_string()),
        first: Some(101),
        last: Some(110),
        step: Some(2),
        ..MultibatConfig::default()
    }
}

/// Writes [`sample_config`] to `path`. An existing file is only replaced
/// with `force`.
pub fn run(path: &Path, force: bool) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    if path.exists() && !force {
        result.add_message(CmdMessage::warning(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
        return Ok(result);
    }

    sample_config().save(path)?;
    result.add_message(CmdMessage::success(format!("Wrote {}", path.display())));
    result.add_message(CmdMessage::info(
        "Edit the job fields, then run `multibat archive`.",
    ));
    Ok(result.with_paths(vec![path.to_path_buf()]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use std::fs;

    #[test]
    fn test_writes_loadable_sample() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multibat.json");

        let res = run(&path, false).unwrap();
        assert_eq!(res.paths, vec![path.clone()]);

        let loaded = MultibatConfig::load_file(&path).unwrap();
        assert_eq!(loaded, sample_config());
        assert!(loaded.render_job().is_ok());
    }

    #[test]
    fn test_keeps_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("multibat.json");
        fs::write(&path, "{}").unwrap();

        let res = run(&path, false).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Warning);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");

        run(&path, true).unwrap();
        assert_ne!(fs::read_to_string(&path).unwrap(), "{}");
    }
}
