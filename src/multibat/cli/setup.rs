use clap::{Args, Parser, Subcommand, ValueEnum};
use multibat::config::JobOverrides;
use std::path::PathBuf;

/// Returns the version string, including the git hash for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{}", VERSION, GIT_HASH)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "multibat", bin_name = "multibat", version = get_version())]
#[command(
    about = "Generate a batch of chunked render scripts from a single template",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub job: JobArgs,

    /// Config file (default: ./multibat.json, then the global config)
    #[arg(
        short,
        long,
        global = true,
        env = "MULTIBAT_CONFIG",
        help_heading = "Options"
    )]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

/// Job fields. Anything left out is taken from the config file.
#[derive(Args, Debug, Default)]
pub struct JobArgs {
    /// Project name, used in log file names
    #[arg(short, long, global = true, help_heading = "Job")]
    pub project: Option<String>,

    /// Scene file handed to the renderer
    #[arg(short, long, global = true, help_heading = "Job")]
    pub input: Option<String>,

    /// Directory the renderer writes frames to
    #[arg(short, long, global = true, help_heading = "Job")]
    pub output_dir: Option<String>,

    /// First frame
    #[arg(
        short,
        long,
        global = true,
        allow_negative_numbers = true,
        help_heading = "Job"
    )]
    pub first: Option<i64>,

    /// Last frame (inclusive)
    #[arg(
        short,
        long,
        global = true,
        allow_negative_numbers = true,
        help_heading = "Job"
    )]
    pub last: Option<i64>,

    /// Frames per script
    #[arg(
        short,
        long,
        global = true,
        allow_negative_numbers = true,
        help_heading = "Job"
    )]
    pub step: Option<i64>,

    /// Script template file (default: built-in Maya/Arnold command)
    #[arg(short, long, global = true, help_heading = "Job")]
    pub template: Option<PathBuf>,

    /// Reproduce the historical chunk boundaries, which skip short ranges
    #[arg(long, global = true, help_heading = "Job")]
    pub legacy_bounds: bool,
}

impl JobArgs {
    pub fn overrides(&self) -> JobOverrides {
        JobOverrides {
            project: self.project.clone(),
            input: self.input.clone(),
            output_dir: self.output_dir.clone(),
            first: self.first,
            last: self.last,
            step: self.step,
            template_path: self.template.clone(),
            legacy_bounds: self.legacy_bounds,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print every rendered script as one stream (default)
    #[command(alias = "text")]
    Preview,

    /// List the frame chunks
    Chunks {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Write the scripts into a fresh temporary directory
    Files,

    /// Write the scripts and bundle them into a .tar.gz archive
    Archive,

    /// Write a starter config file
    Init {
        /// Where to write it
        #[arg(default_value = "multibat.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_job_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "multibat", "archive", "-p", "paper_dancer", "-f", "101", "-l", "110", "-s", "2",
        ])
        .unwrap();
        assert!(matches!(cli.command, Some(Commands::Archive)));
        let overrides = cli.job.overrides();
        assert_eq!(overrides.project.as_deref(), Some("paper_dancer"));
        assert_eq!(
            (overrides.first, overrides.last, overrides.step),
            (Some(101), Some(110), Some(2))
        );
    }

    #[test]
    fn test_negative_frames() {
        let cli = Cli::try_parse_from(["multibat", "--first", "-10", "--last", "-1"]).unwrap();
        assert_eq!(cli.job.first, Some(-10));
        assert_eq!(cli.job.last, Some(-1));
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_chunks_format() {
        let cli = Cli::try_parse_from(["multibat", "chunks", "--format", "json"]).unwrap();
        match cli.command {
            Some(Commands::Chunks { format }) => assert_eq!(format, OutputFormat::Json),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_init_defaults() {
        let cli = Cli::try_parse_from(["multibat", "init"]).unwrap();
        match cli.command {
            Some(Commands::Init { path, force }) => {
                assert_eq!(path, PathBuf::from("multibat.json"));
                assert!(!force);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
