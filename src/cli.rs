//! Command-line interface for goanalyze.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::analysis::{self, FailedAnalysis, ProjectAnalyzer};
use crate::config::Config;
use crate::report;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Message emitted when `file` is run without a path.
pub const NO_PATH_MESSAGE: &str = "No file path provided";

/// Structural analysis of Go source files.
///
/// Extracts structs, interfaces, functions, methods and imports from Go
/// source and reports them as JSON, together with documentation coverage.
#[derive(Parser)]
#[command(name = "goanalyze")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a single Go file and print the result as JSON
    #[command(visible_alias = "analyze")]
    File(FileArgs),
    /// Analyze every Go file under a directory
    Project(ProjectArgs),
}

/// Arguments for the file command.
#[derive(Parser)]
pub struct FileArgs {
    /// Go source file to analyze
    pub path: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pub pretty: bool,
}

/// Output format for project runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Pretty,
}

/// Arguments for the project command.
#[derive(Parser)]
pub struct ProjectArgs {
    /// Project root (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Path to config YAML file (default: auto-discover in the root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: OutputFormat,

    /// Also analyze _test.go files
    #[arg(long)]
    pub include_tests: bool,

    /// Analyze files one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

/// Run the file command.
///
/// Success prints the analysis and returns `EXIT_SUCCESS`. Any failure
/// prints a failure record and returns `EXIT_FAILED`.
pub fn run_file(args: &FileArgs) -> anyhow::Result<i32> {
    let path = match &args.path {
        Some(p) => p,
        None => {
            report::write_failure(&FailedAnalysis::without_path(NO_PATH_MESSAGE), args.pretty)?;
            return Ok(EXIT_FAILED);
        }
    };

    match analysis::analyze_file(path) {
        Ok(result) => {
            report::write_json(&result, args.pretty)?;
            Ok(EXIT_SUCCESS)
        }
        Err(e) => {
            let failure = FailedAnalysis::new(e.to_string(), path.to_string_lossy());
            report::write_failure(&failure, args.pretty)?;
            Ok(EXIT_FAILED)
        }
    }
}

/// Command-line flags override the config file. An unset flag leaves the
/// file's value alone.
fn apply_flags(args: &ProjectArgs, config: &mut Config) {
    if args.include_tests {
        config.include_test_files = true;
    }
    if args.sequential {
        config.parallel = false;
    }
}

/// Run the project command.
pub fn run_project(args: &ProjectArgs) -> anyhow::Result<i32> {
    let metadata = match std::fs::metadata(&args.path) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("Error: cannot access path {:?}: {}", args.path, e);
            return Ok(EXIT_ERROR);
        }
    };

    let config_root = if metadata.is_dir() {
        args.path.clone()
    } else {
        args.path
            .parent()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."))
    };

    let mut config = match Config::load(&config_root, args.config.as_deref()) {
        Ok((config, _)) => config,
        Err(e) => {
            eprintln!("Error: invalid config: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    apply_flags(args, &mut config);
    let pretty_json = config.pretty;

    let analyzer = ProjectAnalyzer::new(&args.path, config);
    let files = analyzer.collect_files()?;
    if files.is_empty() {
        eprintln!("Warning: no Go files found under {}", args.path.display());
    }
    let project = analyzer.analyze(&files);

    match args.format {
        OutputFormat::Json => report::write_json(&project, pretty_json)?,
        OutputFormat::Pretty => report::write_pretty(&args.path.to_string_lossy(), &project),
    }

    Ok(EXIT_SUCCESS)
}
