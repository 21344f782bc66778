//! goanalyze - structural analysis of Go source files.
//!
//! Parses a Go file with tree-sitter and reports its structs (with fields
//! and bound methods), interfaces, top-level functions, imports and
//! documentation coverage as a JSON-serializable record.
//!
//! # Architecture
//!
//! - `analysis`: parsing boundary, declaration extractors, method binding,
//!   and the project-level driver
//! - `config`: YAML project configuration
//! - `report`: output formatting (JSON, pretty)
//! - `cli`: command-line front end

pub mod analysis;
pub mod cli;
pub mod config;
pub mod report;

pub use analysis::{
    analyze_file, analyze_source, AnalyzeError, FileAnalysis, GoAnalyzer, LanguageAnalyzer,
    ProjectAnalysis, ProjectAnalyzer,
};
pub use config::Config;
