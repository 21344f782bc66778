//! AST-backed Go source analysis.
//!
//! One run takes one Go source file and produces a [`FileAnalysis`]:
//! structs with fields and bound methods, interfaces, top-level functions,
//! imports, and documentation coverage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Source File │────▶│ GoAnalyzer   │────▶│ FileAnalysis │
//! └─────────────┘     │ parse + walk │     │ (JSON-ready) │
//!                     └──────────────┘     └──────────────┘
//!                                                 │
//!                                                 ▼
//!                     ┌──────────────┐     ┌──────────────┐
//!                     │ Project      │◀────│ per-file     │
//!                     │ Analysis     │     │ results      │
//!                     └──────────────┘     └──────────────┘
//! ```
//!
//! Runs share nothing: every call builds its own parser and walk state, so
//! files can be analyzed concurrently.

mod docs;
mod error;
mod languages;
mod project;
mod schema;
mod traits;
mod types;

pub use docs::{comment_text, leading_doc, DocTally};
pub use error::AnalyzeError;
pub use languages::{get_analyzer, go_analyzer, registered_extensions, GoAnalyzer};
pub use project::{AnalysisSummary, ProjectAnalysis, ProjectAnalyzer};
pub use schema::{
    DocumentationInfo, FailedAnalysis, FileAnalysis, FunctionInfo, ImportInfo, InterfaceInfo,
    Location, MethodInfo, ParameterInfo, PropertyInfo, StructInfo,
};
pub use traits::{LanguageAnalyzer, ParsedFile};
pub use types::{render, render_opt, TypeExpr};

use std::path::Path;

/// Analyze one Go file from disk.
pub fn analyze_file<P: AsRef<Path>>(path: P) -> Result<FileAnalysis, AnalyzeError> {
    go_analyzer().analyze_file(path.as_ref())
}

/// Analyze Go source already in memory; `path` is echoed into the result.
pub fn analyze_source<P: AsRef<Path>>(
    path: P,
    source: &[u8],
) -> Result<FileAnalysis, AnalyzeError> {
    let analyzer = go_analyzer();
    let parsed = analyzer.parse(path.as_ref(), source)?;
    Ok(analyzer.analyze_parsed(&parsed))
}
