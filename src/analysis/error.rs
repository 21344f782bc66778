//! Error type for a single-file analysis run.

use thiserror::Error;

/// Errors that abort an analysis run.
///
/// Any of these means the run produced no symbol data at all; there is
/// no partial result.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("failed to read file: {0}")]
    Read(#[from] std::io::Error),
    #[error("failed to load Go grammar: {0}")]
    Language(#[from] tree_sitter::LanguageError),
    #[error("failed to parse file: {path}: parser produced no tree")]
    NoTree { path: String },
    #[error("failed to parse file: {path}:{line}:{column}: {message}")]
    Syntax {
        path: String,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("failed to parse file: {path}: expected 'package' clause")]
    MissingPackage { path: String },
}

impl AnalyzeError {
    /// Whether the error came from the parse boundary (as opposed to I/O).
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            AnalyzeError::NoTree { .. }
                | AnalyzeError::Syntax { .. }
                | AnalyzeError::MissingPackage { .. }
        )
    }
}
