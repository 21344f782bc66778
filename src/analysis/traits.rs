//! Core traits for language analysis.

use std::fs;
use std::path::Path;

use super::{AnalyzeError, FileAnalysis};

/// Holds a parsed tree-sitter tree and associated metadata.
///
/// Owned by exactly one analysis run.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// The source bytes, kept for node text extraction.
    pub source: Vec<u8>,
    /// The path as given by the caller; echoed into the result.
    pub path: String,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }
}

/// Language-specific analyzer trait.
///
/// Every implementation produces the same `FileAnalysis` shape so results
/// from different languages can be consumed uniformly.
///
/// # Thread Safety
///
/// Note: tree_sitter::Parser is not Sync, so implementations should
/// create parsers per call.
pub trait LanguageAnalyzer: Send + Sync {
    /// Returns the language identifier (e.g., "go").
    fn language_id(&self) -> &'static str;

    /// Returns file extensions this analyzer handles (without dot).
    fn file_extensions(&self) -> &'static [&'static str];

    /// Parse a source file into a tree-sitter tree.
    ///
    /// Fails if the source is not syntactically valid; no partial tree is
    /// handed to extraction.
    fn parse(&self, path: &Path, source: &[u8]) -> Result<ParsedFile, AnalyzeError>;

    /// Extract all declared symbols from a parsed file.
    ///
    /// Cannot fail: unusual declarations are skipped, never reported.
    fn analyze_parsed(&self, parsed: &ParsedFile) -> FileAnalysis;

    /// Read, parse and analyze one file.
    fn analyze_file(&self, path: &Path) -> Result<FileAnalysis, AnalyzeError> {
        let source = fs::read(path)?;
        let parsed = self.parse(path, &source)?;
        Ok(self.analyze_parsed(&parsed))
    }

    /// Check if this analyzer handles the given file extension.
    fn handles_extension(&self, ext: &str) -> bool {
        self.file_extensions().contains(&ext)
    }
}
