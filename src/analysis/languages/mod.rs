//! Language-specific analyzer implementations.

mod go;

pub use go::GoAnalyzer;

use super::LanguageAnalyzer;
use once_cell::sync::OnceCell;

/// Static storage for Go analyzer.
static GO_ANALYZER: OnceCell<GoAnalyzer> = OnceCell::new();

/// The shared Go analyzer, created on first use.
pub fn go_analyzer() -> &'static GoAnalyzer {
    GO_ANALYZER.get_or_init(GoAnalyzer::new)
}

/// Get an analyzer for the given file extension (without dot).
///
/// Returns None if no analyzer handles the extension.
pub fn get_analyzer(ext: &str) -> Option<&'static dyn LanguageAnalyzer> {
    match ext {
        "go" => Some(go_analyzer() as &'static dyn LanguageAnalyzer),
        _ => None,
    }
}

/// Get all registered file extensions.
pub fn registered_extensions() -> Vec<String> {
    vec!["go".to_string()]
}
