//! Documentation comments and coverage accounting.
//!
//! A declaration's doc is the block of comments sitting directly above it,
//! normalized the way Go tooling prints comment text: markers stripped,
//! tool directives dropped, blank lines trimmed and collapsed.

use lazy_static::lazy_static;
use regex::Regex;
use tree_sitter::Node;

use super::DocumentationInfo;

lazy_static! {
    /// `//go:generate`, `//nolint:errcheck` and friends.
    static ref DIRECTIVE_PATTERN: Regex = Regex::new(r"^[a-z0-9]+:[a-z0-9]").unwrap();
}

/// Directive prefixes recognized without a colon.
const DIRECTIVE_PREFIXES: &[&str] = &["line ", "extern ", "export "];

/// Extract the doc comment directly above `node`, if any.
///
/// Returns `None` when there is no adjacent comment block or when the
/// block normalizes to empty text.
pub fn leading_doc(node: Node, source: &[u8]) -> Option<String> {
    let mut comments = Vec::new();
    let mut next_row = node.start_position().row;
    let mut prev = prev_significant_sibling(node);

    while let Some(candidate) = prev {
        if candidate.kind() != "comment" || candidate.end_position().row + 1 != next_row {
            break;
        }
        // A comment trailing code on its own line belongs to that code.
        if let Some(before) = prev_significant_sibling(candidate) {
            if before.kind() != "comment"
                && before.end_position().row == candidate.start_position().row
            {
                break;
            }
        }
        comments.push(candidate);
        next_row = candidate.start_position().row;
        prev = prev_significant_sibling(candidate);
    }

    if comments.is_empty() {
        return None;
    }
    comments.reverse();

    let raw: Vec<&str> = comments
        .iter()
        .map(|c| c.utf8_text(source).unwrap_or(""))
        .collect();
    let text = comment_text(&raw);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Previous sibling, skipping statement terminators (`\n`, `;`).
fn prev_significant_sibling(node: Node) -> Option<Node> {
    let mut prev = node.prev_sibling();
    while let Some(p) = prev {
        if p.is_named() || !matches!(p.kind().trim(), "" | ";") {
            return Some(p);
        }
        prev = p.prev_sibling();
    }
    None
}

/// Convert raw comment tokens into doc text.
pub fn comment_text(comments: &[&str]) -> String {
    let mut lines: Vec<String> = Vec::new();

    for raw in comments {
        if let Some(body) = raw.strip_prefix("//") {
            if let Some(rest) = body.strip_prefix(' ') {
                lines.push(rest.to_string());
            } else if is_directive(body) {
                continue;
            } else {
                lines.push(body.to_string());
            }
        } else if let Some(body) = raw.strip_prefix("/*") {
            let body = body.strip_suffix("*/").unwrap_or(body);
            lines.extend(body.split('\n').map(str::to_string));
        }
    }

    let mut out: Vec<&str> = Vec::new();
    let mut pending_blank = false;
    for line in &lines {
        let line = line.trim_end();
        if line.is_empty() {
            pending_blank = !out.is_empty();
            continue;
        }
        if pending_blank {
            out.push("");
            pending_blank = false;
        }
        out.push(line);
    }

    out.join("\n")
}

fn is_directive(body: &str) -> bool {
    DIRECTIVE_PREFIXES.iter().any(|p| body.starts_with(p)) || DIRECTIVE_PATTERN.is_match(body)
}

/// Running count of declared vs documented symbols for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DocTally {
    pub documented: usize,
    pub total: usize,
}

impl DocTally {
    /// Count one declaration.
    pub fn record(&mut self, doc: &Option<String>) {
        self.total += 1;
        if doc.is_some() {
            self.documented += 1;
        }
    }

    /// Documented percentage, 0 when nothing was declared.
    pub fn coverage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.documented as f64 / self.total as f64 * 100.0
        }
    }

    pub fn into_info(self) -> DocumentationInfo {
        DocumentationInfo {
            has_documentation: self.documented > 0,
            documented_symbols: self.documented,
            total_symbols: self.total,
            coverage: self.coverage(),
        }
    }
}
