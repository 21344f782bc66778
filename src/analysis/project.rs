//! Project-level driver: find Go files under a root and analyze each one.
//!
//! Every file is an independent run. Nothing is resolved across files; the
//! summary only adds up per-file counts.

use std::fs;
use std::path::{Path, PathBuf};

use globset::GlobSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::analysis::{go_analyzer, AnalyzeError, FailedAnalysis, FileAnalysis, LanguageAnalyzer};
use crate::config::Config;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["vendor", "testdata", "node_modules"];

/// Totals across all analyzed files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_files: usize,
    pub total_classes: usize,
    pub total_interfaces: usize,
    pub total_functions: usize,
    pub total_enums: usize,
    pub total_type_aliases: usize,
    /// Documented percentage over all symbols of all files.
    pub overall_doc_coverage: f64,
}

impl AnalysisSummary {
    pub fn from_files(files: &[FileAnalysis]) -> Self {
        let mut summary = AnalysisSummary {
            total_files: files.len(),
            ..Default::default()
        };
        let mut documented = 0usize;
        let mut total = 0usize;

        for file in files {
            summary.total_classes += file.classes.len();
            summary.total_interfaces += file.interfaces.len();
            summary.total_functions += file.functions.len();
            summary.total_enums += file.enums.len();
            summary.total_type_aliases += file.type_aliases.len();
            documented += file.documentation.documented_symbols;
            total += file.documentation.total_symbols;
        }

        if total > 0 {
            summary.overall_doc_coverage = documented as f64 / total as f64 * 100.0;
        }
        summary
    }
}

/// Result of analyzing a whole project.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectAnalysis {
    pub language: String,
    pub files: Vec<FileAnalysis>,
    pub summary: AnalysisSummary,
}

/// Analyzes every Go file under a root directory.
pub struct ProjectAnalyzer {
    root: PathBuf,
    config: Config,
    excluded: GlobSet,
}

impl ProjectAnalyzer {
    pub fn new<P: AsRef<Path>>(root: P, config: Config) -> Self {
        let excluded = config.exclusion_matcher();
        Self {
            root: root.as_ref().to_path_buf(),
            config,
            excluded,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Collect the Go files to analyze, sorted.
    pub fn collect_files(&self) -> anyhow::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.root)
            .follow_links(true)
            .into_iter()
            .filter_entry(|e| {
                // Never filter the root itself, even if it is hidden
                if e.depth() == 0 || !e.file_type().is_dir() {
                    return true;
                }
                let name = e.file_name().to_string_lossy();
                !(name.starts_with('.') || SKIPPED_DIRS.contains(&name.as_ref()))
            })
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
            if !go_analyzer().handles_extension(ext) {
                continue;
            }

            let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
            if !self.config.include_test_files && name.ends_with("_test.go") {
                continue;
            }

            if self.excluded.is_match(self.relative(path)) {
                tracing::debug!(path = %path.display(), "excluded by config");
                continue;
            }

            files.push(path.to_path_buf());
        }

        files.sort();
        Ok(files)
    }

    /// Analyze the given files.
    ///
    /// Files that fail to read or parse are reported on stderr and left out
    /// of the result.
    pub fn analyze(&self, files: &[PathBuf]) -> ProjectAnalysis {
        let (analyzed, failed) = self.analyze_files(files);
        for failure in &failed {
            eprintln!("Warning: Failed to analyze file: {}", failure.error);
        }

        ProjectAnalysis {
            language: go_analyzer().language_id().to_string(),
            summary: AnalysisSummary::from_files(&analyzed),
            files: analyzed,
        }
    }

    /// Collect and analyze in one step.
    pub fn run(&self) -> anyhow::Result<ProjectAnalysis> {
        let files = self.collect_files()?;
        Ok(self.analyze(&files))
    }

    /// Analyze each file in isolation, splitting successes from failures.
    ///
    /// Both lists are sorted by path.
    pub fn analyze_files(&self, files: &[PathBuf]) -> (Vec<FileAnalysis>, Vec<FailedAnalysis>) {
        let results: Vec<Result<FileAnalysis, FailedAnalysis>> = if self.config.parallel {
            files.par_iter().map(|p| self.analyze_one(p)).collect()
        } else {
            files.iter().map(|p| self.analyze_one(p)).collect()
        };

        let mut analyzed = Vec::new();
        let mut failed = Vec::new();
        for result in results {
            match result {
                Ok(analysis) => analyzed.push(analysis),
                Err(failure) => failed.push(failure),
            }
        }

        analyzed.sort_by(|a, b| a.path.cmp(&b.path));
        failed.sort_by(|a, b| a.path.cmp(&b.path));
        (analyzed, failed)
    }

    /// One run. The reported path is relative to the project root.
    fn analyze_one(&self, path: &Path) -> Result<FileAnalysis, FailedAnalysis> {
        let rel = self.relative(path);
        let analyzer = go_analyzer();

        let source = fs::read(path)
            .map_err(|e| FailedAnalysis::new(AnalyzeError::from(e).to_string(), rel.to_string_lossy()))?;
        let parsed = analyzer.parse(rel, &source).map_err(|e| {
            tracing::debug!(path = %rel.display(), error = %e, "skipping file");
            FailedAnalysis::new(e.to_string(), rel.to_string_lossy())
        })?;

        Ok(analyzer.analyze_parsed(&parsed))
    }

    /// Path relative to the root; a root that is itself a file maps to its name.
    fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        match path.strip_prefix(&self.root) {
            Ok(rel) if !rel.as_os_str().is_empty() => rel,
            _ => path.file_name().map(Path::new).unwrap_or(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &Path, rel: &str, content: &str) {
        let path = dir.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn sample_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        write(
            temp.path(),
            "main.go",
            "package main\n\n// main starts the app.\nfunc main() {}\n",
        );
        write(
            temp.path(),
            "store/store.go",
            "package store\n\ntype Store interface {\n    Get(id int) error\n}\n\ntype Mem struct{}\n\nfunc (m *Mem) Get(id int) error { return nil }\n",
        );
        write(temp.path(), "store/store_test.go", "package store\n\nfunc TestGet() {}\n");
        write(temp.path(), "vendor/dep/dep.go", "package dep\n");
        write(temp.path(), "testdata/fixture.go", "package fixture\n");
        write(temp.path(), ".git/hooks.go", "package hooks\n");
        write(temp.path(), "gen/models.go", "package gen\n");
        write(temp.path(), "README.md", "# readme\n");
        temp
    }

    fn relative_names(analyzer: &ProjectAnalyzer, files: &[PathBuf]) -> Vec<String> {
        files
            .iter()
            .map(|f| analyzer.relative(f).to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_collect_files_skips_ignored_locations() {
        let temp = sample_project();
        let analyzer = ProjectAnalyzer::new(temp.path(), Config::default());
        let files = analyzer.collect_files().unwrap();

        assert_eq!(
            relative_names(&analyzer, &files),
            vec!["gen/models.go", "main.go", "store/store.go"]
        );
    }

    #[test]
    fn test_collect_files_honours_config() {
        let temp = sample_project();
        let config = Config {
            include_test_files: true,
            excluded_paths: vec!["gen/**".to_string()],
            ..Config::default()
        };
        let analyzer = ProjectAnalyzer::new(temp.path(), config);
        let files = analyzer.collect_files().unwrap();

        assert_eq!(
            relative_names(&analyzer, &files),
            vec!["main.go", "store/store.go", "store/store_test.go"]
        );
    }

    #[test]
    fn test_analyze_builds_summary() {
        let temp = sample_project();
        let analyzer = ProjectAnalyzer::new(temp.path(), Config::default());
        let project = analyzer.run().unwrap();

        assert_eq!(project.language, "go");
        assert_eq!(project.files.len(), 3);
        assert_eq!(project.files[1].path, "main.go");

        let summary = &project.summary;
        assert_eq!(summary.total_files, 3);
        assert_eq!(summary.total_classes, 1);
        assert_eq!(summary.total_interfaces, 1);
        assert_eq!(summary.total_functions, 1);
        assert_eq!(summary.total_enums, 0);
        assert_eq!(summary.total_type_aliases, 0);
        // main (doc) + Store, Get signature, Mem, Mem.Get (no doc)
        assert_eq!(summary.overall_doc_coverage, 20.0);
    }

    #[test]
    fn test_failed_files_are_omitted() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "good.go", "package good\n\nfunc Ok() {}\n");
        write(temp.path(), "bad.go", "package bad\n\nfunc broken( {\n");

        let config = Config {
            parallel: false,
            ..Config::default()
        };
        let analyzer = ProjectAnalyzer::new(temp.path(), config);
        let files = analyzer.collect_files().unwrap();
        let (analyzed, failed) = analyzer.analyze_files(&files);

        assert_eq!(analyzed.len(), 1);
        assert_eq!(analyzed[0].path, "good.go");
        assert_eq!(failed.len(), 1);
        assert_eq!(failed[0].path.as_deref(), Some("bad.go"));
        assert!(failed[0].error.starts_with("failed to parse file: bad.go:"));
    }

    #[test]
    fn test_parallel_and_sequential_agree() {
        let temp = sample_project();
        let parallel = ProjectAnalyzer::new(temp.path(), Config::default()).run().unwrap();
        let sequential = ProjectAnalyzer::new(
            temp.path(),
            Config {
                parallel: false,
                ..Config::default()
            },
        )
        .run()
        .unwrap();

        assert_eq!(parallel.files, sequential.files);
        assert_eq!(parallel.summary, sequential.summary);
    }

    #[test]
    fn test_empty_summary() {
        let summary = AnalysisSummary::from_files(&[]);
        assert_eq!(summary.total_files, 0);
        assert_eq!(summary.overall_doc_coverage, 0.0);
    }
}
