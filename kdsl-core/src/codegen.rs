//! Language-agnostic code generation traits.

use std::path::{Path, PathBuf};

use eyre::Result;

/// Trait for language-specific code generators.
///
/// Implement this trait to render the DSL model into another target language.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "kotlin")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "kt")
    fn file_extension(&self) -> &'static str;

    /// Preview generated files without writing to disk
    fn preview(&self) -> Vec<PreviewFile>;

    /// Clear the output directory and generate all files into it
    fn generate(&self, output_dir: &Path) -> Result<GenerateResult>;
}

/// Result of code generation
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Files written, in write order
    pub files: Vec<PathBuf>,
    /// Total bytes written
    pub bytes: usize,
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    /// Relative path from output directory
    pub path: String,
    /// File content
    pub content: String,
}
