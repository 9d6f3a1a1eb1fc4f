//! File registration for declarative output.
//!
//! Renderers register one [`FileEntry`] per unit; the registry owns write
//! order, duplicate detection and the dry-run preview.
//!
//! # Example
//!
//! ```ignore
//! let mut registry = FileRegistry::new();
//! registry.register(FileEntry::marker("com/acme/dsl/AcmeDSL.kt", marker.render()))?;
//! registry.register(FileEntry::unit("com/acme/dsl/WidgetDSL.kt", widget.render()))?;
//! registry.write_all(&output_dir)?;
//! ```

use std::path::{Path, PathBuf};

use eyre::{Result, bail};
use indexmap::IndexMap;
use kdsl_core::{GeneratedFile, PreviewFile, write_file};

/// Category of generated file, determining write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FileCategory {
    /// The `@DslMarker` annotation.
    Marker,
    /// Collection builder units.
    Collection,
    /// Map builder units.
    Map,
    /// Type builder units.
    Type,
}

/// An entry in the file registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// `/`-separated path relative to the output root.
    pub path: String,
    pub content: String,
    pub category: FileCategory,
}

impl FileEntry {
    pub fn new(
        path: impl Into<String>,
        content: impl Into<String>,
        category: FileCategory,
    ) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            category,
        }
    }

    /// Create an entry from a [`GeneratedFile`] rooted at the output directory.
    pub fn from_generated<F: GeneratedFile>(file: &F, category: FileCategory) -> Self {
        let path = file
            .path(Path::new(""))
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Self::new(path, file.render(), category)
    }

    /// Get the full path for this entry.
    pub fn full_path(&self, base: &Path) -> PathBuf {
        self.path.split('/').fold(base.to_path_buf(), |path, segment| path.join(segment))
    }
}

/// Registry of every file of a run.
///
/// Entries keep their registration order within a category and are
/// written in category order: Marker -> Collection -> Map -> Type.
#[derive(Debug, Default)]
pub struct FileRegistry {
    entries: IndexMap<String, FileEntry>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file entry.
    ///
    /// # Errors
    ///
    /// Returns an error if another entry already claimed the same path.
    pub fn register(&mut self, entry: FileEntry) -> Result<()> {
        if let Some(existing) = self.entries.get(&entry.path) {
            bail!(
                "'{}' is generated twice ({:?} and {:?} unit)",
                entry.path,
                existing.category,
                entry.category
            );
        }
        self.entries.insert(entry.path.clone(), entry);
        Ok(())
    }

    /// Register multiple file entries, stopping at the first duplicate.
    pub fn register_all(&mut self, entries: impl IntoIterator<Item = FileEntry>) -> Result<()> {
        for entry in entries {
            self.register(entry)?;
        }
        Ok(())
    }

    /// Get all registered entries in write order.
    pub fn entries(&self) -> impl Iterator<Item = &FileEntry> {
        let mut sorted: Vec<_> = self.entries.values().collect();
        sorted.sort_by_key(|e| e.category);
        sorted.into_iter()
    }

    /// Get entries for a specific category.
    pub fn entries_by_category(&self, category: FileCategory) -> impl Iterator<Item = &FileEntry> {
        self.entries.values().filter(move |e| e.category == category)
    }

    pub fn get(&self, path: &str) -> Option<&FileEntry> {
        self.entries.get(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Preview all files in write order without touching disk.
    pub fn preview(&self) -> Vec<PreviewFile> {
        self.entries()
            .map(|e| PreviewFile {
                path: e.path.clone(),
                content: e.content.clone(),
            })
            .collect()
    }

    /// Write all files below `base`, creating parent directories as needed.
    pub fn write_all(&self, base: &Path) -> Result<WriteStats> {
        let mut stats = WriteStats::default();
        for entry in self.entries() {
            let path = entry.full_path(base);
            write_file(&path, &entry.content)?;
            stats.bytes += entry.content.len();
            stats.written_paths.push(path);
        }
        Ok(stats)
    }
}

/// Statistics from writing a registry.
#[derive(Debug, Default)]
pub struct WriteStats {
    /// Paths written, in write order.
    pub written_paths: Vec<PathBuf>,
    /// Total bytes written.
    pub bytes: usize,
}

impl WriteStats {
    pub fn written(&self) -> usize {
        self.written_paths.len()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_entries_sorted_by_category() {
        let mut registry = FileRegistry::new();
        registry
            .register_all([
                FileEntry::new("m/WidgetDSL.kt", "", FileCategory::Type),
                FileEntry::new("m/PartMapDSL.kt", "", FileCategory::Map),
                FileEntry::new("m/BlankDSL.kt", "", FileCategory::Type),
                FileEntry::new("AcmeDSL.kt", "", FileCategory::Marker),
                FileEntry::new("m/PartCollectionDSL.kt", "", FileCategory::Collection),
            ])
            .unwrap();

        let paths: Vec<&str> = registry.entries().map(|e| e.path.as_str()).collect();
        assert_eq!(
            paths,
            vec![
                "AcmeDSL.kt",
                "m/PartCollectionDSL.kt",
                "m/PartMapDSL.kt",
                "m/WidgetDSL.kt",
                "m/BlankDSL.kt",
            ]
        );
        assert_eq!(registry.entries_by_category(FileCategory::Type).count(), 2);
    }

    #[test]
    fn test_duplicate_path_is_rejected() {
        let mut registry = FileRegistry::new();
        registry
            .register(FileEntry::new("m/WidgetDSL.kt", "a", FileCategory::Type))
            .unwrap();

        let err = registry
            .register(FileEntry::new("m/WidgetDSL.kt", "b", FileCategory::Type))
            .unwrap_err();

        assert!(err.to_string().contains("m/WidgetDSL.kt"));
        assert_eq!(registry.get("m/WidgetDSL.kt").unwrap().content, "a");
    }

    #[test]
    fn test_write_all_matches_preview() {
        let temp = tempfile::tempdir().unwrap();
        let mut registry = FileRegistry::new();
        registry
            .register_all([
                FileEntry::new("com/acme/WidgetDSL.kt", "widget\n", FileCategory::Type),
                FileEntry::new("com/AcmeDSL.kt", "marker\n", FileCategory::Marker),
            ])
            .unwrap();

        let stats = registry.write_all(temp.path()).unwrap();

        assert_eq!(stats.written(), 2);
        assert_eq!(stats.bytes, 14);
        assert_eq!(stats.written_paths[0], temp.path().join("com").join("AcmeDSL.kt"));
        for file in registry.preview() {
            let written = fs::read_to_string(temp.path().join(&file.path)).unwrap();
            assert_eq!(written, file.content);
        }
    }

    #[test]
    fn test_from_generated_uses_relative_path() {
        struct Marker;
        impl GeneratedFile for Marker {
            fn path(&self, base: &Path) -> PathBuf {
                base.join("com").join("acme").join("AcmeDSL.kt")
            }
            fn render(&self) -> String {
                "@DslMarker\n".to_string()
            }
        }

        let entry = FileEntry::from_generated(&Marker, FileCategory::Marker);
        assert_eq!(entry.path, "com/acme/AcmeDSL.kt");
        assert_eq!(entry.content, "@DslMarker\n");
    }
}
