use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr, bail};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk, creating parent directories first
    fn write(&self, base: &Path) -> Result<WriteResult> {
        let path = self.path(base);
        let content = self.render();
        write_file(&path, &content)?;
        Ok(WriteResult {
            path,
            bytes: content.len(),
        })
    }
}

/// Write `content` to `path`, creating missing parent directories.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create directory '{}'", parent.display()))?;
    }
    std::fs::write(path, content)
        .wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    Ok(())
}

/// Remove everything below `root` and recreate it empty.
///
/// Refuses to clear an empty path or a filesystem root.
pub fn clear_dir(root: &Path) -> Result<()> {
    if root.as_os_str().is_empty() || root.parent().is_none() {
        bail!("refusing to clear output root '{}'", root.display());
    }
    if root.exists() {
        std::fs::remove_dir_all(root)
            .wrap_err_with(|| format!("failed to clear output root '{}'", root.display()))?;
    }
    std::fs::create_dir_all(root)
        .wrap_err_with(|| format!("failed to create output root '{}'", root.display()))?;
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteResult {
    /// Path the file was written to
    pub path: PathBuf,
    /// Number of bytes written
    pub bytes: usize,
}
