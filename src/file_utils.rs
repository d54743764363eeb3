use anyhow::{Result, Context};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    // @checks: Directory existence
    pub fn dir_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_dir()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.as_os_str().is_empty() && !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    /// Find files with a specific extension in a directory, recursively.
    ///
    /// Entries below `dir` that cannot be visited (dangling links, loops,
    /// unreadable directories) are logged and skipped.
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let extension = extension.trim_start_matches('.');

        for entry in WalkDir::new(dir.as_ref()).follow_links(true).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(e).with_context(|| format!("Failed to read directory: {:?}", dir.as_ref()));
                }
                Err(e) => {
                    warn!("Skipping directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if path.is_file() && Self::has_extension(path, extension) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Find files with a specific extension directly inside a directory
    pub fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let extension = extension.trim_start_matches('.');
        let mut result = Vec::new();

        for entry in WalkDir::new(dir.as_ref()).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == 0 => {
                    return Err(e).with_context(|| format!("Failed to read directory: {:?}", dir.as_ref()));
                }
                Err(e) => {
                    warn!("Skipping directory entry: {}", e);
                    continue;
                }
            };
            let path = entry.path();

            if path.is_file() && Self::has_extension(path, extension) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    fn has_extension(path: &Path, extension: &str) -> bool {
        path.extension()
            .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension))
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Provenance tag for examples found in `file`: its parent directory,
    /// with spaces replaced by underscores
    pub fn source_identifier<P: AsRef<Path>>(file: P) -> String {
        file.as_ref()
            .parent()
            .map(|parent| parent.to_string_lossy().replace(' ', "_"))
            .unwrap_or_default()
    }

    /// Expand an `{i}` filename template for batch index `index`
    pub fn expand_template(template: &str, index: usize) -> PathBuf {
        PathBuf::from(template.replace("{i}", &index.to_string()))
    }

    // @generates: Path of the image expected for a generated source
    pub fn image_path_for<P: AsRef<Path>>(source: P) -> PathBuf {
        source.as_ref().with_extension("png")
    }

    // @generates: Output path of a rasterized page inside `output_dir`
    pub fn generate_output_path<P1: AsRef<Path>, P2: AsRef<Path>>(
        input_file: P1,
        output_dir: P2,
        extension: &str,
    ) -> PathBuf {
        let stem = input_file.as_ref().file_stem().unwrap_or_default();

        let mut output_filename = stem.to_string_lossy().to_string();
        output_filename.push('.');
        output_filename.push_str(extension.trim_start_matches('.'));

        output_dir.as_ref().join(output_filename)
    }
}
