use anyhow::{Result, Context};
use std::fs;
use std::fs::File;
use std::io::{self, BufWriter, Write};
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
            fs::create_dir_all(path)?;
        }
        Ok(())
    }

    // @generates: Sibling path with the extension swapped
    // @params: input_file, from_extension, to_extension
    pub fn replace_extension<P: AsRef<Path>>(
        input_file: P,
        from_extension: &str,
        to_extension: &str,
    ) -> PathBuf {
        let input_file = input_file.as_ref();
        let file_name = input_file.file_name().unwrap_or_default().to_string_lossy();

        // Strip the suffix textually so "a.b.layout" keeps "a.b"
        let suffix = format!(".{}", from_extension);
        let base = file_name.strip_suffix(suffix.as_str()).unwrap_or(&file_name);

        let mut output_filename = base.to_string();
        output_filename.push('.');
        output_filename.push_str(to_extension);

        input_file.with_file_name(output_filename)
    }

    /// Find files directly inside `dir` whose name ends with `.{extension}`, sorted by name
    pub fn find_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>> {
        let mut result = Vec::new();
        let suffix = format!(".{}", extension.trim_start_matches('.'));

        for entry in WalkDir::new(dir.as_ref())
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if path.is_file() && entry.file_name().to_string_lossy().ends_with(&suffix) {
                result.push(path.to_path_buf());
            }
        }

        Ok(result)
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write bytes to a file, creating parent directories
    pub fn write_to_file<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, content: C) -> Result<()> {
        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Concatenate `inputs` in order into `output`, truncating it first
    pub fn concatenate_files<P: AsRef<Path>>(inputs: &[PathBuf], output: P) -> Result<()> {
        let output = output.as_ref();

        // Read everything first in case the output is one of the inputs
        let mut contents = Vec::new();
        for input in inputs {
            let bytes = fs::read(input)
                .with_context(|| format!("Failed to read file: {:?}", input))?;
            contents.push(bytes);
        }

        if let Some(parent) = output.parent() {
            Self::ensure_dir(parent)?;
        }

        let file = File::create(output)
            .with_context(|| format!("Failed to create file: {:?}", output))?;
        let mut writer = BufWriter::new(file);

        for bytes in &contents {
            writer.write_all(bytes)
                .with_context(|| format!("Failed to write to file: {:?}", output))?;
        }

        writer.flush()
            .with_context(|| format!("Failed to write to file: {:?}", output))?;

        Ok(())
    }

    /// Remove files, ignoring the ones that are already gone
    pub fn remove_files(paths: &[PathBuf]) -> Result<()> {
        for path in paths {
            match fs::remove_file(path) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to remove file: {:?}", path));
                }
            }
        }

        Ok(())
    }
}
