//! Input discovery and output writing.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

/// Expands inputs into the list of documents to process.
///
/// Files are kept as given. Directories contribute their `*.pdf` entries in
/// sorted order, except files whose stem already ends with `skip_suffix`,
/// which are outputs of an earlier run.
///
/// # Errors
///
/// Returns an error if a directory cannot be read.
pub fn collect_pdf_inputs(inputs: &[PathBuf], skip_suffix: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if !input.is_dir() {
            files.push(input.clone());
            continue;
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(input)?
            .filter_map(|entry| entry.ok().map(|entry| entry.path()))
            .filter(|path| is_pdf(path))
            .filter(|path| {
                let previous_output = has_suffix(path, skip_suffix);
                if previous_output {
                    debug!(path = %path.display(), "Skipping earlier output");
                }
                !previous_output
            })
            .collect();
        entries.sort();
        files.extend(entries);
    }
    Ok(files)
}

fn is_pdf(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

fn has_suffix(path: &Path, suffix: &str) -> bool {
    !suffix.is_empty()
        && path
            .file_stem()
            .is_some_and(|stem| stem.to_string_lossy().ends_with(suffix))
}

/// Returns a key identifying the file `path` refers to.
///
/// Existing files resolve to their canonical path. A file that does not
/// exist yet resolves against its canonical parent directory; if that fails
/// too the path is used as given.
pub fn path_key(path: &Path) -> PathBuf {
    if let Ok(canonical) = fs::canonicalize(path) {
        return canonical;
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (fs::canonicalize(parent), path.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}

/// Returns `true` if both paths refer to the same file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    a == b || path_key(a) == path_key(b)
}

/// Writes `bytes` to `path` so that `path` either keeps its old contents or
/// holds all of `bytes`.
///
/// The data goes to a temporary file in the target directory, which is
/// synced and then renamed over `path`.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written or
/// renamed. The temporary file is removed in that case.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    temp.write_all(bytes)?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|error| error.error)?;
    Ok(())
}
