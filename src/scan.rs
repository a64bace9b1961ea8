//! Loads every request file found directly inside a directory.
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::ScanError;
use crate::request::{Request, parse_document};

/// Parses every regular file in `dir` into a [`Request`], in file-name
/// order. Subdirectories are ignored. A file that cannot be opened, parsed
/// or whose assertions do not compile is skipped with a diagnostic.
///
/// # Errors
///
/// Returns an error when `dir` is missing, is not a directory or cannot be
/// listed.
pub fn scan_directory(dir: &Path) -> Result<Vec<Request>, ScanError> {
    debug!("Scanning directory '{}'", dir.display());

    let metadata = fs::metadata(dir).map_err(|err| ScanError::Stat {
        path: dir.to_path_buf(),
        source: err,
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }

    let read_dir_error = |err| ScanError::ReadDir {
        path: dir.to_path_buf(),
        source: err,
    };
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let path = entry.path();
        if path.is_dir() {
            debug!("Skipping directory '{}'", path.display());
            continue;
        }
        paths.push(path);
    }
    paths.sort();

    let requests: Vec<Request> = paths.iter().filter_map(|path| load_request(path)).collect();
    debug!("Found {} correct requests", requests.len());
    Ok(requests)
}

fn load_request(path: &Path) -> Option<Request> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) => {
            warn!("Could not open request file '{}': {}", path.display(), err);
            return None;
        }
    };
    let request = match parse_document(file) {
        Ok(request) => request,
        Err(err) => {
            debug!("Could not parse request file '{}': {}", path.display(), err);
            return None;
        }
    };
    if let Err(err) = request.validate_assertions() {
        warn!("Skipping request file '{}': {}", path.display(), err);
        return None;
    }
    Some(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) -> Result<(), String> {
        fs::write(dir.join(name), content).map_err(|err| format!("write {} failed: {}", name, err))
    }

    #[test]
    fn loads_valid_files_and_skips_the_rest() -> Result<(), String> {
        let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        write(dir.path(), "b.req", "{\"name\": \"second\"}\n---\n")?;
        write(dir.path(), "a.req", "{\"name\": \"first\", \"assertions\": [\"ok\"]}\n---\nbody")?;
        write(dir.path(), "no-divider.req", "{\"name\": \"skipped\"}")?;
        write(dir.path(), "bad-json.req", "{\"name\": \n---\n")?;
        write(dir.path(), "bad-regex.req", "{\"name\": \"x\", \"assertions\": [\"(\"]}\n---\n")?;
        fs::create_dir(dir.path().join("nested")).map_err(|err| format!("mkdir failed: {}", err))?;
        write(&dir.path().join("nested"), "c.req", "{\"name\": \"nested\"}\n---\n")?;

        let requests = scan_directory(dir.path()).map_err(|err| err.to_string())?;
        let names: Vec<&str> = requests.iter().map(|req| req.name.as_str()).collect();
        if names != ["first", "second"] {
            return Err(format!("unexpected requests {:?}", names));
        }
        Ok(())
    }

    #[test]
    fn empty_directory_yields_no_requests() -> Result<(), String> {
        let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        let requests = scan_directory(dir.path()).map_err(|err| err.to_string())?;
        if !requests.is_empty() {
            return Err(format!("expected nothing, got {}", requests.len()));
        }
        Ok(())
    }

    #[test]
    fn missing_path_and_plain_file_are_errors() -> Result<(), String> {
        let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
        match scan_directory(&dir.path().join("absent")) {
            Err(ScanError::Stat { .. }) => {}
            other => return Err(format!("expected Stat error, got {:?}", other)),
        }
        write(dir.path(), "file.req", "{}\n---\n")?;
        match scan_directory(&dir.path().join("file.req")) {
            Err(ScanError::NotADirectory { .. }) => Ok(()),
            other => Err(format!("expected NotADirectory, got {:?}", other)),
        }
    }
}
