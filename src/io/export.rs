//! Write output payloads as pretty JSON, and read back a previous run.

use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::AppError;

/// Serialize `payload` with 2-space indentation and write it to `path`,
/// creating the parent directory when needed.
pub fn write_json<T: Serialize>(path: &Path, payload: &T) -> Result<(), AppError> {
    let json = serde_json::to_string_pretty(payload)
        .map_err(|e| AppError::output(format!("Failed to serialize JSON: {e}")))?;

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| {
            AppError::output(format!("Failed to create output dir '{}': {e}", dir.display()))
        })?;
    }

    fs::write(path, json)
        .map_err(|e| AppError::output(format!("Failed to write JSON '{}': {e}", path.display())))?;
    Ok(())
}

/// Load a previously written payload. Missing or unreadable files are `None`.
pub fn read_previous_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let text = fs::read_to_string(path).ok()?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "ignoring unreadable previous output");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        a: u32,
        b: String,
    }

    #[test]
    fn writes_indented_json_and_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output").join("x.json");
        write_json(&path, &Sample { a: 1, b: "ç".to_string() }).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"a\": 1,\n  \"b\": \"ç\"\n}");
        assert_eq!(read_previous_json::<Sample>(&path), Some(Sample { a: 1, b: "ç".to_string() }));
    }

    #[test]
    fn previous_json_tolerates_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        assert_eq!(read_previous_json::<Sample>(&path), None);
        fs::write(&path, "{not json").unwrap();
        assert_eq!(read_previous_json::<Sample>(&path), None);
    }

    #[test]
    fn write_into_a_file_path_fails_with_output_code() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "x").unwrap();
        let err = write_json(&blocker.join("out.json"), &Sample { a: 1, b: String::new() }).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
