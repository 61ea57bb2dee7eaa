//! Plain-text import of resume / job description files.
//!
//! Only text formats are parsed in-process; binary formats (PDF, DOCX) are
//! reported as unsupported with a reason the UI can show directly.

use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

const MAX_FILE_SIZE_MB: u64 = 5;
const MAX_FILE_SIZE_BYTES: u64 = MAX_FILE_SIZE_MB * 1024 * 1024;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("File is too large ({0:.1}MB). Please pick a file smaller than {MAX_FILE_SIZE_MB}MB.")]
    TooLarge(f64),

    #[error("Unsupported file format \"{0}\". Please pick a .txt or .md file.")]
    Unsupported(String),

    #[error("The file \"{0}\" has already been imported.")]
    Duplicate(String),

    #[error("The file appears to be empty.")]
    Empty,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Reject re-importing the file that is already loaded.
pub fn validate_not_duplicate(
    file_name: &str,
    current_file_name: Option<&str>,
) -> Result<(), ImportError> {
    match current_file_name {
        Some(current) if current == file_name => {
            Err(ImportError::Duplicate(file_name.to_string()))
        }
        _ => Ok(()),
    }
}

/// Read a picked file into plain text, enforcing the size cap and the
/// supported-format list.
pub fn import_text_file(path: &Path) -> Result<String, ImportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if ext != "txt" && ext != "md" {
        return Err(ImportError::Unsupported(ext));
    }

    let size = fs::metadata(path)?.len();
    if size > MAX_FILE_SIZE_BYTES {
        return Err(ImportError::TooLarge(size as f64 / 1024.0 / 1024.0));
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Err(ImportError::Empty);
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use uuid::Uuid;

    fn temp_file(name: &str, content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("test_import_{}", Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn cleanup(path: &Path) {
        if let Some(dir) = path.parent() {
            let _ = fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn imports_a_text_file() {
        let path = temp_file("resume.txt", "# Jane Doe\nBackend Engineer");
        let content = import_text_file(&path).unwrap();
        assert!(content.starts_with("# Jane Doe"));
        cleanup(&path);
    }

    #[test]
    fn rejects_unsupported_extensions() {
        let path = temp_file("resume.pdf", "%PDF-1.4");
        match import_text_file(&path) {
            Err(ImportError::Unsupported(ext)) => assert_eq!(ext, "pdf"),
            other => panic!("expected Unsupported, got {:?}", other),
        }
        cleanup(&path);
    }

    #[test]
    fn rejects_empty_files() {
        let path = temp_file("resume.md", "   \n  ");
        assert!(matches!(import_text_file(&path), Err(ImportError::Empty)));
        cleanup(&path);
    }

    #[test]
    fn rejects_duplicate_file_names() {
        assert!(validate_not_duplicate("cv.txt", Some("cv.txt")).is_err());
        assert!(validate_not_duplicate("cv.txt", Some("other.txt")).is_ok());
        assert!(validate_not_duplicate("cv.txt", None).is_ok());
    }
}
