//! Reading source text from files or stdin.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Path argument meaning "read from stdin".
pub const STDIN_MARKER: &str = "-";

/// Read the whole input as text. Invalid UTF-8 is replaced, not rejected.
pub fn read_text(path: &Path) -> Result<String> {
    let bytes = if path.as_os_str() == STDIN_MARKER {
        let mut buffer = Vec::new();
        std::io::stdin()
            .read_to_end(&mut buffer)
            .context("Failed to read stdin")?;
        buffer
    } else {
        if !path.exists() {
            anyhow::bail!("Input file not found: {}", path.display());
        }
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
    };

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Human-readable name of the input for reports.
pub fn display_name(path: &Path) -> String {
    if path.as_os_str() == STDIN_MARKER {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_read_text_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("story.txt");
        fs::write(&path, "Once upon a time.").unwrap();

        assert_eq!(read_text(&path).unwrap(), "Once upon a time.");
    }

    #[test]
    fn test_read_invalid_utf8_lossily() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("noisy.txt");
        fs::write(&path, b"ok \xff\xfe text").unwrap();

        let text = read_text(&path).unwrap();
        assert!(text.starts_with("ok "));
        assert!(text.ends_with(" text"));
        assert!(text.contains('\u{fffd}'));
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_text(&temp_dir.path().join("absent.txt")).unwrap_err();
        assert!(err.to_string().contains("Input file not found"));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("-")), "stdin");
        assert_eq!(display_name(Path::new("book.txt")), "book.txt");
    }
}
