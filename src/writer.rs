use crate::error::{Error, Result};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Writes the rendered document to its destination.
pub(crate) struct Writer {
    output_path: PathBuf,
}

impl Writer {
    pub(crate) fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Writes `content` to the output path, replacing any existing file.
    ///
    /// # Process
    ///
    /// 1. Creates the parent directory if it is missing
    /// 2. Writes content to a temporary file next to the target
    /// 3. Syncs the temporary file to disk
    /// 4. Renames the temporary file over the target path
    ///
    /// A failed run leaves any previous output untouched.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Write`] if any step fails.
    pub(crate) fn write(&self, content: &str) -> Result<u64> {
        let path = &self.output_path;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| Error::write(parent, e))?;
        }

        let temp_path = temp_path_for(path);
        if let Err(e) = write_and_sync(&temp_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(Error::write(path, e));
        }

        debug!("Wrote {} bytes to {}", content.len(), path.display());
        Ok(content.len() as u64)
    }
}

fn write_and_sync(temp_path: &Path, content: &str) -> Result<()> {
    let mut temp_file = fs::File::create(temp_path).map_err(|e| Error::write(temp_path, e))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| Error::write(temp_path, e))?;

    temp_file
        .sync_all()
        .map_err(|e| Error::write(temp_path, e))
}

/// Hidden sibling of the target, so the final rename stays on one filesystem.
fn temp_path_for(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn test_write_creates_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        let out = temp.child("out.md");

        let written = Writer::new(out.path()).write("# a\nb\n").unwrap();

        assert_eq!(written, 6);
        out.assert("# a\nb\n");
        assert!(!temp.child(".out.md.tmp").exists());
    }

    #[test]
    fn test_write_overwrites_existing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let out = temp.child("out.md");
        out.write_str("old content that is longer").unwrap();

        Writer::new(out.path()).write("new").unwrap();

        out.assert("new");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp = assert_fs::TempDir::new().unwrap();
        let out = temp.child("nested/deeper/out.md");

        Writer::new(out.path()).write("").unwrap();

        out.assert("");
    }

    #[test]
    fn test_write_fails_when_parent_is_a_file() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("blocker").write_str("x").unwrap();
        let out = temp.path().join("blocker/out.md");

        let err = Writer::new(&out).write("content").unwrap_err();

        assert!(matches!(err, Error::Write { .. }));
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let temp = temp_path_for(Path::new("/data/voices.md"));
        assert_eq!(temp, PathBuf::from("/data/.voices.md.tmp"));
    }
}
