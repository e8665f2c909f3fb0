use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

/// A transcript file discovered in the source directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path to the file
    pub path: PathBuf,

    /// File name as listed in the directory
    pub file_name: String,

    /// Ordering key extracted from the file name
    pub order: u64,

    /// Heading shown for this file in the output document
    pub title: String,
}

impl SourceFile {
    /// Builds a source file from a path, deriving its ordering key and title.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedFilename`] if the name has no digit run, or
    /// the digit run does not fit in a `u64`.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| Error::malformed_filename(path.display().to_string()))?;

        let order = ordering_key(&file_name)
            .ok_or_else(|| Error::malformed_filename(&file_name))?;
        let title = derive_title(&path, &file_name);

        Ok(Self {
            path,
            file_name,
            order,
            title,
        })
    }

    /// Reads the full content of the file as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] if the file cannot be read, contains NUL
    /// bytes or is not valid UTF-8.
    pub fn read_text(&self) -> Result<String> {
        let bytes = fs::read(&self.path).map_err(|e| Error::decode(&self.path, e.to_string()))?;
        decode_utf8(&self.path, bytes)
    }
}

impl Ord for SourceFile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order
            .cmp(&other.order)
            .then_with(|| self.file_name.cmp(&other.file_name))
            .then_with(|| self.path.cmp(&other.path))
    }
}

impl PartialOrd for SourceFile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Extracts the ordering key: the first contiguous run of ASCII digits
/// anywhere in the name.
///
/// `audio_12@05-03-2024_10-15-00.txt` yields `12`. Returns `None` when there
/// is no digit run or it overflows `u64`.
#[must_use]
pub fn ordering_key(file_name: &str) -> Option<u64> {
    let start = file_name.find(|c: char| c.is_ascii_digit())?;
    let rest = &file_name[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());

    rest[..end].parse().ok()
}

/// File name without its final extension.
fn derive_title(path: &Path, file_name: &str) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| file_name.to_string())
}

/// Decodes raw bytes as UTF-8, rejecting content that looks binary.
pub(crate) fn decode_utf8(path: &Path, bytes: Vec<u8>) -> Result<String> {
    if let Some(pos) = memchr::memchr(0, &bytes) {
        return Err(Error::decode(
            path,
            format!("NUL byte at offset {pos}, file looks binary"),
        ));
    }

    String::from_utf8(bytes).map_err(|e| Error::decode(path, e.to_string()))
}
