use crate::error::{Error, Result};
use globset::{Glob, GlobMatcher};
use std::path::PathBuf;

/// Default include pattern: transcripts are exported as `.txt` files.
pub(crate) const DEFAULT_INCLUDE_PATTERN: &str = "*.txt";

/// Configuration for a collection run.
///
/// Use [`Config::builder()`] to construct a new configuration.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Config {
    /// Directory holding the transcript files
    pub source_dir: PathBuf,

    /// Markdown file to create or overwrite
    pub output_path: PathBuf,

    /// Glob matched against file names to select transcripts
    pub include_pattern: String,
}

impl Config {
    /// Creates a new configuration builder.
    ///
    /// # Examples
    ///
    /// ```
    /// use voice_collect::Config;
    ///
    /// let config = Config::builder()
    ///     .source_dir("./voices")
    ///     .output_path("./voices.md")
    ///     .build()
    ///     .expect("valid configuration");
    /// ```
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Validates the configuration.
    ///
    /// Existence of the source directory is checked when the run starts,
    /// not here.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either path is empty
    /// - The output path points at an existing directory
    /// - The include pattern is not a valid glob
    pub fn validate(&self) -> Result<()> {
        if self.source_dir.as_os_str().is_empty() {
            return Err(Error::config("source_dir must not be empty"));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(Error::config("output_path must not be empty"));
        }

        if self.output_path.is_dir() {
            return Err(Error::config(format!(
                "Output path is a directory: {}",
                self.output_path.display()
            )));
        }

        self.include_matcher()?;

        Ok(())
    }

    /// Compiles the include pattern.
    pub(crate) fn include_matcher(&self) -> Result<GlobMatcher> {
        Glob::new(&self.include_pattern)
            .map(|glob| glob.compile_matcher())
            .map_err(|e| {
                Error::config(format!(
                    "Invalid include pattern '{}': {}",
                    self.include_pattern, e
                ))
            })
    }
}

/// Builder for creating a [`Config`].
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    source_dir: Option<PathBuf>,
    output_path: Option<PathBuf>,
    include_pattern: Option<String>,
}

impl ConfigBuilder {
    /// Sets the directory to collect transcripts from.
    #[must_use]
    pub fn source_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_dir = Some(path.into());
        self
    }

    /// Sets the markdown file to write.
    #[must_use]
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Sets the glob used to select files by name (default `*.txt`).
    #[must_use]
    pub fn include_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.include_pattern = Some(pattern.into());
        self
    }

    /// Builds the configuration, validating all settings.
    ///
    /// # Errors
    ///
    /// Returns an error if a path is missing or validation fails.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            source_dir: self
                .source_dir
                .ok_or_else(|| Error::config("source_dir is required"))?,
            output_path: self
                .output_path
                .ok_or_else(|| Error::config("output_path is required"))?,
            include_pattern: self
                .include_pattern
                .unwrap_or_else(|| DEFAULT_INCLUDE_PATTERN.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}
