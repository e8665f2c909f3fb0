use crate::{
    config::Config,
    error::{Error, Result},
};
use globset::GlobMatcher;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Statistics collected during scanning.
#[derive(Debug, Default, Clone)]
pub(crate) struct ScanStats {
    /// Entries seen in the directory
    pub total_entries: usize,

    /// Files matching the include pattern
    pub matched_files: usize,

    /// Entries ignored (directories, links, other extensions)
    pub ignored_entries: usize,

    /// Entries the walker could not inspect, with the error text
    pub unreadable: Vec<(PathBuf, String)>,
}

/// Lists transcript files in the source directory.
pub(crate) struct Scanner {
    source_dir: PathBuf,
    include: GlobMatcher,
}

impl Scanner {
    /// Creates a new scanner from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the include pattern does not compile.
    pub(crate) fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            source_dir: config.source_dir.clone(),
            include: config.include_matcher()?,
        })
    }

    /// Ensures the source directory exists and can be listed before
    /// anything else happens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`] if the path is missing, not a
    /// directory, or unreadable.
    pub(crate) fn check_source(&self) -> Result<()> {
        if !self.source_dir.is_dir() {
            return Err(Error::directory_not_found(&self.source_dir));
        }

        fs::read_dir(&self.source_dir)
            .map(drop)
            .map_err(|e| {
                debug!("Cannot list {}: {}", self.source_dir.display(), e);
                Error::directory_not_found(&self.source_dir)
            })
    }

    /// Lists regular files directly inside the source directory whose name
    /// matches the include pattern.
    ///
    /// Subdirectories are not descended into. Hidden entries and symlinks
    /// are ignored. Entries the walker fails on are recorded in
    /// [`ScanStats::unreadable`]. The listing order is unspecified; callers sort.
    ///
    /// # Errors
    ///
    /// Returns an error if the source directory is missing or cannot be listed.
    pub(crate) fn scan(&self) -> Result<(Vec<PathBuf>, ScanStats)> {
        self.check_source()?;

        debug!("Scanning {}", self.source_dir.display());

        let walker = WalkBuilder::new(&self.source_dir)
            .standard_filters(false)
            .hidden(true)
            .follow_links(false)
            .max_depth(Some(1))
            .build();

        let mut files = Vec::new();
        let mut stats = ScanStats::default();

        for result in walker {
            let entry = match result {
                Ok(entry) => entry,
                Err(e) if e.depth().is_some_and(|depth| depth > 0) => {
                    warn!("Walk error: {}", e);
                    let path = error_path(&e)
                        .unwrap_or(self.source_dir.as_path())
                        .to_path_buf();
                    stats.unreadable.push((path, e.to_string()));
                    continue;
                }
                Err(e) => {
                    warn!("Cannot list {}: {}", self.source_dir.display(), e);
                    return Err(Error::directory_not_found(&self.source_dir));
                }
            };

            // The walker yields the root itself at depth 0.
            if entry.depth() == 0 {
                continue;
            }

            stats.total_entries += 1;

            let is_file = entry.file_type().is_some_and(|ft| ft.is_file());
            if !is_file {
                trace!("Ignoring non-file entry: {}", entry.path().display());
                stats.ignored_entries += 1;
                continue;
            }

            if !self.include.is_match(entry.file_name()) {
                trace!("Ignoring unmatched file: {}", entry.path().display());
                stats.ignored_entries += 1;
                continue;
            }

            stats.matched_files += 1;
            files.push(entry.into_path());
        }

        debug!(
            "Scan complete: {} entries, {} matched, {} ignored",
            stats.total_entries, stats.matched_files, stats.ignored_entries
        );

        Ok((files, stats))
    }
}

/// Path carried by a walk error, if any.
fn error_path(error: &ignore::Error) -> Option<&Path> {
    match error {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        _ => None,
    }
}
