use crate::{
    config::Config,
    document::{OutputDocument, Section},
    error::{Error, Result},
    file::SourceFile,
    scanner::Scanner,
    writer::Writer,
};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};

/// Why a file was left out of the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// File name has no numeric ordering key
    MalformedFilename,
    /// File content is not UTF-8 text
    Decode,
    /// Directory entry could not be inspected while listing
    Unreadable,
}

/// A file skipped during collection.
#[derive(Debug, Clone, Serialize)]
pub struct SkippedFile {
    /// Path to the skipped file
    pub path: PathBuf,

    /// Skip category
    pub reason: SkipReason,

    /// Human-readable detail
    pub message: String,
}

impl SkippedFile {
    fn from_error(path: PathBuf, error: &Error) -> Self {
        let reason = match error {
            Error::MalformedFilename { .. } => SkipReason::MalformedFilename,
            _ => SkipReason::Decode,
        };

        Self {
            path,
            reason,
            message: error.to_string(),
        }
    }

    fn unreadable(path: PathBuf, message: String) -> Self {
        Self {
            path,
            reason: SkipReason::Unreadable,
            message,
        }
    }
}

/// Statistics collected during a collection run.
#[derive(Debug, Clone, Serialize)]
pub struct CollectStats {
    /// Entries listed in the source directory
    pub total_entries: usize,

    /// Files matching the include pattern
    pub matched_files: usize,

    /// Sections written to the output document
    pub sections_written: usize,

    /// Files left out, in the order they were encountered
    pub skipped: Vec<SkippedFile>,

    /// Destination path
    pub output_path: PathBuf,

    /// Size of the written document
    pub bytes_written: u64,

    /// Total execution time
    pub duration: Duration,
}

impl CollectStats {
    /// Number of skipped files.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Number of files skipped for the given reason.
    #[must_use]
    pub fn skipped_by(&self, reason: SkipReason) -> usize {
        self.skipped.iter().filter(|s| s.reason == reason).count()
    }

    /// Prints a human-readable summary to stdout.
    pub fn print_summary(&self) {
        println!("\n╔═══════════════════════════════════════════════════════╗");
        println!("║              Collection Summary                       ║");
        println!("╠═══════════════════════════════════════════════════════╣");
        println!(
            "║ Files matched:        {:>8}                        ║",
            self.matched_files
        );
        println!(
            "║ Sections written:     {:>8}                        ║",
            self.sections_written
        );
        println!(
            "║ Files skipped:        {:>8}                        ║",
            self.skipped_count()
        );
        println!(
            "║   - Bad file name:    {:>8}                        ║",
            self.skipped_by(SkipReason::MalformedFilename)
        );
        println!(
            "║   - Not UTF-8 text:   {:>8}                        ║",
            self.skipped_by(SkipReason::Decode)
        );
        println!(
            "║   - Unreadable entry: {:>8}                        ║",
            self.skipped_by(SkipReason::Unreadable)
        );
        println!(
            "║ Total time:           {:>8.2}s                       ║",
            self.duration.as_secs_f64()
        );
        println!("║ Output file:                                          ║");
        println!("║   {}", self.output_path.display());
        println!("╚═══════════════════════════════════════════════════════╝\n");
    }
}

/// Collects transcript files into a single markdown document.
pub struct Collector {
    config: Config,
    scanner: Scanner,
    writer: Writer,
}

impl Collector {
    /// Creates a new collector with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration validation fails.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let scanner = Scanner::new(&config)?;
        let writer = Writer::new(&config.output_path);

        Ok(Self {
            config,
            scanner,
            writer,
        })
    }

    /// Executes the collection and returns statistics.
    ///
    /// # Process
    ///
    /// 1. **Scan**: lists matching files in the source directory
    /// 2. **Order**: extracts ordering keys and sorts by key, then file name
    /// 3. **Read**: decodes each file as UTF-8 into a section
    /// 4. **Write**: renders the document and writes it in one go
    ///
    /// Files with a malformed name or undecodable content, and entries the
    /// directory walk could not inspect, are skipped and reported in
    /// [`CollectStats::skipped`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::DirectoryNotFound`] before anything is written if the
    /// source directory is missing or unreadable, and [`Error::Write`] if the output cannot
    /// be written.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use voice_collect::{Collector, Config};
    ///
    /// # fn main() -> anyhow::Result<()> {
    /// let config = Config::builder()
    ///     .source_dir("./voices")
    ///     .output_path("./voices.md")
    ///     .build()?;
    ///
    /// let stats = Collector::new(config)?.run()?;
    /// stats.print_summary();
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self), fields(source_dir = %self.config.source_dir.display()))]
    pub fn run(self) -> Result<CollectStats> {
        let start_time = Instant::now();

        let (paths, scan_stats) = self.scanner.scan()?;
        info!("Found {} transcript files", paths.len());

        let mut skipped: Vec<SkippedFile> = scan_stats
            .unreadable
            .into_iter()
            .map(|(path, message)| SkippedFile::unreadable(path, message))
            .collect();
        let files = Self::order(paths, &mut skipped);
        let document = Self::read_sections(&files, &mut skipped);

        let rendered = document.render();
        let bytes_written = self.writer.write(&rendered)?;

        let stats = CollectStats {
            total_entries: scan_stats.total_entries,
            matched_files: scan_stats.matched_files,
            sections_written: document.len(),
            skipped,
            output_path: self.config.output_path.clone(),
            bytes_written,
            duration: start_time.elapsed(),
        };

        info!(
            "✓ Wrote {} sections to {} in {:.2}s",
            stats.sections_written,
            stats.output_path.display(),
            stats.duration.as_secs_f64()
        );

        if !stats.skipped.is_empty() {
            warn!(
                "Skipped {} file(s): {} malformed name(s), {} undecodable, {} unreadable",
                stats.skipped_count(),
                stats.skipped_by(SkipReason::MalformedFilename),
                stats.skipped_by(SkipReason::Decode),
                stats.skipped_by(SkipReason::Unreadable)
            );
        }

        Ok(stats)
    }

    /// Builds source files from paths and sorts them by ordering key.
    fn order(paths: Vec<PathBuf>, skipped: &mut Vec<SkippedFile>) -> Vec<SourceFile> {
        let mut files: Vec<SourceFile> = paths
            .into_iter()
            .filter_map(|path| match SourceFile::from_path(&path) {
                Ok(file) => Some(file),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    skipped.push(SkippedFile::from_error(path, &e));
                    None
                }
            })
            .collect();

        files.sort();
        files
    }

    /// Reads files in order, skipping those that fail to decode.
    fn read_sections(files: &[SourceFile], skipped: &mut Vec<SkippedFile>) -> OutputDocument {
        let mut document = OutputDocument::new();

        for file in files {
            match file.read_text() {
                Ok(content) => {
                    debug!("Read #{} {} ({} bytes)", file.order, file.file_name, content.len());
                    document.push(Section::new(file.title.clone(), content));
                }
                Err(e) => {
                    warn!("Skipping {}: {}", file.path.display(), e);
                    skipped.push(SkippedFile::from_error(file.path.clone(), &e));
                }
            }
        }

        document
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use std::path::Path;

    fn create_test_config(source: &Path, output: &Path) -> Config {
        Config::builder()
            .source_dir(source)
            .output_path(output)
            .build()
            .unwrap()
    }

    fn collect(source: &Path, output: &Path) -> Result<CollectStats> {
        Collector::new(create_test_config(source, output))?.run()
    }

    #[test]
    fn test_collect_orders_by_numeric_key() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("voices");
        src.child("voice_2_x.txt").write_str("second").unwrap();
        src.child("voice_1_x.txt").write_str("first").unwrap();
        let out = temp.child("out.md");

        let stats = collect(src.path(), out.path()).unwrap();

        assert_eq!(stats.sections_written, 2);
        assert_eq!(stats.skipped_count(), 0);
        out.assert("# voice_1_x\nfirst\n\n# voice_2_x\nsecond\n");
    }

    #[test]
    fn test_collect_numeric_not_lexical_order() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("voices");
        for i in [10, 2, 1, 33, 9] {
            src.child(format!("audio_{i}@01-01-2024.txt"))
                .write_str(&format!("message {i}"))
                .unwrap();
        }
        let out = temp.child("out.md");

        collect(src.path(), out.path()).unwrap();

        let text = std::fs::read_to_string(out.path()).unwrap();
        let doc = OutputDocument::parse(&text);
        let contents: Vec<_> = doc.sections().iter().map(|s| s.content.as_str()).collect();
        assert_eq!(
            contents,
            ["message 1", "message 2", "message 9", "message 10", "message 33"]
        );
    }

    #[test]
    fn test_collect_ties_use_file_name() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("voices");
        src.child("b_5.txt").write_str("b").unwrap();
        src.child("a_5.txt").write_str("a").unwrap();
        let out = temp.child("out.md");

        collect(src.path(), out.path()).unwrap();

        out.assert("# a_5\na\n\n# b_5\nb\n");
    }

    #[test]
    fn test_collect_skips_malformed_names() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("voices");
        src.child("voice_1.txt").write_str("kept").unwrap();
        src.child("notes.txt").write_str("dropped").unwrap();
        let out = temp.child("out.md");

        let stats = collect(src.path(), out.path()).unwrap();

        assert_eq!(stats.sections_written, 1);
        assert_eq!(stats.skipped_by(SkipReason::MalformedFilename), 1);
        out.assert("# voice_1\nkept\n");
    }

    #[test]
    fn test_collect_skips_undecodable_files() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("voices");
        src.child("voice_1.txt").write_binary(&[0xc3, 0x28]).unwrap();
        src.child("voice_2.txt").write_binary(b"a\0b").unwrap();
        src.child("voice_3.txt").write_str("ok").unwrap();
        let out = temp.child("out.md");

        let stats = collect(src.path(), out.path()).unwrap();

        assert_eq!(stats.sections_written, 1);
        assert_eq!(stats.skipped_by(SkipReason::Decode), 2);
        out.assert("# voice_3\nok\n");
    }

    #[test]
    fn test_collect_empty_directory() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("voices");
        src.create_dir_all().unwrap();
        let out = temp.child("out.md");

        let stats = collect(src.path(), out.path()).unwrap();

        assert_eq!(stats.sections_written, 0);
        assert_eq!(stats.bytes_written, 0);
        out.assert("");
    }

    #[test]
    fn test_collect_missing_directory_writes_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let out = temp.child("out.md");

        let err = collect(&temp.path().join("missing"), out.path()).unwrap_err();

        assert!(matches!(err, Error::DirectoryNotFound { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn test_collect_missing_directory_keeps_existing_output() {
        let temp = assert_fs::TempDir::new().unwrap();
        let out = temp.child("out.md");
        out.write_str("previous").unwrap();

        collect(&temp.path().join("missing"), out.path()).unwrap_err();

        out.assert("previous");
    }

    #[test]
    fn test_collect_unwritable_destination() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("voices");
        src.child("voice_1.txt").write_str("one").unwrap();
        temp.child("blocker").write_str("file, not a dir").unwrap();

        let err = collect(src.path(), &temp.path().join("blocker/out.md")).unwrap_err();

        assert!(matches!(err, Error::Write { .. }));
    }

    #[test]
    fn test_unreadable_entry_counts_as_skipped() {
        let skipped = SkippedFile::unreadable(
            PathBuf::from("/voices/voice_4.txt"),
            "permission denied".to_string(),
        );
        let stats = CollectStats {
            total_entries: 1,
            matched_files: 0,
            sections_written: 0,
            skipped: vec![skipped],
            output_path: PathBuf::from("out.md"),
            bytes_written: 0,
            duration: Duration::ZERO,
        };

        assert_eq!(stats.skipped_count(), 1);
        assert_eq!(stats.skipped_by(SkipReason::Unreadable), 1);
        assert_eq!(stats.skipped_by(SkipReason::Decode), 0);

        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["skipped"][0]["reason"], "unreadable");
    }

    #[test]
    fn test_stats_serialize() {
        let temp = assert_fs::TempDir::new().unwrap();
        let src = temp.child("voices");
        src.child("voice_1.txt").write_str("one").unwrap();
        src.child("readme.txt").write_str("no key").unwrap();
        let out = temp.child("out.md");

        let stats = collect(src.path(), out.path()).unwrap();
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["sections_written"], 1);
        assert_eq!(json["skipped"][0]["reason"], "malformed_filename");
    }
}
