//! # voice-collect
//!
//! Collects transcribed voice messages from a chat export into a single
//! markdown document.
//!
//! Each transcript is a text file whose name carries the message index
//! (for example `audio_12@05-03-2024_10-15-00.txt`). Files are ordered by
//! that index and written as one `# <title>` section each.
//!
//! ## Quick Start
//!
//! ```no_run
//! use voice_collect::{Collector, Config};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder()
//!     .source_dir("./export/voices")
//!     .output_path("./voices.md")
//!     .build()?;
//!
//! let stats = Collector::new(config)?.run()?;
//! println!("{} sections, {} skipped", stats.sections_written, stats.skipped_count());
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! 1. **Scanner**: lists matching files in the source directory
//! 2. **Ordering**: extracts the first digit run of each name as its key
//! 3. **Document**: reads each file as UTF-8 into a section
//! 4. **Writer**: writes the rendered document in a single step
//!
//! Files with no ordering key or non-UTF-8 content are skipped and reported;
//! a missing source directory or an unwritable destination aborts the run.

#![warn(
    missing_docs,
    rust_2018_idioms,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(clippy::module_name_repetitions)]

mod collector;
mod config;
mod document;
mod error;
mod file;
mod scanner;
mod writer;

pub use collector::{CollectStats, Collector, SkipReason, SkippedFile};
pub use config::{Config, ConfigBuilder};
pub use document::{OutputDocument, Section};
pub use error::{Error, Result};
pub use file::{SourceFile, ordering_key};

/// Runs a complete collection with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Configuration is invalid
/// - Source directory doesn't exist
/// - Output file cannot be written
///
/// # Examples
///
/// ```no_run
/// use voice_collect::{Config, run};
///
/// # fn main() -> anyhow::Result<()> {
/// let config = Config::builder()
///     .source_dir("voices")
///     .output_path("voices.md")
///     .build()?;
///
/// run(config)?;
/// # Ok(())
/// # }
/// ```
pub fn run(config: Config) -> Result<CollectStats> {
    Collector::new(config)?.run()
}
