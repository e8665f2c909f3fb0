use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
use voice_collect::{Collector, Config};

#[derive(Parser, Debug)]
#[command(
    name = "voice-collect",
    version,
    author,
    about = "Collect transcribed voice messages into a single markdown file",
    long_about = "Collect transcribed voice messages into a single markdown file.\n\n\
    Reads every .txt file in SOURCE_DIR, orders the files by the first number \
    in their names and writes them to OUTPUT_FILE, one '# <name>' section per file. \
    Files without a number in their name or with non-UTF-8 content are skipped.\n\n\
    USAGE EXAMPLE:\n  \
      voice-collect ./export/voices ./voices.md"
)]
struct Cli {
    /// Directory containing the transcript text files
    #[arg(value_name = "SOURCE_DIR")]
    source_dir: PathBuf,

    /// Markdown file to create or overwrite
    #[arg(value_name = "OUTPUT_FILE")]
    output_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_tracing();

    let config = Config::builder()
        .source_dir(cli.source_dir)
        .output_path(cli.output_file)
        .build()
        .context("Failed to build configuration")?;

    let stats = Collector::new(config)
        .context("Failed to create collector")?
        .run()
        .context("Collection failed")?;

    stats.print_summary();

    Ok(())
}

fn setup_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::new("voice_collect=info"))
        .with(fmt::layer().with_target(false).with_thread_ids(false))
        .init();
}
