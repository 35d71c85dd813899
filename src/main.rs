//! Farcaster Feed Export
//!
//! Downloads the casts of a Farcaster channel from the Neynar feed API and
//! saves them as `farcaster_feed_<channel>.csv`.
//!
//! # Usage
//!
//! ```bash
//! # Export up to 10 pages of the "memes" channel
//! NEYNAR_API_KEY=... farcaster-feed-export memes
//!
//! # Three pages, written to stdout
//! farcaster-feed-export memes --pages 3 --output -
//! ```

use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

use farcaster_feed_export::cli::{CliInterface, OutputTarget};
use farcaster_feed_export::error::Result;
use farcaster_feed_export::export::{
    ExportCoordinator, ExportResult, ExportSink, FileSink, ProgressTracker, StdoutSink,
};
use farcaster_feed_export::feed::NeynarClient;

/// Application entry point
#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Main application logic
///
/// 1. Parse command-line arguments and load configuration
/// 2. Initialize logging
/// 3. Handle subcommands or run the export
async fn run() -> Result<()> {
    let cli = CliInterface::new()?;

    initialize_logging(&cli)?;

    if cli.handle_subcommand()? {
        return Ok(());
    }

    run_export(&cli).await
}

/// Export the requested channel
async fn run_export(cli: &CliInterface) -> Result<()> {
    // Both checks happen before any request is sent
    let request = cli.export_request()?;
    let api_key = cli.api_key()?;

    let client = NeynarClient::new(&cli.config().api, api_key)?;
    let target = cli.output_target(&request);
    let sink: Box<dyn ExportSink> = match &target {
        OutputTarget::Stdout => Box::new(StdoutSink),
        OutputTarget::File(path) => Box::new(FileSink::new(path)),
    };
    let tracker = ProgressTracker::new(request.max_pages, cli.progress_enabled());

    let mut coordinator = ExportCoordinator::new(&client, request, tracker, sink);
    let result = coordinator.execute().await?;

    if !cli.args().quiet {
        print_summary(&result, &target);
    }

    Ok(())
}

/// Print the export statistics
///
/// Goes to stderr when the document itself was written to stdout.
fn print_summary(result: &ExportResult, target: &OutputTarget) {
    let summary = format!(
        "Exported {} casts from {} page(s) to {} ({} bytes, {} ms)",
        result.records_exported,
        result.pages_fetched,
        result.destination,
        result.bytes_written,
        result.elapsed_ms
    );

    match target {
        OutputTarget::Stdout => eprintln!("{}", summary),
        OutputTarget::File(_) => println!("{}", summary),
    }
}

/// Initialize logging system based on verbosity level
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr
/// unless a log file is configured.
fn initialize_logging(cli: &CliInterface) -> Result<()> {
    let logging = &cli.config().logging;
    let level = logging.level.to_tracing_level();

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let (writer, ansi) = match &logging.file_path {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(std::io::stderr), true),
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(ansi)
        .with_writer(writer);

    if logging.timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }

    Ok(())
}
