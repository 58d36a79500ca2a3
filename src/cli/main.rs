use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dirgrep::core::telemetry::logging::init_logging;
use dirgrep::{SearchEngine, SearchEngineConfig, SearchEvent, SearchRequest, SessionStatus};

/// Find every occurrence of a literal string in the files under a directory.
#[derive(Debug, Parser)]
#[command(name = "dirgrep", version)]
struct Args {
    /// Directory to search recursively.
    directory: String,
    /// Text to search for (matched literally, case-sensitive).
    query: String,
    /// Report paths relative to this directory instead of the search root.
    #[arg(long)]
    base: Option<PathBuf>,
    /// Follow symbolic links while walking.
    #[arg(long)]
    follow_links: bool,
    /// Skip files larger than this many bytes.
    #[arg(long)]
    max_file_size: Option<u64>,
    /// Print one JSON object per event instead of `path: line:column`.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let config = SearchEngineConfig::default()
        .with_follow_links(args.follow_links)
        .with_max_file_size(args.max_file_size);
    let (engine, mut events) = SearchEngine::new(tokio::runtime::Handle::current(), config);

    let mut request = SearchRequest::new(args.directory.trim(), args.query);
    if let Some(base) = args.base {
        request = request.with_base_dir(base);
    }
    if let Err(err) = engine.start(request) {
        if err.is_invalid_request() {
            eprintln!("dirgrep: {err}");
            std::process::exit(2);
        }
        return Err(err).context("cannot start search");
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut status = SessionStatus::Running;
    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                if args.json {
                    println!("{}", serde_json::to_string(&event)?);
                }
                match event {
                    SearchEvent::Match { location, .. } if !args.json => println!("{location}"),
                    SearchEvent::Finished { status: finished, stats, .. } => {
                        status = finished;
                        tracing::debug!("Finished with {:?}", stats);
                        break;
                    }
                    _ => {}
                }
            }
            _ = &mut ctrl_c, if status == SessionStatus::Running => {
                engine.cancel();
                status = SessionStatus::Cancelled;
            }
        }
    }

    if status == SessionStatus::Cancelled {
        eprintln!("search cancelled");
        std::process::exit(130);
    }
    Ok(())
}
