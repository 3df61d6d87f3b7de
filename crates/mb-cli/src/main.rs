//! Headless mediaboard client.
//!
//! Wires the HTTP adapters to the import use cases so a server can be fed
//! from the command line: stream a server-side path import, upload local
//! files, or complete a tag prefix.

mod console;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use mb_app::{
    grid::shared_grid, CompleteTagUseCase, ImportOrchestrator, NavigationController, SharedGrid,
};
use mb_client::{HttpApi, Url};
use mb_core::ports::{PathImportRequest, UploadFile};
use mb_core::NavCommand;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::EnvFilter;

use console::{ConsoleUi, ConsoleView};

#[derive(Parser)]
#[command(name = "mediaboard", about = "Headless client for a mediaboard server")]
struct Opts {
    /// Server base URL.
    #[arg(long, default_value = "http://localhost:8010/")]
    server: Url,

    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[arg(short, long, action = ArgAction::Count)]
    quiet: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Import files from a filesystem path on the server, watching the live
    /// progress stream.
    Import {
        /// Path on the server to import from.
        path: String,
        /// Delete source files after import.
        #[arg(long)]
        delete: bool,
        /// Fetch tags for imported files from external sources.
        #[arg(long)]
        fetch_tags: bool,
        /// Store original file names as tags.
        #[arg(long)]
        store_name: bool,
        /// Tags to attach to every imported file.
        #[arg(long, default_value = "")]
        tags: String,
        /// Skip the confirmation prompt.
        #[arg(short = 'y', long)]
        yes: bool,
        /// Column count of the printed grid preview.
        #[arg(long, default_value_t = 6)]
        columns: usize,
    },
    /// Upload local files, one request per file, in the given order.
    Upload {
        files: Vec<PathBuf>,
        #[arg(long, default_value_t = 6)]
        columns: usize,
    },
    /// Complete the last tag of a search string.
    CompleteTag { input: String },
}

fn init_tracing(verbosity: i16) {
    // Map -q/-v to tracing levels; default WARN.
    let level = match verbosity {
        i16::MIN..=-1 => Level::ERROR,
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let env_filter = EnvFilter::from_default_env().add_directive(level.into());
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .finish();

    // Ignore the error if a subscriber is already set.
    let _ = set_global_default(subscriber);
}

#[tokio::main]
async fn main() {
    let opts = Opts::parse();
    init_tracing(opts.verbose as i16 - opts.quiet as i16);
    if let Err(err) = run(opts).await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run(opts: Opts) -> Result<()> {
    let api = Arc::new(HttpApi::new(opts.server));
    let grid = shared_grid();

    match opts.command {
        Command::Import {
            path,
            delete,
            fetch_tags,
            store_name,
            tags,
            yes,
            columns,
        } => {
            let orchestrator = ImportOrchestrator::new(
                api.clone(),
                api.clone(),
                api,
                Arc::new(ConsoleUi::new(yes)),
                grid.clone(),
            );
            let request = PathImportRequest {
                path,
                delete_source: delete,
                fetch_tags,
                store_name,
                tags,
            };
            let outcome = orchestrator.import_path(&request).await?;
            eprintln!();
            println!("{outcome:?}");
            walk_grid(&grid, columns).await?;
        }
        Command::Upload { files, columns } => {
            let mut batch = Vec::with_capacity(files.len());
            for path in files {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .context("file path has no file name")?;
                let bytes = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("read {}", path.display()))?;
                batch.push(UploadFile {
                    name,
                    bytes: bytes.into(),
                });
            }

            let orchestrator = ImportOrchestrator::new(
                api.clone(),
                api.clone(),
                api,
                Arc::new(ConsoleUi::new(true)),
                grid.clone(),
            );
            let summary = orchestrator.upload_batch(&batch).await?;
            eprintln!();
            println!(
                "uploaded {} of {} files ({} failed)",
                summary.appended, summary.total, summary.failed
            );
            walk_grid(&grid, columns).await?;
        }
        Command::CompleteTag { input } => {
            let usecase = CompleteTagUseCase::new(api);
            for suggestion in usecase.execute(&input).await? {
                println!("{suggestion}");
            }
        }
    }

    Ok(())
}

/// Walk the grid the way the arrow keys would: `Home`, then `Right` until the
/// highlight stops moving. One visited entry per line, with the served file
/// path when the media type is known.
async fn walk_grid(grid: &SharedGrid, columns: usize) -> Result<()> {
    let nav = NavigationController::new(grid.clone(), Arc::new(ConsoleView));
    nav.handle(NavCommand::Home, columns).await?;

    let mut last_id = None;
    loop {
        let visited = {
            let grid = grid.lock().await;
            grid.highlighted().map(|e| (e.id.clone(), e.source_name()))
        };
        let Some((id, source)) = visited else {
            break;
        };
        if last_id.as_ref() == Some(&id) {
            break;
        }
        match source {
            Some(name) => println!("{id}  files/{name}"),
            None => println!("{id}"),
        }
        last_id = Some(id);
        nav.handle(NavCommand::Right, columns).await?;
    }
    Ok(())
}
