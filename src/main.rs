use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use promptsmith::clipboard::{Clipboard, CommandClipboard};
use promptsmith::storage::{FileSystemStorage, MemoryStorage, PromptStorage, DEFAULT_SLOT};
use promptsmith::{render, repl};
use promptsmith::{Catalog, DelayWindow, Generator, PromptId, PromptStore, Session, SystemClock};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the saved-prompts file
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Name of the saved-prompts slot (file stem inside the data directory)
    #[arg(long, default_value = DEFAULT_SLOT)]
    slot: String,

    /// Keep saved prompts in memory only
    #[arg(long)]
    ephemeral: bool,

    /// JSON file with a custom template catalog
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Lower bound of the simulated generation delay
    #[arg(long, default_value_t = 1500)]
    min_delay_ms: u64,

    /// Upper bound of the simulated generation delay
    #[arg(long, default_value_t = 2500)]
    max_delay_ms: u64,

    /// Skip the simulated generation delay
    #[arg(long)]
    no_delay: bool,

    /// Seed for template selection, for repeatable output
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a prompt for a topic
    Generate {
        /// What the prompt should be about
        #[arg(required = true, num_args = 1..)]
        topic: Vec<String>,

        /// Save the generated prompt
        #[arg(long)]
        save: bool,

        /// Copy the generated prompt to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Show saved prompts, newest first
    List,
    /// Delete a saved prompt by id
    Delete { id: PromptId },
    /// Show template categories in matching order
    Categories,
    /// Interactive session (the default)
    Interactive,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Use `RUST_LOG=info` (or debug, trace, etc.) to control log level
    // Example: RUST_LOG=promptsmith=debug cargo run -- generate cats
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Cli::parse();
    tracing::info!(args = ?args, "Starting promptsmith");

    let catalog = match &args.catalog {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using custom catalog");
            Catalog::from_file(path)
                .await
                .with_context(|| format!("Failed to load catalog from {}", path.display()))?
        }
        None => Catalog::builtin(),
    };

    // Initialize storage based on args
    let storage: Arc<dyn PromptStorage> = if args.ephemeral {
        tracing::info!("Using in-memory storage");
        Arc::new(MemoryStorage::new())
    } else {
        tracing::info!(path = %args.data_dir.display(), slot = %args.slot, "Using filesystem storage");
        Arc::new(FileSystemStorage::new(&args.data_dir, args.slot.clone()))
    };

    let delay = if args.no_delay {
        DelayWindow::NONE
    } else {
        DelayWindow::from_millis(args.min_delay_ms, args.max_delay_ms)
    };

    let store = PromptStore::load(storage, Arc::new(SystemClock)).await;
    if let Some(e) = store.load_error() {
        eprintln!("Warning: {}", e);
        eprintln!("Starting with an empty list; saving will replace the unreadable file.");
    }
    let generator = Generator::with_seed(Arc::new(catalog), delay, args.seed);
    let clipboard = CommandClipboard::detect().map(|c| Arc::new(c) as Arc<dyn Clipboard>);
    let mut session = Session::new(generator, store, clipboard);

    match args.command.unwrap_or(Command::Interactive) {
        Command::Generate { topic, save, copy } => {
            eprintln!("Generating...");
            let generation = session.generate(&topic.join(" ")).await?;
            print!("{}", render::generation(generation)?);
            if copy {
                match session.copy_current().await {
                    Ok(()) => eprintln!("Prompt copied to clipboard!"),
                    Err(e) => eprintln!("{}", e),
                }
            }
            if save {
                let saved = session.save_current().await?;
                eprintln!("Prompt saved (id {}).", saved.id);
            }
        }
        Command::List => print!("{}", render::saved_list(session.saved())?),
        Command::Delete { id } => {
            let found = session.store().get(&id).is_some();
            session.delete(&id).await?;
            if found {
                eprintln!("Deleted {}.", id);
            } else {
                eprintln!("No saved prompt with id {}.", id);
            }
        }
        Command::Categories => print!("{}", render::categories(session.generator().catalog())?),
        Command::Interactive => repl::run(&mut session).await?,
    }
    Ok(())
}
