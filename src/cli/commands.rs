use std::fs::OpenOptions;
use std::io::Write;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{ClientConfig, ConfigArgs};
use crate::controller::{SearchController, SearchOutcome, SubmitError};
use crate::history::{HISTORY_KEY, HistoryStore};
use crate::models::QueryKind;
use crate::render::TextRenderer;
use crate::render::text::format_history;
use crate::storage::FileStore;
use crate::transport::HttpTransport;
use crate::tui::run_interactive;

const DEFAULT_LOG_FILTER: &str = "episode_finder=warn";

type CliController = SearchController<HttpTransport, FileStore, TextRenderer<Box<dyn Write>>>;

#[derive(Parser)]
#[command(name = "episode-finder")]
#[command(version)]
#[command(about = "Find TV episodes from a scene description or keywords", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search by describing a scene
    Scene {
        #[arg(required = true, num_args = 1..)]
        description: Vec<String>,
    },
    /// Search by keywords
    Keywords {
        #[arg(required = true, num_args = 1..)]
        keywords: Vec<String>,
    },
    /// Show or edit recent searches
    History {
        #[command(subcommand)]
        command: Option<HistoryCommand>,
    },
    /// Start the interactive search UI
    Tui,
}

#[derive(Subcommand)]
pub enum HistoryCommand {
    /// List recent searches, most recent first
    List,
    /// Forget one search
    Remove { id: String },
    /// Forget all searches
    Clear,
    /// Run a past search again
    Rerun { id: String },
}

pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("Use --help for usage information");
        return Ok(ExitCode::SUCCESS);
    };

    let config = ClientConfig::from_args(&cli.config)?;
    init_logging(&config, matches!(command, Commands::Tui))?;

    match command {
        Commands::Scene { description } => {
            search(&config, QueryKind::Scene, &description.join(" "))
        }
        Commands::Keywords { keywords } => {
            search(&config, QueryKind::Keyword, &keywords.join(" "))
        }
        Commands::History { command } => {
            history(&config, command.unwrap_or(HistoryCommand::List))
        }
        Commands::Tui => {
            run_interactive(&config)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Log to stderr, or to the data directory while the TUI owns the terminal
fn init_logging(config: &ClientConfig, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());

    // try_init: a subscriber may already be installed (tests)
    if interactive {
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!("Failed to create data directory: {}", config.data_dir.display())
        })?;
        let log_path = config.log_path();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
    } else {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    }
    Ok(())
}

/// What a one-shot command prints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Output {
    /// Progress line on stderr, then the result
    Search,
    /// The history listing after the change
    History,
}

fn text_renderer(output: Output) -> TextRenderer<Box<dyn Write>> {
    TextRenderer::stdio()
        .with_loading(output == Output::Search)
        .with_history(output == Output::History)
}

fn open_controller(config: &ClientConfig, output: Output) -> Result<CliController> {
    let transport = HttpTransport::new(&config.server_url, config.timeout)?;
    let storage = FileStore::open(config.data_dir.clone())?;
    let history = HistoryStore::with_options(storage, HISTORY_KEY, config.history_capacity);
    let renderer = text_renderer(output);

    Ok(SearchController::new(transport, history, renderer).with_max_results(config.max_results))
}

fn exit_code(outcome: &SearchOutcome) -> ExitCode {
    match outcome {
        SearchOutcome::Found(_) => ExitCode::SUCCESS,
        SearchOutcome::Failed(_) => ExitCode::FAILURE,
    }
}

fn search(config: &ClientConfig, kind: QueryKind, query: &str) -> Result<ExitCode> {
    let mut controller = open_controller(config, Output::Search)?;
    info!(%kind, server = %config.server_url, "Running search");
    let outcome = controller.on_submit(kind, query)?;
    Ok(exit_code(&outcome))
}

fn history(config: &ClientConfig, command: HistoryCommand) -> Result<ExitCode> {
    match command {
        HistoryCommand::List => {
            let storage = FileStore::open(config.data_dir.clone())?;
            let history = HistoryStore::with_options(storage, HISTORY_KEY, config.history_capacity);
            print!("{}", format_history(history.list()));
            Ok(ExitCode::SUCCESS)
        }
        HistoryCommand::Remove { id } => {
            let mut controller = open_controller(config, Output::History)?;
            if controller.history_store().get(&id).is_none() {
                return Err(SubmitError::UnknownHistoryEntry(id).into());
            }
            controller.on_history_remove(&id);
            Ok(ExitCode::SUCCESS)
        }
        HistoryCommand::Clear => {
            let mut controller = open_controller(config, Output::History)?;
            controller.on_history_clear();
            Ok(ExitCode::SUCCESS)
        }
        HistoryCommand::Rerun { id } => {
            let mut controller = open_controller(config, Output::Search)?;
            let outcome = controller.on_history_select(&id)?;
            Ok(exit_code(&outcome))
        }
    }
}
