//! Crossword Engine - CLI
//!
//! Themed crossword generator with a TUI solver and CLI tools for generating,
//! benchmarking and reviewing analytics.

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use crossword_engine::{
    analytics::{AnalyticsSink, BackgroundSink, JsonlSink, NullSink},
    commands::{
        DEFAULT_RANKING_LIMIT, GenerateConfig, generate_crossword, progress_bar, run_benchmark,
        run_stats,
    },
    layout::LayoutConfig,
    output::{print_benchmark_result, print_generate_result, print_summary},
    wordlists::{Difficulty, EmbeddedSupplier, FileSupplier, WordSupplier},
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log file used while the TUI owns the terminal
const TUI_LOG_FILE: &str = "crossword_engine.log";

#[derive(Parser)]
#[command(
    name = "crossword_engine",
    about = "Themed crossword generator and terminal solver",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Topic to build the crossword around
    #[arg(short, long, global = true, default_value = "astronomy")]
    topic: String,

    /// Wordlist: 'embedded' (default, built-in topic packs) or path to a JSON / WORD|clue file
    #[arg(short = 'w', long, global = true, default_value = "embedded")]
    wordlist: String,

    /// Difficulty: easy, medium (default), hard
    #[arg(short, long, global = true, default_value = "medium")]
    difficulty: Difficulty,

    /// Side of the working grid before trimming
    #[arg(long, global = true, default_value_t = LayoutConfig::DEFAULT_GRID_SIZE)]
    grid_size: usize,

    /// Layout trials per crossword
    #[arg(long, global = true, default_value_t = LayoutConfig::DEFAULT_TRIALS)]
    trials: usize,

    /// Minimum answers a layout must place
    #[arg(long, global = true, default_value_t = LayoutConfig::DEFAULT_MIN_WORDS)]
    min_words: usize,

    /// Fixed base seed for reproducible layouts
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// JSON-lines analytics file, also the history blended into new crosswords (disabled when omitted)
    #[arg(long, global = true)]
    analytics: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Build one crossword and print it
    Generate {
        /// Print the answers in the grid
        #[arg(short, long)]
        solution: bool,
    },

    /// Build many layouts and report crossing statistics
    Benchmark {
        /// Number of layouts to build
        #[arg(short = 'n', long, default_value = "20")]
        count: usize,
    },

    /// Summarize the analytics file
    Stats {
        /// Entries per ranking
        #[arg(short, long, default_value_t = DEFAULT_RANKING_LIMIT)]
        limit: usize,
    },
}

impl Cli {
    fn layout_config(&self) -> LayoutConfig {
        let config = LayoutConfig::new()
            .with_grid_size(self.grid_size)
            .with_trials(self.trials)
            .with_min_words(self.min_words);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    fn generate_config(&self) -> GenerateConfig {
        let config = GenerateConfig::new(self.topic.clone())
            .with_difficulty(self.difficulty)
            .with_layout(self.layout_config());
        match &self.analytics {
            Some(path) => config.with_history(path),
            None => config,
        }
    }
}

/// Pick the supplier based on the -w flag
///
/// - "embedded": topic packs compiled into the binary
/// - "<path>": a JSON supplier payload or `WORD|clue` file
fn load_supplier(wordlist: &str) -> Arc<dyn WordSupplier> {
    match wordlist {
        "embedded" => Arc::new(EmbeddedSupplier),
        path => Arc::new(FileSupplier::new(path)),
    }
}

/// Open the analytics sink; records are written off the calling thread
fn open_sink(path: Option<&PathBuf>) -> Result<Arc<dyn AnalyticsSink>> {
    match path {
        Some(path) => {
            let sink = JsonlSink::open(path)
                .with_context(|| format!("Failed to open analytics file {}", path.display()))?;
            Ok(Arc::new(BackgroundSink::spawn(Box::new(sink))))
        }
        None => Ok(Arc::new(NullSink)),
    }
}

fn init_logging(to_file: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let installed = if to_file {
        // The TUI owns stdout, so logs go to a file
        let log_file = std::fs::File::create(TUI_LOG_FILE)
            .with_context(|| format!("Failed to create {TUI_LOG_FILE}"))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(Arc::new(log_file))
            .with_ansi(false)
            .try_init()
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
    };
    installed.map_err(|err| anyhow!("Failed to initialize logging: {err}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Default to Play mode if no command given
    let command = cli.command.as_ref().unwrap_or(&Commands::Play);
    init_logging(matches!(command, Commands::Play))?;
    info!(topic = %cli.topic, wordlist = %cli.wordlist, "starting");

    match command {
        Commands::Play => run_play_command(&cli),
        Commands::Generate { solution } => run_generate_command(&cli, *solution),
        Commands::Benchmark { count } => run_benchmark_command(&cli, *count),
        Commands::Stats { limit } => run_stats_command(&cli, *limit),
    }
}

fn run_generate_command(cli: &Cli, solution: bool) -> Result<()> {
    let supplier = load_supplier(&cli.wordlist);
    let sink = open_sink(cli.analytics.as_ref())?;
    let result = generate_crossword(supplier.as_ref(), &cli.generate_config(), sink.as_ref())?;
    print_generate_result(&result, solution);
    Ok(())
}

fn run_benchmark_command(cli: &Cli, count: usize) -> Result<()> {
    let supplier = load_supplier(&cli.wordlist);
    let words = supplier.fetch(&cli.topic, cli.difficulty)?;
    let base_seed = cli.seed.unwrap_or_else(rand::random);

    println!(
        "Building {count} layouts from {} '{}' answers ({} trials each)...",
        words.len(),
        cli.topic,
        cli.trials
    );

    let pb = progress_bar(count, true);
    let result = run_benchmark(&words, &cli.layout_config(), count, base_seed, &pb);
    print_benchmark_result(&result);
    Ok(())
}

fn run_stats_command(cli: &Cli, limit: usize) -> Result<()> {
    let path = cli
        .analytics
        .as_ref()
        .context("The stats command needs --analytics <path>")?;
    let summary = run_stats(path, limit)
        .with_context(|| format!("Failed to read analytics file {}", path.display()))?;
    print_summary(&summary);
    Ok(())
}

fn run_play_command(cli: &Cli) -> Result<()> {
    use crossword_engine::interactive::{App, run_tui};

    let app = App::new(
        load_supplier(&cli.wordlist),
        open_sink(cli.analytics.as_ref())?,
        cli.generate_config(),
    );
    run_tui(app)
}
