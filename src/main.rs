// Stepscope: step-by-step algorithm walkthroughs in the terminal

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use thiserror::Error;
use tracing::Level;

use stepscope::bridge::Session;
use stepscope::catalog::{Algorithm, CatalogInput, InputError};
use stepscope::constants::{DEFAULT_MAX_STEPS, DEFAULT_MAX_TRACE_BYTES};
use stepscope::playback::{PlaybackConfig, SystemClock};
use stepscope::trace::{contract, TraceError, TraceLimits};
use stepscope::ui::App;

/// Record an algorithm run as steps and play it back.
#[derive(Parser)]
#[command(name = "stepscope", version, about = "Step-by-step algorithm walkthroughs")]
struct Cli {
    /// Write logs to this file instead of stderr.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List the bundled algorithms.
    List,

    /// Print the trace of an algorithm run as JSON.
    Dump {
        #[command(flatten)]
        run: RunArgs,

        /// Indent the JSON output.
        #[arg(long)]
        pretty: bool,
    },

    /// Open the terminal player.
    Play {
        #[command(flatten)]
        run: RunArgs,

        /// Milliseconds between autoplay steps.
        #[arg(long, default_value_t = 500)]
        interval_ms: u64,

        /// Start over from the first step after the last one.
        #[arg(long = "loop")]
        looping: bool,
    },
}

/// Which algorithm to run, on what input.
#[derive(Args)]
struct RunArgs {
    /// Algorithm name, see `stepscope list`.
    algorithm: String,

    /// Input as JSON (default: the algorithm's sample input).
    #[arg(short, long)]
    input: Option<String>,

    /// Most steps to record, truncation notice included.
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    max_steps: usize,
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Input(#[from] InputError),

    #[error("generator produced an invalid trace: {0}")]
    Trace(#[from] TraceError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to serialize trace: {0}")]
    Json(#[from] serde_json::Error),
}

impl RunArgs {
    fn resolve(&self) -> Result<(Algorithm, CatalogInput, TraceLimits), CliError> {
        let algorithm = Algorithm::from_name(&self.algorithm)?;
        let json = self.input.as_deref().unwrap_or(algorithm.sample_input());
        let input = algorithm.parse_input(json)?;
        let limits = TraceLimits::new(self.max_steps, DEFAULT_MAX_TRACE_BYTES);
        Ok((algorithm, input, limits))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let tui = matches!(cli.command, Commands::Play { .. });
    init_logging(cli.verbose, cli.log_file.as_deref(), tui)?;

    let result = match cli.command {
        Commands::List => list(),
        Commands::Dump { run, pretty } => dump(&run, pretty),
        Commands::Play {
            run,
            interval_ms,
            looping,
        } => play(&run, Duration::from_millis(interval_ms), looping),
    };

    match result {
        Ok(()) => Ok(()),
        Err(CliError::Input(e)) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
        Err(e) => Err(e.into()),
    }
}

/// Install the fmt subscriber. The terminal player owns the screen, so its
/// logs go to `--log-file` or nowhere.
fn init_logging(verbose: u8, log_file: Option<&Path>, tui: bool) -> io::Result<()> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let builder = tracing_subscriber::fmt().with_max_level(level);

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if tui => builder.with_writer(io::sink).init(),
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn list() -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    for algorithm in Algorithm::ALL {
        writeln!(stdout, "{:<15} {}", algorithm.name(), algorithm.summary())?;
        writeln!(stdout, "{:<15} e.g. {}", "", algorithm.sample_input())?;
    }
    Ok(())
}

fn dump(run: &RunArgs, pretty: bool) -> Result<(), CliError> {
    let (algorithm, input, limits) = run.resolve()?;
    let trace = contract::verify_with_limits(&algorithm, &input, limits)?;

    let mut stdout = io::stdout().lock();
    if pretty {
        serde_json::to_writer_pretty(&mut stdout, &trace)?;
    } else {
        serde_json::to_writer(&mut stdout, &trace)?;
    }
    writeln!(stdout)?;
    Ok(())
}

fn play(run: &RunArgs, interval: Duration, looping: bool) -> Result<(), CliError> {
    let (algorithm, input, limits) = run.resolve()?;
    let config = PlaybackConfig {
        looping,
        default_interval: interval,
        ..PlaybackConfig::default()
    };
    let session = Session::with_clock(
        algorithm,
        input,
        config,
        limits,
        SystemClock::new(),
    )?;
    tracing::info!(
        algorithm = algorithm.name(),
        steps = session.controller().len(),
        "starting player"
    );

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create and run app
    let mut app = App::new(session);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}
