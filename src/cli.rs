//! CLI definition, dispatch and the interactive game loop.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::adapters::alpha_vantage_adapter::AlphaVantageAdapter;
use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::terminal_adapter::{TerminalAdapter, format_date};
use crate::domain::config_validation::{
    DEFAULT_RESET_DELAY_MS, validate_config, validate_game_config, validate_provider_config,
};
use crate::domain::error::GameError;
use crate::domain::price::Direction;
use crate::domain::session::GameSession;
use crate::ports::config_port::ConfigPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::presentation_port::PresentationPort;

const DEFAULT_LOG_LEVEL: &str = "warn";

const HELP: &str = "\
Commands:
  <SYMBOL>, start <SYMBOL>, new <SYMBOL>   start a game
  up, u / down, d                          predict the next close
  end                                      end the current game
  help                                     show this help
  quit, q                                  leave";

#[derive(Parser, Debug)]
#[command(
    name = "stockguess",
    about = "Guess whether a stock's next daily close goes up or down"
)]
pub struct Cli {
    /// Log filter, e.g. `debug` or `stockguess=trace`
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively
    Play {
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Start a game for this symbol right away
        #[arg(long)]
        symbol: Option<String>,
        /// Play offline from `<DIR>/<SYMBOL>.csv`
        #[arg(long)]
        csv_dir: Option<PathBuf>,
        /// Mirror the chart to an SVG file
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Show the close history range for a symbol
    Info {
        #[arg(long)]
        symbol: String,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        csv_dir: Option<PathBuf>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let log_level = cli.log_level;
    match cli.command {
        Command::Play {
            config,
            symbol,
            csv_dir,
            chart,
        } => run_play(
            config.as_ref(),
            symbol.as_deref(),
            csv_dir,
            chart,
            log_level.as_deref(),
        ),
        Command::Info {
            symbol,
            config,
            csv_dir,
        } => run_info(&symbol, config.as_ref(), csv_dir, log_level.as_deref()),
        Command::Validate { config } => run_validate(&config, log_level.as_deref()),
    }
}

pub fn load_config(path: Option<&PathBuf>) -> Result<FileConfigAdapter, ExitCode> {
    let Some(path) = path else {
        return FileConfigAdapter::from_string("").map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::from(2)
        });
    };
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = GameError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

/// Installs the stderr subscriber; `--log-level` wins over `[logging] level`.
pub fn init_logging(cli_level: Option<&str>, config: &dyn ConfigPort) {
    let level = cli_level
        .map(str::to_string)
        .or_else(|| config.get_string("logging", "level"))
        .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string());
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Picks the CSV source when a directory is given (flag first, then
/// `[game] csv_dir`), otherwise the HTTP provider.
pub fn build_data_port(
    config: &dyn ConfigPort,
    csv_dir: Option<PathBuf>,
) -> Result<Box<dyn MarketDataPort>, GameError> {
    let csv_dir = csv_dir.or_else(|| config.get_string("game", "csv_dir").map(PathBuf::from));
    match csv_dir {
        Some(dir) => {
            debug!(dir = %dir.display(), "using csv data source");
            Ok(Box::new(CsvAdapter::new(dir)))
        }
        None => {
            validate_provider_config(config)?;
            Ok(Box::new(AlphaVantageAdapter::from_config(config)?))
        }
    }
}

pub fn reset_delay(config: &dyn ConfigPort) -> Duration {
    let ms = config.get_int("game", "reset_delay_ms", DEFAULT_RESET_DELAY_MS);
    Duration::from_millis(ms.max(0) as u64)
}

fn run_play(
    config_path: Option<&PathBuf>,
    symbol: Option<&str>,
    csv_dir: Option<PathBuf>,
    chart: Option<PathBuf>,
    log_level: Option<&str>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    init_logging(log_level, &config);

    if let Err(e) = validate_game_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let data_port = match build_data_port(&config, csv_dir) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let chart_path = chart.or_else(|| config.get_string("game", "chart_path").map(PathBuf::from));
    let presenter = TerminalAdapter::stdout(chart_path);
    let mut session = GameSession::new(data_port, presenter, StdRng::from_entropy());

    let initial_symbol = symbol
        .map(str::to_string)
        .or_else(|| config.get_string("game", "symbol"));

    eprintln!("Enter a ticker symbol to start. Type `help` for commands.");
    let stdin = io::stdin();
    match run_game_loop(
        &mut session,
        initial_symbol.as_deref(),
        stdin.lock(),
        || Local::now().date_naive(),
        reset_delay(&config),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoopCommand {
    Start(String),
    Predict(Direction),
    End,
    Help,
    Quit,
    Unknown(String),
}

/// Parses one input line; `None` for a blank line.
pub fn parse_command(line: &str) -> Option<LoopCommand> {
    let mut words = line.split_whitespace();
    let first = words.next()?;
    let rest: Vec<&str> = words.collect();

    let command = match (first.to_lowercase().as_str(), rest.as_slice()) {
        ("start" | "new", [symbol]) => LoopCommand::Start(symbol.to_string()),
        ("end", []) => LoopCommand::End,
        ("help" | "?", []) => LoopCommand::Help,
        ("quit" | "q" | "exit", []) => LoopCommand::Quit,
        (word, []) => match Direction::parse(word) {
            Some(direction) => LoopCommand::Predict(direction),
            None if is_symbol(first) => LoopCommand::Start(first.to_string()),
            None => LoopCommand::Unknown(line.trim().to_string()),
        },
        _ => LoopCommand::Unknown(line.trim().to_string()),
    };
    Some(command)
}

fn is_symbol(word: &str) -> bool {
    word.len() <= 10
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

/// Reads commands until `quit` or end of input.
///
/// Failures of individual commands are already shown through the presenter
/// and do not stop the loop; only reading the input can fail it. A game that
/// ends is reset after `reset_delay`.
pub fn run_game_loop<D, P, R, I, T>(
    session: &mut GameSession<D, P, R>,
    initial_symbol: Option<&str>,
    input: I,
    today: T,
    reset_delay: Duration,
) -> Result<(), GameError>
where
    D: MarketDataPort,
    P: PresentationPort,
    R: rand::Rng,
    I: BufRead,
    T: Fn() -> NaiveDate,
{
    if let Some(symbol) = initial_symbol {
        start(session, symbol, today());
    }

    prompt();
    for line in input.lines() {
        let line = line?;
        let Some(command) = parse_command(&line) else {
            prompt();
            continue;
        };

        match command {
            LoopCommand::Start(symbol) => start(session, &symbol, today()),
            LoopCommand::Predict(direction) => {
                if !session.is_active() {
                    eprintln!("No active game. Enter a ticker symbol to start.");
                } else {
                    if let Err(e) = session.predict(direction) {
                        debug!(error = %e, "prediction ended the game");
                    }
                    if !session.is_active() {
                        finish(session, reset_delay);
                    }
                }
            }
            LoopCommand::End => {
                if session.is_active() {
                    session.end_game();
                    finish(session, reset_delay);
                } else {
                    eprintln!("No active game.");
                }
            }
            LoopCommand::Help => eprintln!("{HELP}"),
            LoopCommand::Quit => break,
            LoopCommand::Unknown(text) => {
                eprintln!("Unrecognized command: {text}");
                eprintln!("{HELP}");
            }
        }
        prompt();
    }
    Ok(())
}

fn start<D, P, R>(session: &mut GameSession<D, P, R>, symbol: &str, today: NaiveDate)
where
    D: MarketDataPort,
    P: PresentationPort,
    R: rand::Rng,
{
    if let Err(e) = session.start_game(symbol, today) {
        debug!(error = %e, "start failed");
    }
}

fn finish<D, P, R>(session: &mut GameSession<D, P, R>, reset_delay: Duration)
where
    D: MarketDataPort,
    P: PresentationPort,
    R: rand::Rng,
{
    if !reset_delay.is_zero() {
        thread::sleep(reset_delay);
    }
    session.reset_game();
}

fn prompt() {
    eprint!("> ");
    let _ = io::stderr().flush();
}

fn run_info(
    symbol: &str,
    config_path: Option<&PathBuf>,
    csv_dir: Option<PathBuf>,
    log_level: Option<&str>,
) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    init_logging(log_level, &config);

    let data_port = match build_data_port(&config, csv_dir) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbol = symbol.trim().to_uppercase();
    let series = match data_port.fetch_daily_series(&symbol) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    match (series.first_date(), series.last_date()) {
        (Some(first), Some(last)) => println!(
            "{}: {} closes, {} to {}",
            symbol,
            series.len(),
            format_date(first),
            format_date(last)
        ),
        _ => eprintln!("{}: no data found", symbol),
    }
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf, log_level: Option<&str>) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(Some(config_path)) {
        Ok(c) => c,
        Err(code) => return code,
    };
    init_logging(log_level, &config);

    match validate_config(&config) {
        Ok(()) => {
            eprintln!("Configuration is valid.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}
