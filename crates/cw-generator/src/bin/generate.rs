//! CLI for generating crossword clues.
//!
//! # Usage
//!
//! ```bash
//! # One-shot, printed as text
//! cargo run -p cw-generator --bin cw-generate -- --word بحر --count 5 --difficulty hard
//!
//! # One-shot, printed as JSON
//! cargo run -p cw-generator --bin cw-generate -- --word بحر --json
//!
//! # Interactive session
//! cargo run -p cw-generator --bin cw-generate
//! ```

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use cw_core::{Controller, Difficulty, Event, HintCount, Locale, RequestState};
use cw_generator::{
    parse_line, render, render_form, ClueGenerator, CommandClipboard, EnvCredentials, GeminiClient, GeminiConfig,
    Input, Session, API_KEY_ENV,
};
use tokio::io::{AsyncBufReadExt, BufReader};

/// Crossword clue generator backed by Gemini.
#[derive(Parser, Debug)]
#[command(name = "cw-generate", version, about)]
struct Args {
    /// Word to generate clues for; omit for an interactive session
    #[arg(long)]
    word: Option<String>,

    /// Number of clues (1, 3, 5 or 10)
    #[arg(long, default_value = "3")]
    count: HintCount,

    /// Difficulty: easy, medium, hard or riddle
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// Language of messages: ar or en
    #[arg(long, default_value = "ar")]
    locale: Locale,

    /// Print the one-shot result as JSON
    #[arg(long)]
    json: bool,

    /// Model name (overrides GEMINI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// API base URL (overrides GEMINI_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 60)]
    timeout_secs: u64,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut config = GeminiConfig::from_env().with_timeout(Duration::from_secs(args.timeout_secs.max(1)));
    if let Some(model) = args.model.clone() {
        config = config.with_model(model);
    }
    if let Some(base_url) = args.base_url.clone() {
        config = config.with_base_url(base_url);
    }

    let client = match GeminiClient::new(config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating client: {}", e);
            return ExitCode::FAILURE;
        }
    };
    log::info!("using model {}", client.model());

    let generator = ClueGenerator::new(Arc::new(client), Arc::new(EnvCredentials::default()));
    let controller = Controller::with_system_clock(args.locale);
    let mut session = Session::new(
        controller,
        generator,
        Arc::new(CommandClipboard::platform_default()),
    );

    session.dispatch(Event::HintCountSelected(args.count));
    session.dispatch(Event::DifficultySelected(args.difficulty));

    match args.word {
        Some(ref word) => run_once(&mut session, word, args.json).await,
        None => run_interactive(&mut session).await,
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

async fn run_once(session: &mut Session, word: &str, json: bool) -> ExitCode {
    session.dispatch(Event::WordChanged(word.to_string()));
    if !session.controller().can_submit() {
        eprintln!("Error: --word must not be empty");
        return ExitCode::FAILURE;
    }
    session.dispatch(Event::Submit);

    session.settle().await;

    match session.controller().state() {
        RequestState::Success(result) => {
            if json {
                match serde_json::to_string_pretty(result) {
                    Ok(text) => println!("{}", text),
                    Err(e) => {
                        eprintln!("Failed to encode result: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", render(session.controller()));
            }
            ExitCode::SUCCESS
        }
        RequestState::Failed(failure) => {
            eprintln!("{}", failure.message);
            if failure.kind == cw_core::ErrorKind::Configuration {
                eprintln!();
                eprintln!("Make sure {} is set:", API_KEY_ENV);
                eprintln!("  export {}=...", API_KEY_ENV);
            }
            ExitCode::FAILURE
        }
        RequestState::Idle | RequestState::Loading { .. } => ExitCode::FAILURE,
    }
}

async fn run_interactive(session: &mut Session) -> ExitCode {
    print_help();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        eprintln!("Failed to read input: {}", e);
                        return ExitCode::FAILURE;
                    }
                };

                match parse_line(&line) {
                    Ok(Input::Events(events)) => {
                        for event in events {
                            session.dispatch(event);
                        }
                        redraw(session);
                    }
                    Ok(Input::Help) => print_help(),
                    Ok(Input::Quit) => break,
                    Err(e) => eprintln!("{}", e),
                }
            }
            Some(event) = session.next_event() => {
                session.dispatch(event);
                redraw(session);
            }
        }
    }

    ExitCode::SUCCESS
}

fn redraw(session: &Session) {
    let mut stdout = std::io::stdout().lock();
    // A failed write to the terminal leaves nothing else to do.
    let _ = write!(
        stdout,
        "{}{}",
        render_form(session.controller()),
        render(session.controller())
    );
    let _ = stdout.flush();
}

fn print_help() {
    println!("Crossword Clue Generator");
    println!("========================");
    println!();
    println!("Type a word and press enter to generate clues.");
    println!();
    println!("Commands:");
    println!("  /count <1|3|5|10>                     Number of clues");
    println!("  /difficulty <easy|medium|hard|riddle> Clue difficulty");
    println!("  /copy <N>                             Copy clue N to the clipboard");
    println!("  /clear                                Clear word and results");
    println!("  /help                                 Show this help");
    println!("  /quit                                 Exit");
    println!();
}
