//! Regent -- a Queen controller for the Code Royale site-capture game.
//!
//! Reads the site list and then one state snapshot per turn from stdin,
//! and answers each turn with two lines on stdout. Diagnostics go to
//! stderr.
//!
//! Usage:
//!   regent [OPTIONS]
//!
//! Options:
//!   --config FILE   JSON file overriding policy parameters
//!   --verbose, -v   Log each turn's reasoning at debug level
//!   --help, -h      Print this message

use std::env;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process;

use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use regent::config::Config;
use regent::engine::Engine;
use regent::protocol::InputReader;

fn print_usage() {
    eprintln!("Usage: regent [--config FILE] [--verbose]");
}

/// Command-line options.
#[derive(Default)]
struct Options {
    config_path: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().collect();
    let mut options = Options::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                match args.get(i) {
                    Some(path) => options.config_path = Some(PathBuf::from(path)),
                    None => {
                        eprintln!("--config needs a file path");
                        print_usage();
                        process::exit(1);
                    }
                }
            }
            "--verbose" | "-v" => {
                options.verbose = true;
            }
            "--help" | "-h" => {
                print_usage();
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }
    options
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_ansi(false),
        )
        .with(filter)
        .init();
}

fn main() {
    let options = parse_args();
    init_logging(options.verbose);

    let config = match &options.config_path {
        Some(path) => match Config::load(path) {
            Ok(c) => c,
            Err(e) => {
                error!("{}", e);
                process::exit(1);
            }
        },
        None => Config::default(),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = InputReader::new(stdin.lock());
    let mut out = BufWriter::new(stdout.lock());
    let mut engine = Engine::new(config);

    let layouts = match input.read_startup() {
        Ok(l) => l,
        Err(e) => {
            error!("bad site list: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = engine.start(&layouts) {
        error!("{}", e);
        process::exit(1);
    }

    loop {
        let turn = match input.read_turn(layouts.len()) {
            Ok(Some(t)) => t,
            Ok(None) => break,
            Err(e) => {
                error!(turn = engine.turn() + 1, "bad turn input: {}", e);
                process::exit(1);
            }
        };
        if let Err(e) = engine.handle_turn(turn, &mut out) {
            error!(turn = engine.turn(), "{}", e);
            process::exit(1);
        }
    }

    info!(turns = engine.turn(), "input closed");
}
