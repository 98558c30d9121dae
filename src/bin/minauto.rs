use std::{io::Read, path::PathBuf, process::ExitCode};

use minauto::prelude::*;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use thiserror::Error;
use tracing::{debug, error, info, trace};
use tracing_subscriber::{filter, prelude::*};

fn cli() -> clap::Command {
    Command::new("minauto")
        .about("Minimizes deterministic finite automata given as transition tables")
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .num_args(0..=1)
                .require_equals(true)
                .value_parser(["info", "debug", "trace"])
                .default_missing_value("info"),
        )
        .arg(
            Arg::new("max-states")
                .long("max-states")
                .value_parser(value_parser!(usize))
                .help("largest number of states an input automaton may have [default: 4096]"),
        )
        .arg(
            Arg::new("max-alphabet")
                .long("max-alphabet")
                .value_parser(value_parser!(usize))
                .help("largest alphabet an input automaton may have [default: 128]"),
        )
        .arg(
            Arg::new("files")
                .action(ArgAction::Append)
                .value_parser(value_parser!(PathBuf))
                .help("files containing one automaton each, standard input is read if none are given"),
        )
}

fn setup_logging(matches: &ArgMatches) {
    let level = match matches
        .try_get_one::<String>("verbosity")
        .ok()
        .flatten()
        .map(|m| m.as_str())
    {
        Some("trace") => filter::LevelFilter::TRACE,
        Some("debug") => filter::LevelFilter::DEBUG,
        Some("info") => filter::LevelFilter::INFO,
        _ => filter::LevelFilter::WARN,
    };

    let stderr_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    trace!("setup {level} logging");
}

#[derive(Debug, Error)]
enum ProcessError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Minimize(#[from] MinimizationError),
}

/// Reads, prints, minimizes and prints again the automaton in `path`, or in standard input if `path` is `None`.
fn process(path: Option<&PathBuf>, limits: &Limits) -> Result<(), ProcessError> {
    let input = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let dfa = parse_dfa(&input, limits)?;
    debug!(
        "read automaton with {} states over {} symbols",
        dfa.size(),
        dfa.alphabet_size()
    );
    println!("\n{}\n", "------- Original  DFA -------".bold());
    println!("{}", render(&dfa));

    let start = std::time::Instant::now();
    let minimized = Minimizer::new().minimize(&dfa)?;
    info!(
        "minimization into {} states took {}µs",
        minimized.dfa().size(),
        start.elapsed().as_micros()
    );
    println!("\n\n{}\n", "------- Minimized DFA -------".bold());
    println!("{}", render(minimized.dfa()));
    Ok(())
}

pub fn main() -> ExitCode {
    let matches = cli().get_matches();

    setup_logging(&matches);

    let limits = Limits::new(
        matches
            .get_one::<usize>("max-states")
            .copied()
            .unwrap_or(Limits::DEFAULT_MAX_STATES),
        matches
            .get_one::<usize>("max-alphabet")
            .copied()
            .unwrap_or(Limits::DEFAULT_MAX_ALPHABET),
    );
    debug!("using {limits:?}");

    let files: Vec<&PathBuf> = matches
        .get_many::<PathBuf>("files")
        .map(|files| files.collect())
        .unwrap_or_default();

    let mut failed = false;
    if files.is_empty() {
        if let Err(e) = process(None, &limits) {
            error!("could not process standard input: {e}");
            failed = true;
        }
    } else {
        for path in files {
            if let Err(e) = process(Some(path), &limits) {
                error!("could not process {}: {e}", path.display());
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
