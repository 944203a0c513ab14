use std::{
    io::{self, BufWriter},
    process::ExitCode,
};

use anyhow::Context;
use clap::{ArgAction, Parser};
use heapperm::{
    args::{parse_values, Radix},
    sink::LineSink,
    Error,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Print every permutation of the given integers, one per line,
/// in Heap's algorithm order.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The integers to permute. Options go before the first value.
    #[arg(value_name = "VALUES", allow_hyphen_values = true)]
    values: Vec<String>,

    /// How integer prefixes are read.
    #[arg(short, long, value_enum, default_value_t = Radix::Decimal)]
    radix: Radix,

    /// Log more to stderr; repeat for more detail.
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if is_broken_pipe(&err) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let mut values = parse_values(&cli.values, cli.radix)?;
    info!(n = values.len(), radix = ?cli.radix, "parsed values");

    let stdout = io::stdout();
    let mut sink = LineSink::new(BufWriter::new(stdout.lock()));
    let written =
        heapperm::generate(&mut values, &mut sink).context("failed to write permutations")?;
    sink.finish().context("failed to flush output")?;

    info!(written, "done");
    Ok(())
}

/// `RUST_LOG` takes precedence over `-v`.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        let io_err = match cause.downcast_ref::<Error>() {
            Some(Error::Io(e)) => Some(e),
            _ => cause.downcast_ref::<io::Error>(),
        };
        io_err.is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}
