use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{value_parser, Arg, Command};
use tracing::error;

use eventtap::error::{EXIT_OK, EXIT_OUTPUT};
use eventtap::{logging, Error, Mask, DEFAULT_ENDPOINT};

fn cli() -> Command {
    Command::new("subscriber")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Prints timestamped values streamed by a local event producer")
        .arg(Arg::new("ENDPOINT")
             .index(1)
             .default_value(DEFAULT_ENDPOINT)
             .value_parser(value_parser!(PathBuf))
             .help("Path of the producer's Unix stream socket"))
        .arg(Arg::new("MASK")
             .index(2)
             .default_value("0xffffffffffffffff")
             .value_parser(|s: &str| s.parse::<Mask>())
             .help("Channel mask: decimal, 0x hex, 0o octal or 0b binary"))
}

fn fatal(err: Error) -> i32 {
    error!("fatal: {err}");
    err.exit_code()
}

fn run(endpoint: &Path, mask: Mask) -> i32 {
    let subscription = match eventtap::connect(endpoint, mask) {
        Ok(s) => s,
        Err(e) => return fatal(e),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for record in subscription.into_records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => return fatal(e),
        };
        if let Err(e) = writeln!(out, "{}", record) {
            if e.kind() == io::ErrorKind::BrokenPipe {
                // Whoever was reading our output has gone away.
                return EXIT_OK;
            }
            error!("fatal: failed to write to stdout: {e}");
            return EXIT_OUTPUT;
        }
    }
    EXIT_OK
}

pub fn main() {
    logging::init();

    let matches = cli().get_matches();
    let endpoint = matches
        .get_one::<PathBuf>("ENDPOINT")
        .cloned()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_ENDPOINT));
    let mask = matches.get_one::<Mask>("MASK").copied().unwrap_or_default();

    process::exit(run(&endpoint, mask));
}
