//! `ubjson-inspect`: list UBJSON tokens (stdin) in bracket notation.
//!
//! Usage:
//!   ubjson-inspect [--indent N] [--max-level N] [--hide-noop]

use std::io::{self, Read, Write};

use clap::Parser;
use simpleubjson::cli::{init_tracing, inspect_to};
use simpleubjson::InspectOptions;

#[derive(Parser)]
#[command(name = "ubjson-inspect", about = "Pretty-print UBJSON tokens from stdin")]
struct Args {
    /// Spaces per nesting level.
    #[arg(long, default_value_t = 4)]
    indent: usize,
    /// Deepest nesting level to print.
    #[arg(long)]
    max_level: Option<usize>,
    /// Do not print noop markers.
    #[arg(long)]
    hide_noop: bool,
}

fn main() {
    init_tracing();
    let args = Args::parse();
    let options = InspectOptions {
        indent: " ".repeat(args.indent),
        max_level: args.max_level,
        allow_noop: !args.hide_noop,
    };

    let mut buf = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = inspect_to(&buf, &options, &mut out).and_then(|()| Ok(out.flush()?)) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
