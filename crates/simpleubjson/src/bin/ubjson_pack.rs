//! `ubjson-pack`: encode JSON (stdin) to UBJSON (stdout).
//!
//! Usage:
//!   ubjson-pack [--unsized]

use std::io::{self, Read, Write};

use clap::Parser;
use simpleubjson::cli::{init_tracing, pack};

#[derive(Parser)]
#[command(name = "ubjson-pack", about = "Encode JSON from stdin as UBJSON on stdout")]
struct Args {
    /// Write a top-level array as an unsized (end-marker terminated) array.
    #[arg(long = "unsized")]
    unsized_root: bool,
}

fn main() {
    init_tracing();
    let args = Args::parse();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = pack(buf.trim(), args.unsized_root, &mut out).and_then(|()| Ok(out.flush()?)) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
