//! `ubjson-unpack`: decode UBJSON (stdin) to JSON (stdout).
//!
//! Usage:
//!   ubjson-unpack

use std::io::{self, Read, Write};

use clap::Parser;
use simpleubjson::cli::{init_tracing, unpack};

#[derive(Parser)]
#[command(name = "ubjson-unpack", about = "Decode UBJSON from stdin as pretty JSON on stdout")]
struct Args {}

fn main() {
    init_tracing();
    let _args = Args::parse();

    let mut buf = Vec::new();
    if let Err(e) = io::stdin().read_to_end(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match unpack(&buf) {
        Ok(json) => {
            if let Err(e) = writeln!(io::stdout(), "{json}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
