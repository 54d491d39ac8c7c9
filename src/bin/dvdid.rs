// Copyright 2026 The dvdid Project Developers. Licensed under MIT or Apache-2.0.

//! Prints the 64-bit disc identifier for a DVD-Video folder.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "dvdid",
    version,
    about = "Compute the Windows Media Center compatible 64-bit identifier for a DVD-Video folder"
)]
struct Cli {
    /// Path to the disc root (the directory containing VIDEO_TS)
    path: PathBuf,

    /// Also print the high and low 32-bit halves
    #[arg(long)]
    split: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match dvdid::compute(&cli.path) {
        Ok(id) => {
            println!("{id}");
            if cli.split {
                println!("high: {}", id.high_bytes());
                println!("low:  {}", id.low_bytes());
            }
            ExitCode::from(0)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}
