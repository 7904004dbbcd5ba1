//! OxiHuff CLI - static Huffman compression
//!
//! Compresses single files with a per-file optimal prefix code and a
//! self-describing tree header.

mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use commands::{cmd_compress, cmd_decompress, cmd_info};
use log::LevelFilter;
use oxihuff_codec::HeaderMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust Huffman compressor")]
#[command(long_about = "
OxiHuff compresses one file at a time with static Huffman coding.
The code tree is stored at the start of the output.

Examples:
  oxihuff compress notes.txt
  oxihuff compress notes.txt -o notes.huff
  oxihuff decompress notes.txt.hf
  oxihuff info notes.txt.hf --json
")]
struct Cli {
    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (default: <INPUT>.hf)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Header layout
        #[arg(long, value_enum, default_value = "tree")]
        header: HeaderArg,
    },

    /// Decompress a file
    #[command(alias = "d")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output file (default: <INPUT> without .hf, or <INPUT>.out)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the header of a compressed file
    #[command(alias = "i")]
    Info {
        /// Compressed file to inspect
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },
}

/// Header layout selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum HeaderArg {
    /// Pre-order serialized tree
    Tree,
    /// Frequency counts (not supported)
    Counts,
}

impl From<HeaderArg> for HeaderMode {
    fn from(arg: HeaderArg) -> Self {
        match arg {
            HeaderArg::Tree => HeaderMode::Tree,
            HeaderArg::Counts => HeaderMode::Counts,
        }
    }
}

fn log_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log_level(verbose, quiet));
    // RUST_LOG, when set, takes precedence
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.format_timestamp(None).init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            header,
        } => cmd_compress(&input, output.as_deref(), header.into(), cli.quiet),
        Commands::Decompress { input, output } => {
            cmd_decompress(&input, output.as_deref(), cli.quiet)
        }
        Commands::Info { input, json } => cmd_info(&input, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
