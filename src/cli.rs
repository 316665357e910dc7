// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API: the CLI structure is described by the structs and
// enums below, and clap generates the parsing, --help and --version for us.
// =============================================================================

use clap::{Parser, Subcommand};

use dir_crawler::config::{DEFAULT_MAX_DEPTH, DEFAULT_WORKERS};
use dir_crawler::ParserKind;

#[derive(Parser, Debug)]
#[command(
    name = "dir-crawler",
    version,
    about = "Crawl HTTP directory listings and print every file and directory found",
    long_about = "dir-crawler walks Apache/nginx \"Index of /\" pages breadth-first, \
                  fetching many listings concurrently, and prints a sorted tree of \
                  everything it found. Unreachable subdirectories are skipped."
)]
pub struct Cli {
    /// Log progress and per-page details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Crawl a directory listing
    ///
    /// Example: dir-crawler crawl -d 3 https://mirror.local/logs/run-42/
    Crawl {
        /// Root listing URL (a trailing '/' is added if missing)
        url: String,

        /// How many directory levels to expand (0 prints nothing)
        #[arg(short = 'd', long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Maximum number of listings fetched at the same time
        #[arg(short = 'w', long, default_value_t = DEFAULT_WORKERS)]
        workers: usize,

        /// Verify TLS certificates and hostnames
        ///
        /// Off by default: the mirrors this targets use self-signed
        /// certificates. Without this flag every fetch is open to
        /// man-in-the-middle tampering.
        #[arg(long)]
        verify_tls: bool,

        /// Give up on a single listing after this many seconds
        ///
        /// Without it a server that never answers stalls the crawl.
        #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Expand each directory URL at most once (protects against looping listings)
        #[arg(long)]
        skip_revisits: bool,

        /// Link extractor to use
        #[arg(long, value_enum, default_value_t = ParserKind::Anchor)]
        parser: ParserKind,

        /// Output entries as JSON instead of "d|f path" lines
        #[arg(long)]
        json: bool,
    },
}
