// src/main.rs
// =============================================================================
// This is the entry point of the CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Set up logging (stderr only)
// 3. Build the crawl configuration and run the crawl
// 4. Print the sorted entries, one per line or as JSON
// 5. Exit with proper code (0 = success, 2 = error)
//
// A crawl where some subdirectories couldn't be fetched is still a success:
// the listing just doesn't contain those branches. The failures show up as
// warnings on stderr.
// =============================================================================

mod cli;

use std::io::{self, BufWriter, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use dir_crawler::logging::init_logging;
use dir_crawler::{CrawlConfig, CrawlResult, Crawler, ParserKind};

#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

async fn run() -> Result<i32> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Crawl {
            url,
            max_depth,
            workers,
            verify_tls,
            timeout,
            skip_revisits,
            parser,
            json,
        } => {
            let config = CrawlConfig::new(&url)
                .with_max_depth(max_depth)
                .with_workers(workers)
                .with_accept_invalid_certs(!verify_tls)
                .with_fetch_timeout(timeout.map(Duration::from_secs))
                .with_skip_revisits(skip_revisits);

            handle_crawl(config, parser, json).await
        }
    }
}

// Handles the 'crawl' subcommand
async fn handle_crawl(config: CrawlConfig, parser: ParserKind, json: bool) -> Result<i32> {
    let crawler = Crawler::from_config(config)
        .context("invalid crawl settings")?
        .with_extractor(parser.build());

    let result = crawler.crawl().await.context("invalid crawl settings")?;
    print_results(&result, json)?;
    Ok(0)
}

// Prints the entries either as "kind path" lines or as JSON
fn print_results(result: &CrawlResult, json: bool) -> Result<()> {
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if json {
        serde_json::to_writer_pretty(&mut out, result.entries())?;
        writeln!(out)?;
    } else {
        for entry in result {
            writeln!(out, "{}", entry)?;
        }
    }

    out.flush()?;
    Ok(())
}
