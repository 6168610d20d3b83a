use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead, Write};

use cricket_score_scraper::{extract_score_from_url, format_console, ScraperConfig};

/// CLI arguments
#[derive(Parser, Debug)]
#[command(name = "cricket-score-cli")]
#[command(about = "Fetch live cricket scores from a Cricbuzz match page", long_about = None)]
struct Args {
    /// Cricbuzz match URL (prompted for when omitted)
    url: Option<String>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<String>,

    /// Print the result as JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logger
    let log_level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let mut config = ScraperConfig::load_or_default(args.config.as_deref())?;
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }

    let url = match args.url {
        Some(url) => url,
        None => prompt_for_url()?,
    };

    match extract_score_from_url(&config, &url).await {
        Ok(summary) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                print!("{}", format_console(&summary));
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Score lookup failed for {}: {}", url, e);
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn prompt_for_url() -> Result<String> {
    print!("Enter Cricbuzz match URL: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    let url = line.trim().to_string();
    if url.is_empty() {
        anyhow::bail!("No URL provided");
    }
    Ok(url)
}
