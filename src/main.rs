mod classify;
mod config;
mod error;
mod explode;
mod fetcher;
mod keywords;
mod listing;
mod normalize;
mod output;
mod pipeline;
mod timefmt;
mod types;
mod validate;

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::Result;
use crate::timefmt::ClockStyle;

#[derive(Parser)]
#[command(name = "sheets")]
/// Fetch Polymarket Gamma listings and flatten them into spreadsheet rows
struct Args {
    /// Category to fetch (server-side tag filter when resolvable, keyword
    /// fallback otherwise)
    #[arg(long, short)]
    category: Option<String>,

    /// Markets to request, clamped to the configured bounds
    #[arg(long, short)]
    limit: Option<usize>,

    /// Output layout
    #[arg(long, value_enum, default_value = "structured")]
    layout: Layout,

    /// 12-hour clock with AM/PM instead of zero-padded 24-hour times
    #[arg(long)]
    ampm: bool,

    /// Write CSV to this path instead of stdout
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// JSON file replacing the built-in keyword table
    #[arg(long)]
    keywords: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Layout {
    /// One row per outcome-side with category and schedule columns
    Structured,
    /// One descriptive row per market
    Original,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let mut cfg = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {e}");
            std::process::exit(1);
        }
    };
    // CLI flags override the environment.
    if let Some(limit) = args.limit {
        cfg.fetch_limit = limit;
    }
    if args.category.is_some() {
        cfg.category_filter = args.category.clone();
    }
    if let Some(path) = &args.keywords {
        cfg.keywords_file = Some(path.display().to_string());
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&cfg.log_level))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cfg, &args).await {
        error!("Fatal error: {e}");
        std::process::exit(1);
    }
}

async fn run(cfg: &Config, args: &Args) -> Result<()> {
    let table = match cfg.keywords_file.as_deref() {
        Some(path) => {
            let table = keywords::load_table(Path::new(path))?;
            info!(path, categories = table.len(), "loaded keyword table");
            table
        }
        None => keywords::default_table(),
    };

    let style = if args.ampm {
        ClockStyle::TwelveHour
    } else {
        ClockStyle::TwentyFourHour
    };

    let report = pipeline::run(cfg, &table, style).await?;

    // Empty results are outcomes, not errors; say which one happened.
    if report.fetched == 0 {
        eprintln!("Gamma returned no markets — try a higher limit or a different category.");
    } else if report.valid == 0 {
        eprintln!(
            "None of the {} fetched markets are currently tradeable (closed, archived, or expired).",
            report.fetched,
        );
    } else if report.rows.is_empty() {
        eprintln!(
            "{} tradeable markets produced no rows (all off-category or without outcomes).",
            report.valid,
        );
    }

    let out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(std::fs::File::create(path)?),
        None => Box::new(std::io::stdout()),
    };
    match args.layout {
        Layout::Structured => output::write_structured(&report.rows, out)?,
        Layout::Original => output::write_original(&report.classified, out)?,
    }

    if let Some(path) = &args.output {
        info!(rows = report.rows.len(), path = %path.display(), "wrote output");
    }

    Ok(())
}
