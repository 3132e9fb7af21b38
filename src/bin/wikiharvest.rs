//! wikiharvest CLI: fetch a batch of Wikipedia articles (by title file or
//! random enumeration), clean each one, and export the records as JSON.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::{mpsc, Semaphore};
use tracing::{info, warn};

use wikiharvest::{
    schema, ArticleCleaner, ArticleRecord, ArticleSerializer, Fetcher, FetcherConfig, Options,
};

#[derive(Parser)]
#[command(
    name = "wikiharvest",
    version,
    about = "Harvest, clean, and export Wikipedia articles as JSON"
)]
#[command(group(
    clap::ArgGroup::new("source").required(true).multiple(true).args(["num_pages", "titles"])
))]
struct Cli {
    /// Number of random pages to scrape (ignored when --titles is given)
    #[arg(short = 'n', long = "num-pages")]
    num_pages: Option<usize>,

    /// Path to a text file with newline-separated page titles
    #[arg(short = 't', long = "titles")]
    titles: Option<PathBuf>,

    /// Destination JSON file
    #[arg(short = 'o', long = "output", default_value = "output.json")]
    output: PathBuf,

    /// Path to a custom JSON schema template
    #[arg(short = 's', long = "schema")]
    schema: Option<PathBuf>,

    /// Include image URLs, alt text, and captions in the output
    #[arg(long)]
    keep_images: bool,

    /// Include structured data extracted from the page's infobox
    #[arg(long)]
    keep_infobox: bool,

    /// Max concurrent page workers
    #[arg(short = 'w', long = "max-workers", default_value_t = 8)]
    max_workers: usize,

    /// Enable verbose (debug) logging
    #[arg(short, long)]
    verbose: bool,

    /// Only log errors and hide the progress bar
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

struct PageOutcome {
    title: String,
    result: Result<ArticleRecord, String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let started = Instant::now();

    let output_schema = schema::effective_schema(
        cli.schema.as_deref(),
        cli.keep_images,
        cli.keep_infobox,
    )
    .context("failed to load output schema")?;
    let serializer = ArticleSerializer::new(output_schema);

    let titles = resolve_titles(&cli).await?;
    if titles.is_empty() {
        bail!("no page titles to process");
    }
    info!(
        pages = titles.len(),
        workers = cli.max_workers,
        "starting harvest"
    );

    let options = Options {
        keep_images: cli.keep_images,
        keep_infobox: cli.keep_infobox,
    };
    let fetcher = Arc::new(Fetcher::new(FetcherConfig::default())?);
    let semaphore = Arc::new(Semaphore::new(cli.max_workers.max(1)));
    let (tx, mut rx) = mpsc::channel::<PageOutcome>(cli.max_workers.max(1) * 2);

    for title in &titles {
        let title = title.clone();
        let fetcher = Arc::clone(&fetcher);
        let semaphore = Arc::clone(&semaphore);
        let tx = tx.clone();
        tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire().await else {
                return;
            };
            let outcome = process_page(&fetcher, options, &title).await;
            let _ = tx
                .send(PageOutcome {
                    title,
                    result: outcome,
                })
                .await;
        });
    }
    // Workers hold the only remaining senders; rx closes when they finish.
    drop(tx);

    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(titles.len() as u64)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec}, eta {eta})")?
            .progress_chars("=> "),
    );

    let mut records: Vec<ArticleRecord> = Vec::new();
    let mut failures: Vec<(String, String)> = Vec::new();
    while let Some(outcome) = rx.recv().await {
        match outcome.result {
            Ok(record) => records.push(record),
            Err(message) => {
                warn!(title = %outcome.title, "page failed: {message}");
                failures.push((outcome.title, message));
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    serializer
        .write_articles(&records, &cli.output)
        .with_context(|| format!("failed to write {}", cli.output.display()))?;

    if !cli.quiet {
        println!(
            "Processed {} pages in {:.1}s: {} ok, {} failed.",
            titles.len(),
            started.elapsed().as_secs_f64(),
            records.len(),
            failures.len()
        );
        println!("Wrote {} articles to {}", records.len(), cli.output.display());
        if !failures.is_empty() {
            println!("\nFailed pages (showing up to 10 of {}):", failures.len());
            for (title, message) in failures.iter().take(10) {
                println!("  {title}: {message}");
            }
        }
    }

    Ok(())
}

/// One full page task: fetch, clean, and stamp the canonical URL.
async fn process_page(
    fetcher: &Fetcher,
    options: Options,
    title: &str,
) -> Result<ArticleRecord, String> {
    let html = fetcher
        .fetch_page_html(title)
        .await
        .map_err(|err| err.to_string())?;
    if html.trim().is_empty() {
        return Err("received empty page body".to_string());
    }

    let cleaner = ArticleCleaner::new(options);
    let mut record = cleaner.clean(&html, title);
    record.url = Fetcher::page_url(&record.title);
    Ok(record)
}

/// Titles from the given file, or a fresh batch of random titles.
async fn resolve_titles(cli: &Cli) -> anyhow::Result<Vec<String>> {
    if let Some(path) = &cli.titles {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read titles file {}", path.display()))?;
        let titles: Vec<String> = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        if titles.is_empty() {
            bail!("titles file {} contains no titles", path.display());
        }
        if let Some(n) = cli.num_pages {
            if n != titles.len() {
                warn!(
                    requested = n,
                    loaded = titles.len(),
                    "--num-pages ignored; using all titles from file"
                );
            }
        }
        info!(count = titles.len(), path = %path.display(), "loaded titles from file");
        return Ok(titles);
    }

    let count = cli
        .num_pages
        .expect("clap group guarantees --num-pages or --titles");
    let api_fetcher = Fetcher::new(FetcherConfig::api_defaults())?;
    let titles = api_fetcher.random_titles(count).await?;
    if titles.is_empty() {
        bail!("failed to fetch any random page titles");
    }
    Ok(titles)
}
