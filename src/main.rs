//! Spotlight gallery scraper CLI
//!
//! Prints listing and detail records as JSON on stdout; logs go to stderr.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use spotlight_web::client::{ClientConfig, SpotlightClient, DEFAULT_BASE_URL};
use spotlight_web::crawler::{CrawlOptions, Crawler};
use spotlight_web::extraction::{DetailExtractor, ListingExtractor};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Windows Spotlight wallpaper gallery scraper
#[derive(Parser, Debug)]
#[command(name = "spotlight")]
#[command(version)]
#[command(about = "Scrape image metadata from the Windows Spotlight wallpaper gallery")]
struct Args {
    /// Gallery root URL
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Request timeout in milliseconds
    #[arg(long, default_value = "30000")]
    timeout_ms: u64,

    /// Override the User-Agent header
    #[arg(long)]
    user_agent: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the total number of listing pages
    Pages,

    /// Print one listing page
    Page {
        /// Page number (1 = gallery front page)
        number: u32,
    },

    /// Print the detail record of one image
    Image {
        /// Image id
        id: u64,
    },

    /// Walk listing pages (and optionally detail pages), one JSON object per line
    Crawl(CrawlArgs),

    /// Run the listing extractor on a saved HTML file
    ParseListing {
        /// HTML file
        file: PathBuf,
    },

    /// Run the detail extractor on a saved HTML file
    ParseDetail {
        /// HTML file
        file: PathBuf,
    },
}

#[derive(clap::Args, Debug)]
struct CrawlArgs {
    /// First listing page
    #[arg(long, default_value = "1")]
    start: u32,

    /// Last listing page (default: last page of the gallery)
    #[arg(long)]
    end: Option<u32>,

    /// Also fetch every image's detail page
    #[arg(long)]
    details: bool,

    /// Detail pages fetched at once
    #[arg(long, default_value = "4")]
    concurrency: usize,

    /// Pause between listing fetches in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,
}

impl Args {
    fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::builder()
            .base_url(self.base_url.as_str())
            .timeout_ms(self.timeout_ms);
        if let Some(ua) = &self.user_agent {
            config = config.user_agent(ua.as_str());
        }
        config.build()
    }
}

impl From<&CrawlArgs> for CrawlOptions {
    fn from(args: &CrawlArgs) -> Self {
        Self {
            start_page: args.start,
            end_page: args.end,
            include_details: args.details,
            concurrency: args.concurrency,
            request_delay_ms: args.delay_ms,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = args.client_config();

    match args.command {
        Command::Pages => {
            let client = SpotlightClient::new(config)?;
            println!("{}", client.total_pages().await?);
        }
        Command::Page { number } => {
            let client = SpotlightClient::new(config)?;
            let page = client
                .listing_page(number)
                .await
                .with_context(|| format!("Failed to scrape listing page {number}"))?;
            print_pretty(&page)?;
        }
        Command::Image { id } => {
            let client = SpotlightClient::new(config)?;
            let record = client
                .image_info(id)
                .await
                .with_context(|| format!("Failed to scrape image {id}"))?;
            print_pretty(&record)?;
        }
        Command::Crawl(crawl) => {
            let client = SpotlightClient::new(config)?;
            let options = CrawlOptions::from(&crawl);
            let report = Crawler::new(client).run(&options).await?;

            let stdout = std::io::stdout();
            let mut out = stdout.lock();
            for entry in &report.entries {
                writeln!(out, "{}", serde_json::to_string(entry)?)?;
            }
            for record in &report.details {
                writeln!(out, "{}", serde_json::to_string(record)?)?;
            }
            out.flush()?;

            eprintln!(
                "{} of {} pages, {} entries ({} skipped), {} details ({} failed)",
                report.pages_fetched,
                report.page_count,
                report.entries.len(),
                report.warnings.len(),
                report.details.len(),
                report.failures.len()
            );
        }
        Command::ParseListing { file } => {
            let html = read_html(&file)?;
            print_pretty(&ListingExtractor::extract(&html)?)?;
        }
        Command::ParseDetail { file } => {
            let html = read_html(&file)?;
            print_pretty(&DetailExtractor::extract(&html)?)?;
        }
    }

    Ok(())
}

fn read_html(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn print_pretty<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use spotlight_web::client::DEFAULT_USER_AGENT;
    use std::ffi::OsStr;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_default_client_config() {
        let args = Args::try_parse_from(["spotlight", "pages"]).unwrap();
        let config = args.client_config();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(config.timeout_ms, 30000);
        assert!(!args.verbose);
    }

    #[test]
    fn test_client_config_overrides() {
        let args = Args::try_parse_from([
            "spotlight",
            "--base-url",
            "http://127.0.0.1:8080",
            "--timeout-ms",
            "500",
            "--user-agent",
            "wallpaper-bot/1.0",
            "-v",
            "image",
            "12345",
        ])
        .unwrap();
        let config = args.client_config();
        assert_eq!(config.base_url, "http://127.0.0.1:8080");
        assert_eq!(config.user_agent, "wallpaper-bot/1.0");
        assert_eq!(config.timeout_ms, 500);
        assert!(args.verbose);
        assert!(matches!(args.command, Command::Image { id: 12345 }));
    }

    #[test]
    fn test_crawl_defaults_match_options() {
        let args = Args::try_parse_from(["spotlight", "crawl"]).unwrap();
        let Command::Crawl(crawl) = &args.command else {
            panic!("expected crawl, got {:?}", args.command);
        };
        let options = CrawlOptions::from(crawl);
        let defaults = CrawlOptions::default();
        assert_eq!(options.start_page, defaults.start_page);
        assert_eq!(options.end_page, defaults.end_page);
        assert_eq!(options.include_details, defaults.include_details);
        assert_eq!(options.concurrency, defaults.concurrency);
        assert_eq!(options.request_delay_ms, defaults.request_delay_ms);
    }

    #[test]
    fn test_crawl_flags() {
        let args = Args::try_parse_from([
            "spotlight",
            "crawl",
            "--start",
            "3",
            "--end",
            "9",
            "--details",
            "--concurrency",
            "8",
            "--delay-ms",
            "250",
        ])
        .unwrap();
        let Command::Crawl(crawl) = &args.command else {
            panic!("expected crawl, got {:?}", args.command);
        };
        let options = CrawlOptions::from(crawl);
        assert_eq!(options.start_page, 3);
        assert_eq!(options.end_page, Some(9));
        assert!(options.include_details);
        assert_eq!(options.concurrency, 8);
        assert_eq!(options.request_delay_ms, 250);
    }

    #[test]
    fn test_rejects_bad_arguments() {
        assert!(Args::try_parse_from(["spotlight"]).is_err());
        assert!(Args::try_parse_from(["spotlight", "page", "two"]).is_err());
        assert!(Args::try_parse_from(["spotlight", "image", "-1"]).is_err());
    }

    #[test]
    fn test_parse_listing_from_saved_file() {
        let path = std::env::temp_dir().join(format!("spotlight-cli-{}.html", std::process::id()));
        std::fs::write(
            &path,
            r#"<article class="post-42"><a href="/images/42"><img src="t.jpg" alt="x"></a></article>"#,
        )
        .unwrap();

        let args = Args::try_parse_from([
            OsStr::new("spotlight"),
            OsStr::new("parse-listing"),
            path.as_os_str(),
        ])
        .unwrap();
        let Command::ParseListing { file } = &args.command else {
            panic!("expected parse-listing, got {:?}", args.command);
        };
        let page = ListingExtractor::extract(&read_html(file).unwrap()).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(page.ids(), vec![42]);
    }

    #[test]
    fn test_read_html_missing_file() {
        let err = read_html(Path::new("/nonexistent/spotlight.html")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/spotlight.html"));
    }
}
