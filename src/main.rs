use clap::{Parser, Subcommand};
use colored::*;
use anyhow::{Context, Result};
use tracing::{info, warn};

mod app;
mod catalog;
mod config;
mod error;
mod handler;
mod logging;
mod normalize;
mod reader;
mod sefaria;
mod tui;
mod ui;

use app::App;
use catalog::Book;
use config::Config;
use sefaria::SefariaClient;

#[derive(Parser)]
#[command(name = "torah")]
#[command(about = "Read the Torah in parallel Hebrew and English")]
#[command(version)]
struct Cli {
    /// Base URL of the text service (overrides config and TORAH_READER_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the books and their chapter counts
    Books,
    /// Print one chapter
    Read {
        /// Book name, English or Hebrew (e.g. Genesis, Bereshit)
        book: Book,
        /// Chapter number, starting at 1
        chapter: u32,
    },
    /// Save settings to the config file (use with --api-url to store the URL)
    Config {
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            logging::init_file()?;
            let config = config_or_default();
            let base_url = config.resolve_base_url(cli.api_url.as_deref());
            let client = SefariaClient::new(&base_url, config.timeout())?;
            run_tui(client).await
        }
        Some(Commands::Books) => {
            list_books();
            Ok(())
        }
        Some(Commands::Read { book, chapter }) => {
            logging::init_stderr()?;
            let config = config_or_default();
            let base_url = config.resolve_base_url(cli.api_url.as_deref());
            let client = SefariaClient::new(&base_url, config.timeout())?;
            display_chapter(&client, book, chapter).await
        }
        Some(Commands::Config { timeout }) => save_config(cli.api_url, timeout),
    }
}

async fn run_tui(client: SefariaClient) -> Result<()> {
    info!(base_url = client.base_url(), "starting reader");

    tui::install_panic_hook();
    let mut terminal = tui::init().context("failed to initialize terminal")?;

    let mut events = tui::EventHandler::new();
    let mut app = App::new(client, events.sender());

    let result = async {
        while !app.should_quit {
            terminal.draw(|frame| ui::render(&mut app, frame))?;
            match events.next().await {
                Some(event) => handler::handle_event(&mut app, event),
                None => break,
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    tui::restore()?;
    info!("reader closed");
    result
}

/// Load the config file, falling back to defaults when it can't be read.
/// Call after logging is set up so the fallback is recorded.
fn config_or_default() -> Config {
    Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "ignoring unreadable config file, using defaults");
        Config::new()
    })
}

fn save_config(api_url: Option<String>, timeout: Option<u64>) -> Result<()> {
    let config = Config::update(api_url, timeout)?;

    println!("{} {}", "Saved".green(), Config::get_config_path()?.display());
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn list_books() {
    println!("\n{}", "📚 Books of the Torah".bold().blue());
    println!("{}", "=".repeat(40).dimmed());

    for book in Book::all() {
        println!(
            "  • {} ({}) {}",
            book.as_str().bold().green(),
            book.hebrew_name(),
            format!("{} chapters", book.chapter_count()).dimmed()
        );
    }
}

async fn display_chapter(client: &SefariaClient, book: Book, chapter: u32) -> Result<()> {
    let verses = client
        .fetch_verses(book, chapter)
        .await
        .with_context(|| format!("Error loading {} {}", book, chapter))?;

    println!(
        "\n{}",
        format!("📜 {} {} ({})", book, chapter, book.hebrew_name()).bold().green()
    );
    println!("{}", "=".repeat(50).dimmed());

    for (idx, verse) in verses.iter().enumerate() {
        println!("\n{}  {}", format!("{}:{}", chapter, idx + 1).bold().yellow(), verse.hebrew.bold());
        println!("      {}", verse.english);
    }

    println!("\n{}", "=".repeat(50).dimmed());
    println!("{} verses displayed", verses.len().to_string().bold());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_display_chapter_failure_is_an_error() {
        // Out of range, so no request is sent.
        let client = SefariaClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = display_chapter(&client, Book::Leviticus, 28).await.unwrap_err();

        assert_eq!(err.to_string(), "Error loading Leviticus 28");
        assert!(format!("{err:#}").contains("Leviticus has 27 chapters"), "got: {err:#}");
    }
}
