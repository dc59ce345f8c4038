use std::time::Duration;

use anyhow::Result;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};

use crate::catalog::Book;
use crate::error::{FetchError, RetrievalError};
use crate::normalize::normalize;

pub const DEFAULT_BASE_URL: &str = "https://www.sefaria.org";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// One verse of a chapter: the Hebrew line and its English translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verse {
    pub hebrew: String,
    pub english: String,
}

/// The service reports bad references with an `error` field and a 200 status.
#[derive(Deserialize)]
struct ServiceErrorBody {
    error: Option<String>,
}

/// Body of `/api/texts/{ref}`.
#[derive(Deserialize)]
struct ChapterBody {
    he: Vec<String>,
    text: Vec<String>,
}

#[derive(Clone)]
pub struct SefariaClient {
    client: Client,
    base_url: String,
}

impl SefariaClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn chapter_url(&self, book: Book, chapter: u32) -> String {
        format!("{}/api/texts/{}.{}", self.base_url, book.as_str(), chapter)
    }

    /// Fetch one chapter as normalized verse pairs. Makes exactly one request.
    pub async fn fetch_verses(&self, book: Book, chapter: u32) -> Result<Vec<Verse>, FetchError> {
        if !book.contains_chapter(chapter) {
            return Err(FetchError::ChapterOutOfRange {
                book,
                chapter,
                count: book.chapter_count(),
            });
        }

        let url = self.chapter_url(book, chapter);
        debug!(%url, "requesting chapter");

        let response = self
            .client
            .get(&url)
            .query(&[("commentary", "0"), ("context", "0")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RetrievalError::Status(status).into());
        }

        let body = response.text().await?;
        let verses = parse_chapter(&body)?;

        info!(%book, chapter, verses = verses.len(), "chapter loaded");
        Ok(verses)
    }
}

/// Decode a texts response body into verses.
pub fn parse_chapter(body: &str) -> Result<Vec<Verse>, FetchError> {
    if let Ok(ServiceErrorBody { error: Some(error) }) = serde_json::from_str(body) {
        return Err(RetrievalError::Service(error).into());
    }

    let ChapterBody { he, text } = serde_json::from_str(body)?;
    pair_verses(he, text)
}

/// Zip Hebrew and English lines by position, normalizing both sides.
pub fn pair_verses(he: Vec<String>, text: Vec<String>) -> Result<Vec<Verse>, FetchError> {
    if he.len() != text.len() {
        return Err(FetchError::DataShape {
            original: he.len(),
            translated: text.len(),
        });
    }

    Ok(he
        .iter()
        .zip(&text)
        .map(|(hebrew, english)| Verse {
            hebrew: normalize(hebrew),
            english: normalize(english),
        })
        .collect())
}
