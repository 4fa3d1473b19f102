//! Cache-first fetch of the NASDAQ symbol directory.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use thiserror::Error;

use tickerscout_core::{FetchError, Record, RecordProvider};

use crate::model::{parse_nasdaq_traded, NasdaqTraded};

/// Where the symbol directory is published.
pub const NASDAQ_TRADED_URL: &str =
    "https://www.nasdaqtrader.com/dynamic/SymDir/nasdaqtraded.txt";

const CACHE_SUBDIR: &str = "tickerscout";
const CACHE_FILENAME: &str = "nasdaqtraded.txt";

/// The directory is republished daily; a cached copy older than this is
/// re-downloaded.
const DEFAULT_CACHE_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Failures acquiring or parsing the symbol directory.
#[derive(Error, Debug)]
pub enum NasdaqError {
    #[error("symbol directory download failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("symbol directory cache I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("symbol directory parse failed: {0}")]
    Parse(#[from] csv::Error),

    #[error("no cache directory available on this platform")]
    NoCacheDir,
}

impl From<NasdaqError> for FetchError {
    fn from(err: NasdaqError) -> Self {
        FetchError::new(err)
    }
}

/// [`RecordProvider`] over the NASDAQ symbol directory.
///
/// Serves the on-disk cache when it is fresh enough; otherwise downloads
/// the directory and writes through to the cache. A failed cache write is
/// logged and otherwise ignored.
pub struct NasdaqRecordProvider {
    client: reqwest::Client,
    url: String,
    cache_file: Option<PathBuf>,
    cache_max_age: Duration,
}

impl NasdaqRecordProvider {
    /// Provider caching under the user's cache directory.
    pub fn new() -> Result<Self, NasdaqError> {
        let cache_dir = dirs::cache_dir().ok_or(NasdaqError::NoCacheDir)?;
        Ok(Self::with_cache_file(
            cache_dir.join(CACHE_SUBDIR).join(CACHE_FILENAME),
        ))
    }

    /// Provider caching at an explicit path.
    pub fn with_cache_file(path: PathBuf) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: NASDAQ_TRADED_URL.to_string(),
            cache_file: Some(path),
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
        }
    }

    /// Provider that always downloads.
    pub fn without_cache() -> Self {
        Self {
            client: reqwest::Client::new(),
            url: NASDAQ_TRADED_URL.to_string(),
            cache_file: None,
            cache_max_age: DEFAULT_CACHE_MAX_AGE,
        }
    }

    /// Override the download URL.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Override how old a cached copy may be before it is re-downloaded.
    pub fn with_cache_max_age(mut self, max_age: Duration) -> Self {
        self.cache_max_age = max_age;
        self
    }

    /// Fetch and parse the directory, cache-first.
    pub async fn fetch_traded(&self) -> Result<Vec<NasdaqTraded>, NasdaqError> {
        let text = match self.read_cache() {
            Some(text) => text,
            None => {
                let text = self.download().await?;
                self.write_cache(&text);
                text
            }
        };
        Ok(parse_nasdaq_traded(&text)?)
    }

    /// The cached directory, if present and younger than the max age.
    fn read_cache(&self) -> Option<String> {
        let path = self.cache_file.as_ref()?;
        let modified = std::fs::metadata(path).and_then(|meta| meta.modified()).ok()?;
        match modified.elapsed() {
            Ok(age) if age <= self.cache_max_age => {
                debug!("serving symbol directory from cache: {}", path.display());
                std::fs::read_to_string(path).ok()
            }
            _ => None,
        }
    }

    fn write_cache(&self, text: &str) {
        let Some(path) = self.cache_file.as_ref() else {
            return;
        };
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(path, text)
        };
        if let Err(err) = write() {
            warn!("failed to cache symbol directory at {}: {err}", path.display());
        }
    }

    async fn download(&self) -> Result<String, NasdaqError> {
        debug!("downloading symbol directory from {}", self.url);
        let response = self.client.get(&self.url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl RecordProvider for NasdaqRecordProvider {
    async fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
        let rows = self.fetch_traded().await?;
        Ok(rows.iter().map(NasdaqTraded::to_record).collect())
    }
}
