//! Instrument record and completion models.

use serde::{Deserialize, Serialize};

/// One instrument's static descriptive data.
///
/// Records are immutable once placed in a snapshot; a changed instrument
/// is a new `Record` in a new snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    /// Ticker symbol, unique within a snapshot (e.g., "AAPL").
    pub symbol: String,

    /// Display name of the instrument (e.g., "Apple Inc").
    pub display_name: String,

    /// Instrument category (e.g., "ETF", "Stock").
    pub kind: Option<String>,

    /// Region of the instrument (e.g., "US").
    pub region: Option<String>,

    /// Market/exchange code where the instrument is listed.
    pub venue: Option<String>,
}

impl Record {
    /// Create a record with the required fields.
    pub fn new(symbol: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
            kind: None,
            region: None,
            venue: None,
        }
    }

    /// Set the instrument category.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the region.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the market/exchange code.
    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }
}

/// A single autocomplete suggestion returned to clients.
///
/// Read-only projection of a [`Record`], serialized with the upstream
/// field names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    /// Ticker symbol of the instrument.
    pub ticker: String,

    /// Name of the instrument's security.
    pub name: String,

    /// Type of the instrument (e.g., "stock", "etf", "index").
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Region of the instrument.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,

    /// Exchange where the instrument is listed.
    #[serde(rename = "exch", skip_serializing_if = "Option::is_none")]
    pub market: Option<String>,
}

impl From<&Record> for Completion {
    fn from(record: &Record) -> Self {
        Self {
            ticker: record.symbol.clone(),
            name: record.display_name.clone(),
            kind: record.kind.clone(),
            region: record.region.clone(),
            market: record.venue.clone(),
        }
    }
}
