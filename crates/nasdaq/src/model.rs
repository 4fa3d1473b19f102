//! Row model and parser for the `nasdaqtraded.txt` symbol directory.

use serde::Deserialize;

use tickerscout_core::Record;

/// One row of the NASDAQ symbol directory.
///
/// Column layout:
/// `Nasdaq Traded|Symbol|Security Name|Listing Exchange|Market Category|ETF|Round Lot Size|Test Issue|Financial Status|CQS Symbol|NASDAQ Symbol|NextShares`
#[derive(Clone, Debug, Deserialize)]
pub struct NasdaqTraded {
    #[serde(rename = "Nasdaq Traded")]
    pub traded: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Security Name")]
    pub name: String,
    #[serde(rename = "Listing Exchange")]
    pub listing_exchange: String,
    #[serde(rename = "Market Category")]
    pub category: String,
    #[serde(rename = "ETF")]
    pub etf: String,
    #[serde(rename = "Round Lot Size")]
    pub round_lot_size: u32,
    #[serde(rename = "Test Issue")]
    pub test_issue: String,
    #[serde(rename = "Financial Status")]
    pub financial_status: String,
    #[serde(rename = "CQS Symbol")]
    pub cqs_symbol: String,
    #[serde(rename = "NASDAQ Symbol")]
    pub nasdaq_symbol: String,
    #[serde(rename = "NextShares")]
    pub next_shares: String,
}

impl NasdaqTraded {
    /// Whether the row is flagged as an ETF.
    ///
    /// Some rows carry `" "` instead of `"N"` in the ETF column; anything
    /// but an explicit `Y` reads as not-an-ETF.
    pub fn is_etf(&self) -> bool {
        self.etf.trim() == "Y"
    }

    /// Whether the row is a test issue (not a real instrument).
    pub fn is_test_issue(&self) -> bool {
        self.test_issue.trim() == "Y"
    }

    /// Consolidated tape for this row's listing exchange.
    pub fn tape(&self) -> Option<&'static str> {
        tape_for_listing_exchange(&self.listing_exchange)
    }

    /// Project this row into a core instrument record.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new(&self.symbol, &self.name).with_region("US");
        if self.is_etf() {
            record = record.with_kind("ETF");
        }
        if !self.listing_exchange.trim().is_empty() {
            record = record.with_venue(&self.listing_exchange);
        }
        record
    }
}

/// Consolidated tape ("A", "B", or "C") for a listing exchange code.
///
/// Returns `None` for unknown codes.
pub fn tape_for_listing_exchange(listing_exchange: &str) -> Option<&'static str> {
    match listing_exchange {
        // New York Stock Exchange (NYSE)
        "N" => Some("A"),
        // NASDAQ
        "Q" => Some("C"),
        // NYSE MKT, NYSE ARCA, BATS, IEX
        "A" | "P" | "Z" | "V" => Some("B"),
        _ => None,
    }
}

/// Marks the trailer line closing the symbol directory, e.g.
/// `File Creation Time: 0306202412:12|||||`. It has fewer columns than a
/// data row and must be stripped before parsing.
const TRAILER_MARKER: &str = "File Creation Time";

/// Parse the full text of a `nasdaqtraded.txt` file.
pub fn parse_nasdaq_traded(data: &str) -> Result<Vec<NasdaqTraded>, csv::Error> {
    let body = match data.rfind(TRAILER_MARKER) {
        Some(index) => &data[..index],
        None => data,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'|')
        .from_reader(body.as_bytes());
    reader.deserialize().collect()
}
