//! NASDAQ symbol directory provider.
//!
//! Implements the core [`RecordProvider`](tickerscout_core::RecordProvider)
//! over NASDAQ's `nasdaqtraded.txt` symbol directory: one pipe-delimited
//! row per traded instrument across US listing venues.
//!
//! Directory format reference:
//! <https://www.nasdaqtrader.com/trader.aspx?id=symboldirdefs>

pub mod model;
pub mod provider;

pub use model::{parse_nasdaq_traded, tape_for_listing_exchange, NasdaqTraded};
pub use provider::{NasdaqError, NasdaqRecordProvider, NASDAQ_TRADED_URL};
