//! Tickerscout Core Crate
//!
//! This crate provides prefix autocomplete over a periodically-refreshed
//! catalog of financial instrument symbols.
//!
//! # Overview
//!
//! The core supports:
//! - Multi-field prefix search (symbol, display name) with merged,
//!   deduplicated results
//! - Scheduled index rebuilds with a retry cadence on provider failure
//! - A lock-free read path: readers always see the last fully-built
//!   snapshot, never a partial one
//!
//! # Architecture
//!
//! ```text
//! +------------------+     +------------------+
//! |  RecordProvider  | --> |      Record      |  (fetched instrument data)
//! +------------------+     +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   IndexBuilder   |  (one build per refresh)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |   PrefixIndex    |  (immutable snapshot)
//!                          +------------------+
//!                                  |
//!                                  v  atomic swap
//!                          +------------------+
//!                          | RefreshingSource |  (publishes snapshots)
//!                          +------------------+
//!                                  |
//!                                  v
//!                          +------------------+
//!                          |    Completer     |  (read-only facade)
//!                          +------------------+
//! ```
//!
//! # Core Types
//!
//! - [`Record`] - One instrument's descriptive data
//! - [`Completion`] - Read-only projection of a record, serialized to clients
//! - [`PrefixIndex`] - Immutable snapshot supporting prefix search
//! - [`RefreshingSource`] - Background refresh loop with atomic publication
//! - [`CompletionService`] - The [`Completer`] facade over a source

pub mod completer;
pub mod errors;
pub mod index;
pub mod models;
pub mod normalize;
pub mod provider;
pub mod source;

pub use completer::{Completer, CompletionService};
pub use errors::{BuildError, FetchError};
pub use index::{FieldSelector, PrefixIndex, DEFAULT_FIELDS};
pub use models::{Completion, Record};
pub use normalize::normalize_key;
pub use provider::{IndexBuilder, ProviderIndexBuilder, RecordProvider};
pub use source::{RefreshConfig, RefreshingSource, SourceTask};
