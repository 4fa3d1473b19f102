//! Provider and builder seams.
//!
//! A [`RecordProvider`] is the external collaborator that materializes
//! instrument records (network fetch, caching, and file parsing are its
//! concern). An [`IndexBuilder`] is what the refreshing source actually
//! invokes once per refresh attempt; [`ProviderIndexBuilder`] bridges the
//! two.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::{BuildError, FetchError};
use crate::index::{FieldSelector, PrefixIndex, DEFAULT_FIELDS};
use crate::models::Record;

/// Source of instrument records.
///
/// Called once per refresh attempt. Implementations own all I/O latency
/// and caching strategy.
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Fetch the full record catalog.
    async fn fetch_records(&self) -> Result<Vec<Record>, FetchError>;
}

/// Builds a fresh [`PrefixIndex`]; the unit of work of one refresh.
#[async_trait]
pub trait IndexBuilder: Send + Sync {
    /// Produce a complete, ready-to-publish index.
    async fn build_index(&self) -> Result<PrefixIndex, BuildError>;
}

/// [`IndexBuilder`] over any [`RecordProvider`]: fetch records, then
/// build an index over the configured fields.
pub struct ProviderIndexBuilder {
    provider: Arc<dyn RecordProvider>,
    fields: Vec<FieldSelector>,
}

impl ProviderIndexBuilder {
    /// Index the default fields (symbol, then display name).
    pub fn new(provider: Arc<dyn RecordProvider>) -> Self {
        Self::with_fields(provider, DEFAULT_FIELDS)
    }

    /// Index a custom ordered field list.
    pub fn with_fields(provider: Arc<dyn RecordProvider>, fields: &[FieldSelector]) -> Self {
        Self {
            provider,
            fields: fields.to_vec(),
        }
    }
}

#[async_trait]
impl IndexBuilder for ProviderIndexBuilder {
    async fn build_index(&self) -> Result<PrefixIndex, BuildError> {
        let records = self.provider.fetch_records().await?;
        PrefixIndex::build(records, &self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProvider(Vec<Record>);

    #[async_trait]
    impl RecordProvider for FixedProvider {
        async fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
            Ok(self.0.clone())
        }
    }

    struct FailingProvider;

    #[async_trait]
    impl RecordProvider for FailingProvider {
        async fn fetch_records(&self) -> Result<Vec<Record>, FetchError> {
            Err(FetchError::new(anyhow::anyhow!("upstream unavailable")))
        }
    }

    #[tokio::test]
    async fn test_builder_indexes_fetched_records() {
        let provider = Arc::new(FixedProvider(vec![
            Record::new("AAPL", "Apple Inc"),
            Record::new("MSFT", "Microsoft Corporation"),
        ]));
        let builder = ProviderIndexBuilder::new(provider);

        let index = builder.build_index().await.unwrap();
        assert_eq!(index.len(), 2);
        assert_eq!(index.search("micro", None)[0].symbol, "MSFT");
    }

    #[tokio::test]
    async fn test_fetch_failure_becomes_build_error() {
        let builder = ProviderIndexBuilder::new(Arc::new(FailingProvider));
        let err = builder.build_index().await.unwrap_err();
        assert!(matches!(err, BuildError::Fetch(_)));
    }

    #[tokio::test]
    async fn test_custom_field_list() {
        let provider = Arc::new(FixedProvider(vec![Record::new("AAPL", "Apple Inc")]));
        let builder = ProviderIndexBuilder::with_fields(provider, &[FieldSelector::Symbol]);

        let index = builder.build_index().await.unwrap();
        assert_eq!(index.indexed_fields(), vec![FieldSelector::Symbol]);
        // Name lookups find nothing when only the symbol field is indexed.
        assert!(index.search("Apple", None).is_empty());
        assert_eq!(index.search("AA", None).len(), 1);
    }
}
