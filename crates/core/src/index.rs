//! Immutable prefix-search index over instrument records.
//!
//! A [`PrefixIndex`] is built once from a fixed list of records and never
//! mutated afterwards; all refresh happens by building a new index and
//! swapping it in at the source. Querying takes `&self` only, so any
//! number of concurrent callers can search the same snapshot.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::ops::Bound;

use crate::errors::BuildError;
use crate::models::Record;
use crate::normalize::normalize_key;

/// Selects which record field a key index is built over.
///
/// Lookup iterates the selectors in the order given to
/// [`PrefixIndex::build`]; adding a field is additive and order-stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldSelector {
    /// The ticker symbol.
    Symbol,
    /// The instrument's display name.
    DisplayName,
}

impl FieldSelector {
    /// The record field this selector indexes.
    pub fn value<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            Self::Symbol => &record.symbol,
            Self::DisplayName => &record.display_name,
        }
    }
}

/// Indexed fields in their fixed lookup order: symbol first, then name.
pub const DEFAULT_FIELDS: &[FieldSelector] = &[FieldSelector::Symbol, FieldSelector::DisplayName];

/// Per-field key index.
///
/// The sorted map serves double duty: it is the normalized key -> record
/// position map, and its ordered keys are the prefix structure (a range
/// scan from the prefix enumerates all matching keys in lexical order,
/// which is also the documented tie-break order).
#[derive(Debug)]
struct FieldIndex {
    selector: FieldSelector,
    keys: BTreeMap<String, usize>,
}

impl FieldIndex {
    /// Record positions whose key starts with `prefix`, in lexical key order.
    fn prefix_positions<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = usize> + 'a {
        self.keys
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(prefix))
            .map(|(_, position)| *position)
    }
}

/// An immutable snapshot of instrument records with per-field prefix
/// lookup.
#[derive(Debug)]
pub struct PrefixIndex {
    records: Vec<Record>,
    fields: Vec<FieldIndex>,
}

impl PrefixIndex {
    /// Build an index over `records` for the given field selectors.
    ///
    /// Runs in O(total text length); performs no I/O. Records whose
    /// selected field value is empty are indexed under the empty key --
    /// effectively unsearchable by that field but still present in
    /// [`get_all`](Self::get_all).
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::InvalidRecord`] if two records map to the
    /// same normalized symbol key: symbols are the record identity and
    /// must be unique within a snapshot. For non-symbol fields a
    /// colliding key keeps the earliest record's position.
    pub fn build(records: Vec<Record>, selectors: &[FieldSelector]) -> Result<Self, BuildError> {
        let mut fields = Vec::with_capacity(selectors.len());
        for &selector in selectors {
            let mut keys = BTreeMap::new();
            for (position, record) in records.iter().enumerate() {
                let key = normalize_key(selector.value(record));
                match keys.entry(key) {
                    Entry::Vacant(slot) => {
                        slot.insert(position);
                    }
                    Entry::Occupied(slot) => {
                        if selector == FieldSelector::Symbol {
                            return Err(BuildError::InvalidRecord {
                                position,
                                reason: format!("duplicate symbol key {:?}", slot.key()),
                            });
                        }
                        // Colliding non-symbol key: earliest record wins.
                    }
                }
            }
            fields.push(FieldIndex { selector, keys });
        }
        Ok(Self { records, fields })
    }

    /// The field selectors this index was built with, in lookup order.
    pub fn indexed_fields(&self) -> Vec<FieldSelector> {
        self.fields.iter().map(|field| field.selector).collect()
    }

    /// All records matching `prompt` as a prefix on any indexed field.
    ///
    /// The prompt is normalized with the same function used at build
    /// time. Per-field hits are concatenated in field order, then
    /// deduplicated by record identity preserving first-seen order: a
    /// record matching on both symbol and name appears once, at its
    /// earliest position. Truncation to `limit` happens after
    /// deduplication, never per field; `None` means unbounded.
    pub fn search(&self, prompt: &str, limit: Option<usize>) -> Vec<&Record> {
        let prefix = normalize_key(prompt);
        let per_field_cap = limit.unwrap_or(usize::MAX);
        let mut seen = vec![false; self.records.len()];
        let mut results = Vec::new();

        for field in &self.fields {
            for position in field.prefix_positions(&prefix).take(per_field_cap) {
                if !seen[position] {
                    seen[position] = true;
                    results.push(&self.records[position]);
                }
            }
        }

        if let Some(limit) = limit {
            results.truncate(limit);
        }
        results
    }

    /// The full record sequence in original build order. No filtering.
    pub fn get_all(&self) -> &[Record] {
        &self.records
    }

    /// Number of records in the snapshot.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the snapshot holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
