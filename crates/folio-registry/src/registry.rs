//! The capability registry.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use folio_core::{TopicKey, TopicType, Unit};

use crate::capability::Capability;
use crate::coverage::{Coverage, CoverageStats};
use crate::record::TopicRecord;

/// Topics in insertion order with a key index.
///
/// Every listing preserves insertion order so dry-run task listings are
/// reproducible. Owned by the orchestrating code and passed by reference to
/// the catalog loader and planner; there is no process-wide instance.
#[derive(Debug, Default, Clone)]
pub struct CapabilityRegistry {
    records: Vec<TopicRecord>,
    index: HashMap<TopicKey, usize>,
}

impl CapabilityRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an implemented topic.
    ///
    /// A catalog-only record with the same key is upgraded in place (keeping
    /// its position) rather than duplicated.
    pub fn register_capability(
        &mut self,
        key: TopicKey,
        capability: Arc<dyn Capability>,
    ) -> &TopicRecord {
        if let Some(&position) = self.index.get(&key) {
            let record = &mut self.records[position];
            if !record.is_implemented() {
                tracing::debug!(topic = %key, "upgrading catalog topic to implemented");
            }
            record.bind(capability);
            return &self.records[position];
        }
        self.insert(TopicRecord::new(key, Some(capability)))
    }

    /// Idempotent upsert. Returns the existing record when the key is known,
    /// binding `capability` if one is supplied; an existing capability is
    /// never removed.
    pub fn register_topic(
        &mut self,
        key: TopicKey,
        capability: Option<Arc<dyn Capability>>,
    ) -> &TopicRecord {
        match (self.index.get(&key).copied(), capability) {
            (Some(position), Some(capability)) => {
                self.records[position].bind(capability);
                &self.records[position]
            }
            (Some(position), None) => &self.records[position],
            (None, capability) => self.insert(TopicRecord::new(key, capability)),
        }
    }

    fn insert(&mut self, record: TopicRecord) -> &TopicRecord {
        let position = self.records.len();
        self.index.insert(record.key().clone(), position);
        self.records.push(record);
        &self.records[position]
    }

    #[must_use]
    pub fn get_topic(&self, key: &TopicKey) -> Option<&TopicRecord> {
        self.index.get(key).map(|&position| &self.records[position])
    }

    /// The bound capability for an exact key, if any.
    #[must_use]
    pub fn get_generator(&self, key: &TopicKey) -> Option<Arc<dyn Capability>> {
        self.get_topic(key).and_then(TopicRecord::capability)
    }

    #[must_use]
    pub fn contains(&self, key: &TopicKey) -> bool {
        self.index.contains_key(key)
    }

    /// All topics, optionally restricted to one unit (exact match) and to a
    /// set of types. An empty type slice applies no type restriction.
    #[must_use]
    pub fn get_all_topics(
        &self,
        unit_filter: Option<Unit>,
        type_filter: Option<&[TopicType]>,
    ) -> Vec<&TopicRecord> {
        self.records
            .iter()
            .filter(|record| unit_filter.is_none_or(|unit| record.unit() == unit))
            .filter(|record| matches_types(record, type_filter))
            .collect()
    }

    #[must_use]
    pub fn get_implemented_topics(&self, type_filter: Option<&[TopicType]>) -> Vec<&TopicRecord> {
        self.get_all_topics(None, type_filter)
            .into_iter()
            .filter(|record| record.is_implemented())
            .collect()
    }

    #[must_use]
    pub fn get_unimplemented_topics(
        &self,
        type_filter: Option<&[TopicType]>,
    ) -> Vec<&TopicRecord> {
        self.get_all_topics(None, type_filter)
            .into_iter()
            .filter(|record| !record.is_implemented())
            .collect()
    }

    /// Sorted distinct units.
    #[must_use]
    pub fn get_units(&self) -> Vec<Unit> {
        self.records
            .iter()
            .map(TopicRecord::unit)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Sorted distinct types.
    #[must_use]
    pub fn get_types(&self) -> Vec<TopicType> {
        self.records
            .iter()
            .map(|record| record.topic_type().clone())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Overall and per-type coverage. Computed on every call.
    #[must_use]
    pub fn get_coverage_stats(&self) -> CoverageStats {
        let implemented = self.records.iter().filter(|r| r.is_implemented()).count();
        let overall = Coverage::from_counts(self.records.len(), implemented);

        let mut counts: BTreeMap<TopicType, (usize, usize)> = BTreeMap::new();
        for record in &self.records {
            let entry = counts.entry(record.topic_type().clone()).or_default();
            entry.0 += 1;
            if record.is_implemented() {
                entry.1 += 1;
            }
        }

        let by_type = counts
            .into_iter()
            .map(|(topic_type, (total, implemented))| {
                (topic_type, Coverage::from_counts(total, implemented))
            })
            .collect();

        CoverageStats::new(&overall, by_type)
    }

    /// Coverage per unit, ordered by unit.
    #[must_use]
    pub fn get_unit_coverage(&self) -> BTreeMap<Unit, Coverage> {
        let mut counts: BTreeMap<Unit, (usize, usize)> = BTreeMap::new();
        for record in &self.records {
            let entry = counts.entry(record.unit()).or_default();
            entry.0 += 1;
            if record.is_implemented() {
                entry.1 += 1;
            }
        }
        counts
            .into_iter()
            .map(|(unit, (total, implemented))| (unit, Coverage::from_counts(total, implemented)))
            .collect()
    }

    /// Unimplemented topics grouped by unit. Units with no gaps are omitted.
    #[must_use]
    pub fn gaps(&self) -> BTreeMap<Unit, Vec<&TopicRecord>> {
        let mut gaps: BTreeMap<Unit, Vec<&TopicRecord>> = BTreeMap::new();
        for record in self.records.iter().filter(|r| !r.is_implemented()) {
            gaps.entry(record.unit()).or_default().push(record);
        }
        gaps
    }

    pub fn iter(&self) -> impl Iterator<Item = &TopicRecord> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn matches_types(record: &TopicRecord, type_filter: Option<&[TopicType]>) -> bool {
    match type_filter {
        Some(types) if !types.is_empty() => types.contains(record.topic_type()),
        _ => true,
    }
}
