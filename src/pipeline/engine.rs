//! The map, shuffle, and reduce steps of the pipeline.
//!
//! Map tasks are pure and share no mutable state; the shuffler is the
//! single synchronization point. Its backing map locks one entry only
//! for the duration of one group update, so concurrently completing
//! map tasks can feed it without losing or duplicating a pair.

use crate::{Document, GroupedMapping, Pair, ReduceFn, ReducedMapping, Workload};
use anyhow::{Context, Result};
use dashmap::DashMap;

/// Groups intermediate pairs by word as map outputs arrive.
///
/// The final mapping may be read only after every map task has
/// completed; [`Shuffler::into_grouped`] enforces that by consuming
/// the shuffler. The grouped result is independent of the order in
/// which pairs were absorbed.
pub struct Shuffler {
    groups: DashMap<String, Vec<u64>>,
}

impl Shuffler {
    pub fn new() -> Self {
        Self {
            groups: DashMap::new(),
        }
    }

    /// Append each pair's count to the group keyed by its word,
    /// creating the group on first occurrence. Every absorbed pair
    /// extends exactly one group by exactly one count entry.
    pub fn absorb(&self, pairs: impl IntoIterator<Item = Pair>) {
        for Pair { word, count } in pairs {
            self.groups.entry(word).or_default().push(count);
        }
    }

    /// Freeze the shuffle into the read-only grouped mapping.
    pub fn into_grouped(self) -> GroupedMapping {
        self.groups.into_iter().collect()
    }
}

impl Default for Shuffler {
    fn default() -> Self {
        Self::new()
    }
}

/// Map one document and feed its pairs to the shuffler.
///
/// The pairs are collected before being absorbed so a map function
/// that fails partway contributes nothing to the shuffle.
pub fn perform_map(
    doc: &Document,
    engine: &Workload,
    aux: &str,
    shuffler: &Shuffler,
) -> Result<()> {
    let map_fn = engine.map_fn;
    let mut pairs = Vec::new();
    for item in map_fn(doc, aux)? {
        pairs.push(item?);
    }
    shuffler.absorb(pairs);
    Ok(())
}

/// Collapse every group into a single total count per word.
///
/// Visits every key of the grouped mapping; a key absent from the
/// input is absent from the output. Pure and deterministic.
pub fn perform_reduce(
    grouped: GroupedMapping,
    reduce_fn: ReduceFn,
    aux: &str,
) -> Result<ReducedMapping> {
    let mut reduced = ReducedMapping::default();
    for (word, counts) in grouped {
        let total = reduce_fn(&word, &counts, aux)
            .with_context(|| format!("failed to reduce group `{}`", word))?;
        reduced.insert(word, total);
    }
    Ok(reduced)
}
