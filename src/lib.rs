//! A word-frequency map/shuffle/reduce engine.
//!
//! Documents are fanned out to parallel map tasks that emit
//! `(word, 1)` pairs, a shuffler groups the pairs by word, a reducer
//! collapses each group into a total count, and a ranker selects the
//! top-N most frequent words. Everything runs in-process; document
//! acquisition and result rendering are thin collaborators at the
//! pipeline's boundary.

use fnv::FnvHashMap;

pub mod error;
pub mod pipeline;
pub mod report;
pub mod source;
pub mod telemetry;
pub mod tokenizer;
pub mod workload;

/////////////////////////////////////////////////////////////////////////////
// Map/reduce application types
/////////////////////////////////////////////////////////////////////////////

/// The output of an application map function.
///
/// There are 2 layers of [`anyhow::Result`]s here. The outer layer
/// accounts for errors that arise while creating the iterator.
/// The inner layer accounts for errors that occur during iteration.
///
/// This accomodates both batch (all pairs emitted at once) and lazy
/// (pairs only emitted when the iterator is consumed) map operations.
pub type MapOutput = anyhow::Result<Box<dyn Iterator<Item = anyhow::Result<Pair>> + Send>>;

/// A map function takes one document and auxiliary arguments.
///
/// It returns an iterator that yields intermediate `(word, count)`
/// pairs, one per token, each with `count = 1`. Aggregation is the
/// shuffler's and reducer's job, not the mapper's.
pub type MapFn = fn(doc: &Document, aux: &str) -> MapOutput;

/// A reduce function takes a word, the slice of partial counts grouped
/// under that word, and an auxiliary argument. It returns a single
/// aggregated count.
pub type ReduceFn = fn(word: &str, counts: &[u64], aux: &str) -> anyhow::Result<u64>;

/// A map/reduce application.
#[derive(Copy, Clone)]
pub struct Workload {
    pub map_fn: MapFn,
    pub reduce_fn: ReduceFn,
}

/////////////////////////////////////////////////////////////////////////////
// Documents and intermediate pairs
/////////////////////////////////////////////////////////////////////////////

/// One input document: an identifier (path, URL) and its text.
///
/// A document is input to exactly one map invocation. The pipeline
/// only reads it.
#[derive(Clone, Debug)]
pub struct Document {
    id: String,
    text: String,
}

impl Document {
    /// Construct a new document from its identifier and text content.
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }

    /// The identifier this document was acquired under.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The document text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A single intermediate `(word, count)` pair.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Pair {
    /// The case-normalized word.
    pub word: String,
    /// The partial count, at least 1.
    pub count: u64,
}

impl Pair {
    /// Construct a new pair from the given word and count.
    pub fn new(word: impl Into<String>, count: u64) -> Self {
        Self {
            word: word.into(),
            count,
        }
    }
}

/////////////////////////////////////////////////////////////////////////////
// Pipeline artifacts
/////////////////////////////////////////////////////////////////////////////

/// Word mapped to the ordered partial counts collected for it during
/// the shuffle phase. Built exclusively by the shuffler, read-only
/// afterward.
pub type GroupedMapping = FnvHashMap<String, Vec<u64>>;

/// Word mapped to its final aggregated count. Built exclusively by the
/// reducer, immutable once produced.
pub type ReducedMapping = FnvHashMap<String, u64>;

/// The terminal artifact: at most N `(word, count)` entries sorted by
/// count descending, ties broken by word ascending.
pub type RankedList = Vec<(String, u64)>;
