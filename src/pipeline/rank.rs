//! Top-N selection over the reduced mapping.

use crate::{RankedList, ReducedMapping};
use itertools::Itertools;

/// Select the `top_n` most frequent words.
///
/// Primary order is count descending. Ties are broken by word
/// ascending, a fixed rule so the ranking never depends on hash
/// iteration order. The result has `min(top_n, distinct words)`
/// entries.
///
/// `top_n` is validated as positive by the pipeline configuration
/// before any document is processed.
pub fn rank(reduced: &ReducedMapping, top_n: usize) -> RankedList {
    reduced
        .iter()
        .sorted_by(|(word_a, count_a), (word_b, count_b)| {
            count_b.cmp(count_a).then_with(|| word_a.cmp(word_b))
        })
        .take(top_n)
        .map(|(word, count)| (word.clone(), *count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduced(entries: &[(&str, u64)]) -> ReducedMapping {
        entries
            .iter()
            .map(|(w, c)| (w.to_string(), *c))
            .collect()
    }

    #[test]
    fn orders_by_count_descending() {
        let counts = reduced(&[("a", 1), ("b", 3), ("c", 2)]);
        let ranked = rank(&counts, 10);
        assert_eq!(
            ranked,
            [
                ("b".to_string(), 3),
                ("c".to_string(), 2),
                ("a".to_string(), 1),
            ]
        );
    }

    #[test]
    fn ties_break_lexicographically_ascending() {
        let counts = reduced(&[("the", 2), ("sat", 2), ("cat", 1), ("dog", 1)]);
        let ranked = rank(&counts, 2);
        assert_eq!(ranked, [("sat".to_string(), 2), ("the".to_string(), 2)]);
    }

    #[test]
    fn truncates_to_top_n() {
        let counts = reduced(&[("a", 5), ("b", 4), ("c", 3), ("d", 2)]);
        assert_eq!(rank(&counts, 2).len(), 2);
    }

    #[test]
    fn shorter_than_n_when_few_distinct_words() {
        let counts = reduced(&[("only", 7)]);
        let ranked = rank(&counts, 10);
        assert_eq!(ranked, [("only".to_string(), 7)]);
    }

    #[test]
    fn empty_mapping_ranks_empty() {
        assert!(rank(&ReducedMapping::default(), 10).is_empty());
    }
}
