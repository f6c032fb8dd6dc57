//! The word count application.
//!
//! The map function emits one `(word, 1)` pair per token, with no
//! local pre-aggregation; summing is left to the reduce function so
//! the map/reduce separation of concerns stays intact.

use crate::tokenizer::{CaseFold, Tokenizer};
use crate::{Document, MapOutput, Pair};
use anyhow::Result;
use clap::Parser;

#[derive(Parser, Debug)]
#[clap(no_binary_name = true)]
struct Args {
    /// Case-folding rule for token normalization.
    #[clap(short, long, value_enum, default_value = "ascii")]
    fold: CaseFold,
}

pub fn map(doc: &Document, aux: &str) -> MapOutput {
    let args = Args::try_parse_from(serde_json::from_str::<Vec<String>>(aux)?)?;
    let tokenizer = Tokenizer::new(args.fold);

    let words = tokenizer.tokens(doc.text()).collect::<Vec<_>>();

    let iter = words.into_iter().map(|word| Ok(Pair::new(word, 1)));
    Ok(Box::new(iter))
}

pub fn reduce(_word: &str, counts: &[u64], _aux: &str) -> Result<u64> {
    Ok(counts.iter().sum())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_aux() -> String {
        serde_json::to_string(&Vec::<String>::new()).unwrap()
    }

    #[test]
    fn emits_one_pair_per_token_with_count_one() {
        let doc = Document::new("d0", "the cat sat");
        let pairs: Vec<Pair> = map(&doc, &empty_aux())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(
            pairs,
            [
                Pair::new("the", 1),
                Pair::new("cat", 1),
                Pair::new("sat", 1),
            ]
        );
    }

    #[test]
    fn repeated_words_are_not_preaggregated() {
        let doc = Document::new("d0", "word Word WORD.");
        let pairs: Vec<Pair> = map(&doc, &empty_aux())
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(pairs.len(), 3);
        assert!(pairs.iter().all(|p| p.word == "word" && p.count == 1));
    }

    #[test]
    fn aux_selects_fold_rule() {
        let aux = serde_json::to_string(&vec!["--fold".to_string(), "unicode".to_string()])
            .unwrap();
        let doc = Document::new("d0", "Straße");
        let pairs: Vec<Pair> = map(&doc, &aux).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(pairs[0].word, "straße");
    }

    #[test]
    fn reduce_sums_the_group() {
        assert_eq!(reduce("the", &[1, 1, 1], "").unwrap(), 3);
        assert_eq!(reduce("cat", &[1], "").unwrap(), 1);
    }
}
