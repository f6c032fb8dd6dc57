//! Renders the ranked list for the caller.
//!
//! The engine is agnostic to presentation; these renderers consume
//! only the ranking order and the word-to-count mapping.

use crate::RankedList;
use serde::Serialize;
use std::io::{self, Write};

/// One reported entry, in rank order.
#[derive(Serialize)]
struct Entry<'a> {
    word: &'a str,
    count: u64,
}

/// Write the ranking as an aligned text table.
pub fn render_table(ranked: &RankedList, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{:<24} {:>10}", "word", "count")?;
    for (word, count) in ranked {
        writeln!(out, "{:<24} {:>10}", word, count)?;
    }
    Ok(())
}

/// Write the ranking as a JSON array of `{word, count}` objects.
pub fn render_json(ranked: &RankedList, out: &mut impl Write) -> anyhow::Result<()> {
    let entries: Vec<Entry<'_>> = ranked
        .iter()
        .map(|(word, count)| Entry {
            word: word.as_str(),
            count: *count,
        })
        .collect();
    serde_json::to_writer_pretty(&mut *out, &entries)?;
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranked() -> RankedList {
        vec![("sat".to_string(), 2), ("the".to_string(), 2)]
    }

    #[test]
    fn table_preserves_ranking_order() {
        let mut buf = Vec::new();
        render_table(&ranked(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let sat = text.find("sat").unwrap();
        let the = text.find("the").unwrap();
        assert!(sat < the);
        assert!(text.starts_with("word"));
    }

    #[test]
    fn json_entries_carry_word_and_count_in_rank_order() {
        let mut buf = Vec::new();
        render_json(&ranked(), &mut buf).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        let entries = parsed.as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["word"], "sat");
        assert_eq!(entries[0]["count"], 2);
        assert_eq!(entries[1]["word"], "the");
        assert_eq!(entries[1]["count"], 2);
    }
}
