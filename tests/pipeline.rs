//! End-to-end runs: documents on disk, through acquisition, the
//! parallel map phase, shuffle, reduce, and ranking.

use std::io::Write;
use wordfreq::error::PipelineError;
use wordfreq::pipeline::{Pipeline, PipelineConfig};
use wordfreq::source::{self, AcquisitionPolicy};
use wordfreq::workload;

fn corpus(files: &[(&str, &str)]) -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        let mut f = std::fs::File::create(dir.path().join(name)).unwrap();
        f.write_all(contents.as_bytes()).unwrap();
    }
    dir
}

async fn run(pattern: &str, top_n: i64) -> Result<Vec<(String, u64)>, PipelineError> {
    let docs = source::load_documents(&[pattern.to_string()], AcquisitionPolicy::FailFast).await?;
    let config = PipelineConfig::new(top_n, Some(4), None)?;
    let wc = workload::named("wc").expect("wc workload is registered");
    Pipeline::new(config, wc).run(docs, &[]).await
}

#[tokio::test]
async fn counts_and_ranks_a_two_document_corpus() {
    let dir = corpus(&[("a.txt", "the cat sat"), ("b.txt", "the dog sat")]);
    let pattern = format!("{}/*.txt", dir.path().display());

    let ranked = run(&pattern, 2).await.unwrap();
    assert_eq!(ranked, [("sat".to_string(), 2), ("the".to_string(), 2)]);
}

#[tokio::test]
async fn normalizes_case_and_punctuation_across_the_pipeline() {
    let dir = corpus(&[("a.txt", "Word word WORD.")]);
    let pattern = format!("{}/*.txt", dir.path().display());

    let ranked = run(&pattern, 10).await.unwrap();
    assert_eq!(ranked, [("word".to_string(), 3)]);
}

#[tokio::test]
async fn ranked_list_is_bounded_by_distinct_words() {
    let dir = corpus(&[("a.txt", "alpha beta alpha")]);
    let pattern = format!("{}/*.txt", dir.path().display());

    let ranked = run(&pattern, 10).await.unwrap();
    assert_eq!(
        ranked,
        [("alpha".to_string(), 2), ("beta".to_string(), 1)]
    );
}

#[tokio::test]
async fn total_count_is_conserved_over_many_parallel_documents() {
    let files: Vec<(String, String)> = (0..16)
        .map(|i| (format!("doc{i}.txt"), "one two three".to_string()))
        .collect();
    let refs: Vec<(&str, &str)> = files
        .iter()
        .map(|(n, c)| (n.as_str(), c.as_str()))
        .collect();
    let dir = corpus(&refs);
    let pattern = format!("{}/*.txt", dir.path().display());

    let ranked = run(&pattern, 100).await.unwrap();
    let total: u64 = ranked.iter().map(|(_, c)| c).sum();
    assert_eq!(total, 48);
}

#[tokio::test]
async fn missing_corpus_surfaces_an_acquisition_failure() {
    let dir = corpus(&[]);
    let pattern = format!("{}/*.txt", dir.path().display());

    let err = run(&pattern, 10).await.unwrap_err();
    assert!(matches!(err, PipelineError::Acquisition { .. }));
}

#[tokio::test]
async fn best_effort_run_survives_a_missing_input() {
    let dir = corpus(&[("a.txt", "the cat sat")]);
    let inputs = vec![
        format!("{}/gone.txt", dir.path().display()),
        format!("{}/a.txt", dir.path().display()),
    ];

    let docs = source::load_documents(&inputs, AcquisitionPolicy::BestEffort)
        .await
        .unwrap();
    let config = PipelineConfig::new(10, Some(2), None).unwrap();
    let wc = workload::named("wc").unwrap();
    let ranked = Pipeline::new(config, wc).run(docs, &[]).await.unwrap();
    assert_eq!(ranked.len(), 3);
}

#[tokio::test]
async fn invalid_top_n_fails_before_any_document_is_read() {
    let err = PipelineConfig::new(0, None, None).unwrap_err();
    assert!(matches!(err, PipelineError::InvalidArgument(_)));
}

#[tokio::test]
async fn aux_args_reach_the_workload() {
    let dir = corpus(&[("a.txt", "СЛОВО слово")]);
    let pattern = format!("{}/*.txt", dir.path().display());

    let docs = source::load_documents(&[pattern], AcquisitionPolicy::FailFast)
        .await
        .unwrap();
    let config = PipelineConfig::new(10, Some(2), None).unwrap();
    let wc = workload::named("wc").unwrap();
    let aux = vec!["--fold".to_string(), "unicode".to_string()];
    let ranked = Pipeline::new(config, wc).run(docs, &aux).await.unwrap();
    assert_eq!(ranked, [("слово".to_string(), 2)]);
}
