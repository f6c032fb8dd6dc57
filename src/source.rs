//! Document acquisition.
//!
//! Inputs are either `http(s)://` URLs or filesystem glob patterns.
//! Acquisition is a thin collaborator at the pipeline boundary; every
//! failure is surfaced with the document identifier it belongs to,
//! never swallowed.

use crate::error::PipelineError;
use crate::Document;
use anyhow::anyhow;
use clap::ValueEnum;
use glob::glob;
use std::path::Path;

/// What the caller wants when a document cannot be acquired.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AcquisitionPolicy {
    /// Abort the whole run on the first failed document. The default,
    /// so the reduced mapping always covers every requested document.
    #[default]
    FailFast,
    /// Log a warning, skip the failed document, continue with the rest.
    BestEffort,
}

/// Acquire the documents named by `inputs`, applying `policy` to every
/// per-document failure.
pub async fn load_documents(
    inputs: &[String],
    policy: AcquisitionPolicy,
) -> Result<Vec<Document>, PipelineError> {
    let mut docs = Vec::new();
    for input in inputs {
        if input.starts_with("http://") || input.starts_with("https://") {
            match fetch_url(input).await {
                Ok(doc) => docs.push(doc),
                Err(source) => skip_or_fail(policy, input, source)?,
            }
        } else {
            load_glob(input, policy, &mut docs).await?;
        }
    }
    Ok(docs)
}

async fn load_glob(
    pattern: &str,
    policy: AcquisitionPolicy,
    docs: &mut Vec<Document>,
) -> Result<(), PipelineError> {
    let paths = glob(pattern).map_err(|e| {
        PipelineError::InvalidArgument(format!("bad glob pattern `{pattern}`: {e}"))
    })?;

    let mut matched = false;
    for entry in paths {
        matched = true;
        match entry {
            Ok(path) => match read_file(&path).await {
                Ok(doc) => docs.push(doc),
                Err(source) => skip_or_fail(policy, &path.display().to_string(), source)?,
            },
            Err(glob_err) => {
                let id = glob_err.path().display().to_string();
                skip_or_fail(policy, &id, anyhow!(glob_err))?;
            }
        }
    }
    // A pattern with zero matches usually means a mistyped path.
    if !matched {
        skip_or_fail(policy, pattern, anyhow!("no files matched"))?;
    }
    Ok(())
}

async fn read_file(path: &Path) -> anyhow::Result<Document> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(Document::new(path.display().to_string(), text))
}

async fn fetch_url(url: &str) -> anyhow::Result<Document> {
    let text = reqwest::get(url).await?.error_for_status()?.text().await?;
    Ok(Document::new(url, text))
}

fn skip_or_fail(
    policy: AcquisitionPolicy,
    id: &str,
    source: anyhow::Error,
) -> Result<(), PipelineError> {
    match policy {
        AcquisitionPolicy::FailFast => Err(PipelineError::Acquisition {
            id: id.to_string(),
            source,
        }),
        AcquisitionPolicy::BestEffort => {
            tracing::warn!(doc = id, error = %source, "skipping document");
            Ok(())
        }
    }
}
