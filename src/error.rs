//! Typed failures surfaced by the pipeline.
//!
//! Internals propagate [`anyhow::Error`]; the pipeline boundary
//! converts everything into a [`PipelineError`] so callers can tell an
//! invalid argument from an acquisition failure from a fault inside a
//! map task.

use std::fmt;

/// The phase a pipeline invocation is in.
///
/// Carried inside errors so a failure names the stage it happened in.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Stage {
    Idle,
    MappingInFlight,
    Shuffling,
    Reducing,
    Ranking,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::MappingInFlight => "mapping",
            Stage::Shuffling => "shuffling",
            Stage::Reducing => "reducing",
            Stage::Ranking => "ranking",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Everything that can terminate a pipeline invocation early.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Rejected before any processing: `top_n` of zero, an empty
    /// worker pool, an unknown workload or policy name.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A document could not be fetched or read.
    #[error("failed to acquire document `{id}`")]
    Acquisition {
        id: String,
        #[source]
        source: anyhow::Error,
    },

    /// A fault inside a map task, including a per-document timeout.
    /// Always fail-fast; map tasks are retried zero times.
    #[error("map task for document `{id}` failed during {stage}")]
    Worker {
        id: String,
        stage: Stage,
        #[source]
        source: anyhow::Error,
    },

    /// The invocation was cancelled before reaching `Done`. No partial
    /// results are returned.
    #[error("pipeline cancelled during {stage}")]
    Cancelled { stage: Stage },
}
