//! The pipeline orchestrator and its configuration surface.
//!
//! An invocation moves through
//! `Idle -> MappingInFlight -> Shuffling -> Reducing -> Ranking -> Done`,
//! with `Failed` reachable from any state. Map tasks are dispatched one
//! per document onto a bounded worker pool; the shuffle begins only
//! once every map task has completed successfully. If any map task
//! fails, the remaining tasks are cancelled and the whole invocation
//! fails with no partial results.

use crate::error::{PipelineError, Stage};
use crate::pipeline::engine::{perform_map, perform_reduce, Shuffler};
use crate::pipeline::rank::rank;
use crate::source::AcquisitionPolicy;
use crate::{Document, RankedList, Workload};
use anyhow::anyhow;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

pub mod engine;
pub mod rank;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Count word frequencies over the inputs and report the top-N words
    Run {
        /// Glob patterns or http(s) URLs for the input documents
        #[arg(short, long, required = true, num_args = 1..)]
        input: Vec<String>,

        // Name of the workload
        #[arg(short, long, default_value = "wc")]
        workload: String,

        /// How many of the most frequent words to report
        #[arg(short = 'n', long, default_value_t = 10)]
        top_n: i64,

        /// Size of the map worker pool; defaults to host concurrency
        #[arg(long)]
        workers: Option<usize>,

        /// Per-document timeout for map tasks, in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,

        /// What to do when a document cannot be acquired
        #[arg(long, value_enum, default_value = "fail-fast")]
        policy: AcquisitionPolicy,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Render the report as JSON instead of a text table
        #[arg(long)]
        json: bool,

        /// Auxiliary arguments to pass to the map/reduce application.
        #[clap(value_parser, last = true)]
        args: Vec<String>,
    },
}

/// One submitted word-frequency job.
#[derive(Debug, Clone)]
pub struct Job {
    pub inputs: Vec<String>,
    pub workload: String,
    pub args: Vec<String>,
}

/// Validated pipeline settings.
///
/// Construction rejects invalid arguments before any document is
/// processed, so a failed validation never produces partial output.
#[derive(Clone, Debug)]
pub struct PipelineConfig {
    top_n: usize,
    workers: usize,
    map_timeout: Option<Duration>,
}

impl PipelineConfig {
    pub fn new(
        top_n: i64,
        workers: Option<usize>,
        map_timeout: Option<Duration>,
    ) -> Result<Self, PipelineError> {
        if top_n <= 0 {
            return Err(PipelineError::InvalidArgument(format!(
                "top-n must be positive, got {top_n}"
            )));
        }
        let workers = match workers {
            Some(0) => {
                return Err(PipelineError::InvalidArgument(
                    "worker pool size must be positive".into(),
                ))
            }
            Some(n) => n,
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
        };
        Ok(Self {
            top_n: top_n as usize,
            workers,
            map_timeout,
        })
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn map_timeout(&self) -> Option<Duration> {
        self.map_timeout
    }
}

/// Drives one end-to-end map/shuffle/reduce/rank invocation.
///
/// A pipeline is not reentrant per invocation, but independent
/// pipelines share no state and may run concurrently.
pub struct Pipeline {
    job_id: Uuid,
    config: PipelineConfig,
    workload: Workload,
    stage: Stage,
    cancel: CancellationToken,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, workload: Workload) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            config,
            workload,
            stage: Stage::Idle,
            cancel: CancellationToken::new(),
        }
    }

    /// Returns a clone of the cancellation token for external control.
    ///
    /// Cancelling before `Done` aborts in-flight map tasks; the caller
    /// receives [`PipelineError::Cancelled`], never a partial result.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Run the pipeline over `docs` and yield the ranked list.
    #[tracing::instrument(
        name = "Run pipeline",
        skip_all,
        fields(job_id = %self.job_id, docs = docs.len())
    )]
    pub async fn run(
        &mut self,
        docs: Vec<Document>,
        aux_args: &[String],
    ) -> Result<RankedList, PipelineError> {
        let aux = serde_json::to_string(aux_args).map_err(|e| {
            self.stage = Stage::Failed;
            PipelineError::InvalidArgument(format!("bad auxiliary args: {e}"))
        })?;

        if self.cancel.is_cancelled() {
            self.stage = Stage::Failed;
            return Err(PipelineError::Cancelled { stage: Stage::Idle });
        }

        self.stage = Stage::MappingInFlight;
        tracing::info!(workers = self.config.workers(), "dispatching map tasks");
        let shuffler = Arc::new(Shuffler::new());
        let semaphore = Arc::new(Semaphore::new(self.config.workers()));
        let mut tasks: JoinSet<Result<(), PipelineError>> = JoinSet::new();

        for doc in docs {
            let shuffler = Arc::clone(&shuffler);
            let semaphore = Arc::clone(&semaphore);
            let cancel = self.cancel.clone();
            let workload = self.workload;
            let aux = aux.clone();
            let map_timeout = self.config.map_timeout();

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|_| PipelineError::Cancelled {
                        stage: Stage::MappingInFlight,
                    })?;
                if cancel.is_cancelled() {
                    return Err(PipelineError::Cancelled {
                        stage: Stage::MappingInFlight,
                    });
                }

                let id = doc.id().to_string();
                let worker_failure = |source: anyhow::Error| PipelineError::Worker {
                    id: id.clone(),
                    stage: Stage::MappingInFlight,
                    source,
                };

                // The map computation is pure and CPU-bound, so it runs
                // on the blocking pool.
                let compute = tokio::task::spawn_blocking(move || {
                    perform_map(&doc, &workload, &aux, &shuffler)
                });
                let joined = match map_timeout {
                    Some(limit) => tokio::time::timeout(limit, compute)
                        .await
                        .map_err(|_| worker_failure(anyhow!("map task exceeded {limit:?}")))?,
                    None => compute.await,
                };
                joined
                    .map_err(|join_err| worker_failure(anyhow!(join_err)))?
                    .map_err(worker_failure)
            });
        }

        let mut first_failure: Option<PipelineError> = None;
        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(join_err) => Err(PipelineError::Worker {
                    id: "<map task>".into(),
                    stage: Stage::MappingInFlight,
                    source: anyhow!(join_err),
                }),
            };
            if let Err(err) = outcome {
                // First failure wins; siblings then observe the
                // cancelled token and bail out quickly.
                if first_failure.is_none() {
                    self.cancel.cancel();
                    first_failure = Some(err);
                }
            }
        }
        if let Some(err) = first_failure {
            self.stage = Stage::Failed;
            return Err(err);
        }
        if self.cancel.is_cancelled() {
            self.stage = Stage::Failed;
            return Err(PipelineError::Cancelled {
                stage: Stage::MappingInFlight,
            });
        }

        self.stage = Stage::Shuffling;
        let shuffler =
            Arc::into_inner(shuffler).expect("all map tasks have completed before the shuffle");
        let grouped = shuffler.into_grouped();
        tracing::debug!(groups = grouped.len(), "shuffle complete");

        self.stage = Stage::Reducing;
        let reduced = perform_reduce(grouped, self.workload.reduce_fn, &aux).map_err(|source| {
            self.stage = Stage::Failed;
            PipelineError::Worker {
                id: "<reduce>".into(),
                stage: Stage::Reducing,
                source,
            }
        })?;

        self.stage = Stage::Ranking;
        let ranked = rank(&reduced, self.config.top_n());

        self.stage = Stage::Done;
        tracing::info!(distinct_words = reduced.len(), reported = ranked.len(), "pipeline done");
        Ok(ranked)
    }
}
