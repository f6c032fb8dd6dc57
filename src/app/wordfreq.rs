use anyhow::Result;
use clap::Parser;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;
use wordfreq::pipeline::{Args, Commands, Job, Pipeline, PipelineConfig};
use wordfreq::source::AcquisitionPolicy;
use wordfreq::{report, source, telemetry, workload};

struct Options {
    config: PipelineConfig,
    policy: AcquisitionPolicy,
    output: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Result<(Job, Options)> {
    let args = Args::parse();
    match args.command {
        Commands::Run {
            input,
            workload,
            top_n,
            workers,
            timeout_secs,
            policy,
            output,
            json,
            args,
        } => {
            let config =
                PipelineConfig::new(top_n, workers, timeout_secs.map(Duration::from_secs))?;
            Ok((
                Job {
                    inputs: input,
                    workload,
                    args,
                },
                Options {
                    config,
                    policy,
                    output,
                    json,
                },
            ))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let (job, options) = parse_args()?;
    let engine = workload::named(&job.workload)?;

    let docs = source::load_documents(&job.inputs, options.policy).await?;
    let mut pipeline = Pipeline::new(options.config, engine);
    let ranked = pipeline.run(docs, &job.args).await?;

    let mut out: Box<dyn Write> = match &options.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(std::io::stdout().lock()),
    };
    if options.json {
        report::render_json(&ranked, &mut out)?;
    } else {
        report::render_table(&ranked, &mut out)?;
    }
    Ok(())
}
