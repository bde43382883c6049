use anyhow::{Context, Result, bail};
use tracing::info_span;

use csvtidy_cli::batch::{BatchEntry, collect_inputs, run_batch};
use csvtidy_cli::pipeline::{Pipeline, PipelineOptions, PipelineOutcome};
use csvtidy_ingest::DialectDetector;
use csvtidy_model::DatasetConfiguration;

use crate::cli::{BatchArgs, CleanArgs, DetectArgs};
use crate::summary::print_transition;

pub fn run_clean(args: &CleanArgs) -> PipelineOutcome {
    let options = PipelineOptions::default()
        .with_output_dir(args.output_dir.clone())
        .with_force_clean(args.force);
    let mut pipeline = Pipeline::new(args.input.clone(), options);
    if !args.json {
        println!("File: {}", args.input.display());
        println!("Output: {}", pipeline.output_dir().display());
        pipeline = pipeline.with_observer(print_transition);
    }
    pipeline.run()
}

pub fn run_detect(args: &DetectArgs) -> Result<DatasetConfiguration> {
    let span = info_span!("detect", input = %args.input.display());
    let _guard = span.enter();
    DialectDetector::new(&args.input)
        .detect()
        .with_context(|| format!("detect configuration of {}", args.input.display()))
}

pub fn run_batch_command(args: &BatchArgs) -> Result<Vec<BatchEntry>> {
    let inputs = collect_inputs(&args.paths)?;
    if inputs.is_empty() {
        bail!("no CSV files found");
    }
    let total = inputs.len();
    Ok(run_batch(
        &inputs,
        args.output_dir.as_deref(),
        args.force,
        |index, input| {
            println!();
            println!("[{}/{total}] {}", index + 1, input.display());
        },
    ))
}
