//! Running the pipeline over many files.
//!
//! Each file gets its own [`Pipeline`] with no state shared between runs.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, warn};

use crate::pipeline::{Pipeline, PipelineOptions, Stage};

/// Result of one file in a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchEntry {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub success: bool,
    pub failed_stage: Option<Stage>,
    pub error: Option<String>,
}

/// Expands command-line paths into input files.
///
/// A directory contributes its `*.csv` files (sorted, not recursive); any
/// other path is taken as given, so a missing file fails in its own run.
pub fn collect_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for path in paths {
        if path.is_dir() {
            let mut found = list_csv_files(path)?;
            if found.is_empty() {
                warn!(dir = %path.display(), "no CSV files in directory");
            }
            inputs.append(&mut found);
        } else {
            inputs.push(path.clone());
        }
    }
    Ok(inputs)
}

fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read {}", dir.display()))? {
        let path = entry.with_context(|| format!("read {}", dir.display()))?.path();
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"));
        if is_csv && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Output directory for one batch input.
///
/// With a shared root every input gets a subdirectory named after its file
/// stem, since output file names are fixed.
pub fn batch_output_dir(input: &Path, root: Option<&Path>) -> Option<PathBuf> {
    let root = root?;
    let stem = input
        .file_stem()
        .map_or_else(|| "dataset".into(), |stem| stem.to_string_lossy());
    Some(root.join(&*stem))
}

/// Runs one pipeline per input, in order.
pub fn run_batch<F>(
    inputs: &[PathBuf],
    output_root: Option<&Path>,
    force_clean: bool,
    mut on_start: F,
) -> Vec<BatchEntry>
where
    F: FnMut(usize, &Path),
{
    let mut entries = Vec::with_capacity(inputs.len());
    for (index, input) in inputs.iter().enumerate() {
        on_start(index, input);
        let options = PipelineOptions::default()
            .with_output_dir(batch_output_dir(input, output_root))
            .with_force_clean(force_clean);
        let mut pipeline = Pipeline::new(input.clone(), options);
        let output_dir = pipeline.output_dir();
        let outcome = pipeline.run();
        entries.push(BatchEntry {
            input: input.clone(),
            output_dir,
            success: outcome.success,
            failed_stage: outcome.failed_stage,
            error: outcome.error,
        });
    }
    let failed = entries.iter().filter(|entry| !entry.success).count();
    info!(files = entries.len(), failed, "batch finished");
    entries
}
