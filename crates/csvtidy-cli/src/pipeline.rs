//! Cleaning pipeline with explicit stages.
//!
//! The pipeline runs these stages in order, stopping at the first failure:
//! 1. **Detect**: infer the dataset configuration
//! 2. **Analyze**: write the pre-cleaning analysis report
//! 3. **Clean**: rewrite the file, skipped when nothing needs cleaning
//! 4. **Validate**: check the cleaned file, skipped when there is none
//!
//! Output files from stages that completed are left in place when a later
//! stage fails. Validation findings are reported, not treated as failure.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use serde::Serialize;
use tracing::{error, info, info_span, warn};

use csvtidy_ingest::DialectDetector;
use csvtidy_model::{AnalysisStats, CleaningStatistics, DatasetConfiguration, ValidationReport};
use csvtidy_report::{
    render_analysis_report, render_cleaning_report, render_validation_report, write_report,
};
use csvtidy_transform::FileRewriter;
use csvtidy_validate::{IntegrityValidator, QualityAnalyzer};

use crate::run_log::{RunLog, RunLogLevel};

// ============================================================================
// Output names
// ============================================================================

pub const CLEANED_FILE_NAME: &str = "dataset_cleaned.csv";
pub const CLEANING_REPORT_NAME: &str = "dataset_cleaning_report.txt";
pub const ANALYSIS_REPORT_NAME: &str = "dataset_analysis_report.txt";
pub const VALIDATION_REPORT_NAME: &str = "dataset_validation_report.txt";
pub const RUN_LOG_NAME: &str = "dataset_cleaning.log";

/// Fixed-name files a run writes into its output directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub output_dir: PathBuf,
    pub cleaned: PathBuf,
    pub cleaning_report: PathBuf,
    pub analysis_report: PathBuf,
    pub validation_report: PathBuf,
    pub run_log: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            cleaned: output_dir.join(CLEANED_FILE_NAME),
            cleaning_report: output_dir.join(CLEANING_REPORT_NAME),
            analysis_report: output_dir.join(ANALYSIS_REPORT_NAME),
            validation_report: output_dir.join(VALIDATION_REPORT_NAME),
            run_log: output_dir.join(RUN_LOG_NAME),
        }
    }
}

// ============================================================================
// Stages and transitions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    Detect,
    Analyze,
    Clean,
    Validate,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Detect, Stage::Analyze, Stage::Clean, Stage::Validate];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Detect => "DETECT",
            Self::Analyze => "ANALYZE",
            Self::Clean => "CLEAN",
            Self::Validate => "VALIDATE",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageStatus {
    /// Stage started.
    Info,
    Success,
    Error,
    /// Stage had nothing to do; counts as success.
    Skipped,
}

impl StageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Success => "SUCCESS",
            Self::Error => "ERROR",
            Self::Skipped => "SKIPPED",
        }
    }

    fn log_level(self) -> RunLogLevel {
        match self {
            Self::Error => RunLogLevel::Error,
            Self::Skipped => RunLogLevel::Warning,
            Self::Info | Self::Success => RunLogLevel::Info,
        }
    }
}

impl fmt::Display for StageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One recorded state change of a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageTransition {
    pub stage: Stage,
    pub status: StageStatus,
    /// Local wall-clock time, `HH:MM:SS`.
    pub timestamp: String,
    pub message: String,
}

// ============================================================================
// Options and outcome
// ============================================================================

/// Run-level options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    /// Output directory; defaults to the input's directory.
    pub output_dir: Option<PathBuf>,
    /// Rewrite even when detection found nothing to clean.
    pub force_clean: bool,
}

impl PipelineOptions {
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: Option<PathBuf>) -> Self {
        self.output_dir = output_dir;
        self
    }

    #[must_use]
    pub fn with_force_clean(mut self, force_clean: bool) -> Self {
        self.force_clean = force_clean;
        self
    }
}

/// Everything one run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub input: PathBuf,
    pub success: bool,
    pub failed_stage: Option<Stage>,
    pub error: Option<String>,
    pub transitions: Vec<StageTransition>,
    pub configuration: Option<DatasetConfiguration>,
    pub analysis: Option<AnalysisStats>,
    pub statistics: Option<CleaningStatistics>,
    pub validation: Option<ValidationReport>,
    pub outputs: OutputPaths,
}

impl PipelineOutcome {
    fn new(input: &Path, outputs: OutputPaths) -> Self {
        Self {
            input: input.to_path_buf(),
            success: false,
            failed_stage: None,
            error: None,
            transitions: Vec::new(),
            configuration: None,
            analysis: None,
            statistics: None,
            validation: None,
            outputs,
        }
    }

    /// Whether validation ran and every check passed.
    pub fn validation_passed(&self) -> Option<bool> {
        self.validation.as_ref().map(ValidationReport::passed)
    }
}

// ============================================================================
// Pipeline
// ============================================================================

type TransitionObserver = Box<dyn FnMut(&StageTransition)>;

/// One file's run through every stage.
pub struct Pipeline {
    input: PathBuf,
    options: PipelineOptions,
    observer: Option<TransitionObserver>,
}

impl Pipeline {
    pub fn new(input: impl Into<PathBuf>, options: PipelineOptions) -> Self {
        Self {
            input: input.into(),
            options,
            observer: None,
        }
    }

    /// Calls `observer` for every transition as it happens.
    #[must_use]
    pub fn with_observer(mut self, observer: impl FnMut(&StageTransition) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Directory the run writes into.
    pub fn output_dir(&self) -> PathBuf {
        match &self.options.output_dir {
            Some(dir) => dir.clone(),
            None => default_output_dir(&self.input),
        }
    }

    /// Runs every stage. Never panics on bad input; failures are reported in
    /// the outcome.
    pub fn run(&mut self) -> PipelineOutcome {
        let start = Instant::now();
        let input = self.input.clone();
        let output_dir = self.output_dir();
        let force_clean = self.options.force_clean;
        let run_span = info_span!("pipeline", input = %input.display());
        let _run_guard = run_span.enter();

        let mut run = Run {
            outcome: PipelineOutcome::new(&input, OutputPaths::in_dir(&output_dir)),
            log: RunLog::disabled(),
            observer: self.observer.as_mut(),
        };

        // Missing input: nothing is created, DETECT reports the failure.
        if input.exists()
            && let Err(error) = fs::create_dir_all(&output_dir)
        {
            let message = format!("cannot create output directory {}: {error}", output_dir.display());
            error!(%message, "pipeline aborted");
            run.outcome.error = Some(message);
            return run.outcome;
        }
        if output_dir.is_dir() {
            run.log = match RunLog::open(&run.outcome.outputs.run_log) {
                Ok(log) => log,
                Err(error) => {
                    warn!(%error, "run log unavailable");
                    RunLog::disabled()
                }
            };
        }
        run.log.info(&format!("Starting cleaning run for {}", input.display()));

        run.outcome.success = run.execute(&input, force_clean);

        let verdict = if run.outcome.success { "completed" } else { "failed" };
        run.log.info(&format!("Cleaning run {verdict} for {}", input.display()));
        info!(
            success = run.outcome.success,
            duration_ms = start.elapsed().as_millis(),
            "pipeline finished"
        );
        run.outcome
    }
}

/// Runs the pipeline for `filepath` and reports plain success.
///
/// Errors are logged and turned into `false`; nothing propagates.
pub fn execute(filepath: &Path, output_dir: Option<&Path>, force_clean: bool) -> bool {
    let options = PipelineOptions::default()
        .with_output_dir(output_dir.map(Path::to_path_buf))
        .with_force_clean(force_clean);
    Pipeline::new(filepath, options).run().success
}

/// The input's parent directory, or `.` for a bare file name.
pub fn default_output_dir(input: &Path) -> PathBuf {
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

struct Run<'a> {
    outcome: PipelineOutcome,
    log: RunLog,
    observer: Option<&'a mut TransitionObserver>,
}

impl Run<'_> {
    fn execute(&mut self, input: &Path, force_clean: bool) -> bool {
        let Some(config) = self.stage(Stage::Detect, |run| run.detect(input)) else {
            return false;
        };
        self.outcome.configuration = Some(config.clone());

        if self.stage(Stage::Analyze, |run| run.analyze(input, &config)).is_none() {
            return false;
        }
        if self
            .stage(Stage::Clean, |run| run.clean(input, &config, force_clean))
            .is_none()
        {
            return false;
        }
        self.stage(Stage::Validate, |run| run.validate(input, &config))
            .is_some()
    }

    /// Records the start, runs `body`, then records SUCCESS or ERROR unless
    /// `body` already closed the stage (SKIPPED).
    fn stage<T>(
        &mut self,
        stage: Stage,
        body: impl FnOnce(&mut Self) -> Result<StageResult<T>>,
    ) -> Option<T> {
        let span = info_span!("stage", stage = %stage);
        let _guard = span.enter();
        let start = Instant::now();
        self.transition(stage, StageStatus::Info, "started");

        match body(self) {
            Ok(StageResult::Done(value, message)) => {
                self.transition(stage, StageStatus::Success, &message);
                info!(duration_ms = start.elapsed().as_millis(), "stage complete");
                Some(value)
            }
            Ok(StageResult::Skipped(value, message)) => {
                self.transition(stage, StageStatus::Skipped, &message);
                Some(value)
            }
            Err(err) => {
                let message = format!("{err:#}");
                error!(error = %message, "stage failed");
                self.transition(stage, StageStatus::Error, &message);
                self.outcome.failed_stage = Some(stage);
                self.outcome.error = Some(message);
                None
            }
        }
    }

    fn transition(&mut self, stage: Stage, status: StageStatus, message: &str) {
        let transition = StageTransition {
            stage,
            status,
            timestamp: Local::now().format("%H:%M:%S").to_string(),
            message: message.to_string(),
        };
        self.log
            .record(status.log_level(), &format!("{stage}: {status} - {message}"));
        if let Some(observer) = self.observer.as_mut() {
            observer(&transition);
        }
        self.outcome.transitions.push(transition);
    }

    fn detect(&mut self, input: &Path) -> Result<StageResult<DatasetConfiguration>> {
        let config = DialectDetector::new(input)
            .detect()
            .with_context(|| format!("detect configuration of {}", input.display()))?;
        let message = format!(
            "delimiter {:?}, quote {:?}, encoding {}, {} columns, {} rows, {} issues",
            config.delimiter(),
            config.quote_char(),
            config.encoding(),
            config.column_count(),
            config.row_count(),
            config.total_issues()
        );
        Ok(StageResult::Done(config, message))
    }

    fn analyze(&mut self, input: &Path, config: &DatasetConfiguration) -> Result<StageResult<()>> {
        let stats = QualityAnalyzer::new(config)
            .analyze(input)
            .with_context(|| format!("analyze {}", input.display()))?;
        let path = &self.outcome.outputs.analysis_report;
        write_report(path, &render_analysis_report(input, config, &stats))?;
        let message = format!("{} issues, report {}", stats.issue_count(), path.display());
        self.outcome.analysis = Some(stats);
        Ok(StageResult::Done((), message))
    }

    fn clean(
        &mut self,
        input: &Path,
        config: &DatasetConfiguration,
        force_clean: bool,
    ) -> Result<StageResult<()>> {
        if !config.needs_cleaning() && !force_clean {
            return Ok(StageResult::Skipped((), "dataset needs no cleaning".to_string()));
        }

        let outputs = self.outcome.outputs.clone();
        let log = &mut self.log;
        let stats = FileRewriter::new(config)
            .rewrite_with_progress(input, &outputs.cleaned, |rows| {
                log.info(&format!("Processed {rows} lines"));
            })
            .with_context(|| format!("rewrite {} to {}", input.display(), outputs.cleaned.display()))?;

        let report = render_cleaning_report(input, &outputs.cleaned, &stats, Local::now().date_naive());
        write_report(&outputs.cleaning_report, &report)?;
        let message = format!(
            "{} of {} rows written to {}",
            stats.cleaned_rows(),
            stats.total_rows(),
            outputs.cleaned.display()
        );
        self.outcome.statistics = Some(stats);
        Ok(StageResult::Done((), message))
    }

    fn validate(&mut self, input: &Path, config: &DatasetConfiguration) -> Result<StageResult<()>> {
        let outputs = self.outcome.outputs.clone();
        if !outputs.cleaned.exists() {
            return Ok(StageResult::Skipped((), "no cleaned dataset to validate".to_string()));
        }

        let report = IntegrityValidator::new(config)
            .validate(input, &outputs.cleaned)
            .with_context(|| format!("validate {}", outputs.cleaned.display()))?;
        write_report(
            &outputs.validation_report,
            &render_validation_report(input, &outputs.cleaned, &report),
        )?;
        let message = if report.passed() {
            "all checks passed".to_string()
        } else {
            format!(
                "completed with findings (structure {}, encoding {}, integrity {})",
                check_label(report.structure.passed()),
                check_label(report.encoding.passed()),
                check_label(report.integrity.passed())
            )
        };
        if !report.passed() {
            self.log.warning(&format!("Validation findings for {}", outputs.cleaned.display()));
        }
        self.outcome.validation = Some(report);
        Ok(StageResult::Done((), message))
    }
}

/// How a stage body finished without error.
enum StageResult<T> {
    Done(T, String),
    Skipped(T, String),
}

fn check_label(passed: bool) -> &'static str {
    if passed { "ok" } else { "failed" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_output_dir() {
        assert_eq!(default_output_dir(Path::new("data/raw.csv")), PathBuf::from("data"));
        assert_eq!(default_output_dir(Path::new("raw.csv")), PathBuf::from("."));
    }

    #[test]
    fn test_output_paths() {
        let paths = OutputPaths::in_dir(Path::new("out"));
        assert_eq!(paths.cleaned, PathBuf::from("out/dataset_cleaned.csv"));
        assert_eq!(paths.run_log, PathBuf::from("out/dataset_cleaning.log"));
    }

    #[test]
    fn test_stage_names() {
        let names: Vec<&str> = Stage::ALL.iter().copied().map(Stage::as_str).collect();
        assert_eq!(names, vec!["DETECT", "ANALYZE", "CLEAN", "VALIDATE"]);
        assert_eq!(
            serde_json::to_string(&StageStatus::Skipped).unwrap(),
            "\"SKIPPED\""
        );
    }
}
