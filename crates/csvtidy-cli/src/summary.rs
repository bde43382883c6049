use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use csvtidy_cli::batch::BatchEntry;
use csvtidy_cli::pipeline::{PipelineOutcome, Stage, StageStatus, StageTransition};
use csvtidy_model::DatasetConfiguration;

/// Status line printed as each stage changes state.
pub fn print_transition(transition: &StageTransition) {
    println!(
        "[{}] {}: {} - {}",
        transition.timestamp, transition.stage, transition.status, transition.message
    );
}

pub fn print_outcome(outcome: &PipelineOutcome) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Stage"),
        header_cell("Status"),
        header_cell("Time"),
        header_cell("Details"),
    ]);
    apply_table_style(&mut table);
    for stage in Stage::ALL {
        let last = outcome
            .transitions
            .iter()
            .rev()
            .find(|transition| transition.stage == stage);
        match last {
            Some(transition) => table.add_row(vec![
                Cell::new(stage).add_attribute(Attribute::Bold),
                status_cell(transition.status),
                dim_cell(&transition.timestamp),
                Cell::new(&transition.message),
            ]),
            None => table.add_row(vec![
                dim_cell(stage),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("not run"),
            ]),
        };
    }
    println!("{table}");

    if let Some(stats) = &outcome.statistics {
        println!(
            "Rows: {} total, {} cleaned, {} skipped ({:.2}%)",
            stats.total_rows(),
            stats.cleaned_rows(),
            stats.skipped_rows(),
            stats.success_rate()
        );
    }
    if let Some(passed) = outcome.validation_passed() {
        println!(
            "Validation: {}",
            if passed { "passed" } else { "completed with findings" }
        );
    }
    println!("Output: {}", outcome.outputs.output_dir.display());

    if outcome.success {
        println!("Pipeline completed successfully");
    } else {
        let stage = outcome
            .failed_stage
            .map_or_else(|| "setup".to_string(), |stage| stage.to_string());
        eprintln!("Pipeline failed at {stage}");
        if let Some(error) = &outcome.error {
            eprintln!("error: {error}");
        }
    }
}

pub fn print_configuration(config: &DatasetConfiguration) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Property"), header_cell("Value")]);
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("File"), Cell::new(config.filepath().display())]);
    table.add_row(vec![
        Cell::new("Delimiter"),
        Cell::new(format!("{:?}", config.delimiter())),
    ]);
    table.add_row(vec![
        Cell::new("Quote character"),
        Cell::new(format!("{:?}", config.quote_char())),
    ]);
    table.add_row(vec![Cell::new("Encoding"), Cell::new(config.encoding())]);
    table.add_row(vec![Cell::new("Columns"), Cell::new(config.column_count())]);
    table.add_row(vec![Cell::new("Data rows"), Cell::new(config.row_count())]);
    for (kind, count) in config.quality_issues().iter() {
        table.add_row(vec![dim_cell(kind), count_cell(count)]);
    }
    table.add_row(vec![
        Cell::new("Needs cleaning").add_attribute(Attribute::Bold),
        if config.needs_cleaning() {
            Cell::new("yes").fg(Color::Yellow).add_attribute(Attribute::Bold)
        } else {
            Cell::new("no").fg(Color::Green)
        },
    ]);
    println!("{table}");
}

pub fn print_batch_summary(entries: &[BatchEntry]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Output"),
        header_cell("Error"),
    ]);
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth);
    if let Some(column) = table.column_mut(1) {
        column.set_cell_alignment(CellAlignment::Center);
    }
    for entry in entries {
        let status = if entry.success {
            Cell::new("SUCCESS").fg(Color::Green)
        } else {
            Cell::new("FAILED").fg(Color::Red).add_attribute(Attribute::Bold)
        };
        let error = match (&entry.failed_stage, &entry.error) {
            (Some(stage), Some(error)) => Cell::new(format!("{stage}: {error}")),
            (None, Some(error)) => Cell::new(error),
            _ => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(entry.input.display()),
            status,
            dim_cell(entry.output_dir.display()),
            error,
        ]);
    }
    let failed = entries.iter().filter(|entry| !entry.success).count();
    println!("{table}");
    println!(
        "Files: {}, succeeded: {}, failed: {failed}",
        entries.len(),
        entries.len() - failed
    );
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn status_cell(status: StageStatus) -> Cell {
    let color = match status {
        StageStatus::Success => Color::Green,
        StageStatus::Error => Color::Red,
        StageStatus::Skipped => Color::Yellow,
        StageStatus::Info => Color::DarkGrey,
    };
    Cell::new(status).fg(color).add_attribute(Attribute::Bold)
}

fn count_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
