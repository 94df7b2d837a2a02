// End-to-end runs of the duplicate finder against real files on disk.
//
// Each test writes an input CSV into a temporary directory, runs the full
// pipeline with a captured console and checks the summary, the console
// text and the output file.

use dupfinder::{run, Console, RunConfig, RunStatus, SummaryReport};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

// =============================================================================
// Helpers
// =============================================================================

struct Run {
    report: SummaryReport,
    console: String,
    output: PathBuf,
    _dir: TempDir,
}

impl Run {
    fn output_text(&self) -> Option<String> {
        fs::read_to_string(&self.output).ok()
    }
}

fn run_with(content: &str, field: &str) -> Run {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("duplicates.csv");
    fs::write(&input, content).unwrap();

    let mut console = Console::new(Vec::new());
    let report = run(&RunConfig::new(&input, &output, field), &mut console);

    Run {
        report,
        console: String::from_utf8(console.into_inner()).unwrap(),
        output,
        _dir: dir,
    }
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn repeated_id_is_reported_with_every_occurrence() {
    let run = run_with("id,name\n1,Alice\n2,Bob\n1,Carol\n", "id");

    assert_eq!(run.report.total_records(), Some(3));
    assert_eq!(run.report.impacted, 2);
    assert_eq!(run.output_text().unwrap(), "id,name\n1,Alice\n1,Carol\n");
    assert!(run.console.contains("Total Records Processed: 3"));
    assert!(run.console.contains("Impacted Records (Duplicates Found): 2"));
}

#[test]
fn empty_file_reports_zero_without_output() {
    let run = run_with("", "id");

    assert_eq!(run.report.status, RunStatus::Empty);
    assert_eq!(run.report.total_records(), Some(0));
    assert_eq!(run.report.impacted, 0);
    assert!(run.output_text().is_none());
    assert!(run.console.contains("is empty"));
}

#[test]
fn headerless_file_is_aborted() {
    let run = run_with("1,2,3\n4,5,6\n", "1");

    assert_eq!(run.report.status, RunStatus::Aborted);
    assert_eq!(run.report.impacted, 0);
    assert!(run.output_text().is_none());
    assert!(run.console.contains("does not appear to have a header row"));
    assert!(run.console.contains("Total Records Processed: N/A (Header missing)"));
    assert!(run.console.contains("Impacted Records (Duplicates Found): 0 (Processing aborted)"));
}

#[test]
fn unknown_field_lists_available_columns() {
    let run = run_with("id,name\n1,Alice\n2,Bob\n1,Carol\n", "foo");

    assert_eq!(run.report.status, RunStatus::Aborted);
    assert_eq!(run.report.total_records(), Some(3));
    assert_eq!(run.report.impacted, 0);
    assert!(run.console.contains("['id', 'name']"));
    assert!(run.console.contains("0 (Specified field not found)"));
    assert!(run.output_text().is_none());
}

#[test]
fn trailing_space_matches_and_nulls_are_excluded() {
    let run = run_with("id,code\n1,x \n2,x\n3,\n4,\n", "code");

    assert_eq!(run.report.total_records(), Some(4));
    assert_eq!(run.report.impacted, 2);
    assert_eq!(run.output_text().unwrap(), "id,code\n1,x\n2,x\n");
}

#[test]
fn numeric_column_compares_rendered_values() {
    let run = run_with("id,name\n 7 ,a\n7,b\n8,c\n", "id");

    assert_eq!(run.report.impacted, 2);
    assert_eq!(run.output_text().unwrap(), "id,name\n7,a\n7,b\n");
}

#[test]
fn numeric_column_with_nulls_renders_as_float() {
    let run = run_with("id,amount\n1,10\n2,\n3,10.0\n", "amount");

    assert_eq!(run.report.impacted, 2);
    assert_eq!(run.output_text().unwrap(), "id,amount\n1,10.0\n3,10.0\n");
}

#[test]
fn only_nulls_means_no_duplicates() {
    let run = run_with("id,v\n1,\n2,\n3,NA\n", "v");

    assert_eq!(run.report.status, RunStatus::Completed);
    assert_eq!(run.report.impacted, 0);
    assert!(run.output_text().is_none());
    assert!(run.console.contains("No duplicate 'v' values found"));
}

#[test]
fn other_columns_keep_original_text() {
    let run = run_with("id,note\n1,\"x y\"\n1,\"a, b\"\n", "id");

    assert_eq!(run.output_text().unwrap(), "id,note\n1,x y\n1,\"a, b\"\n");
}

#[test]
fn never_filled_trailing_column_is_padded() {
    let rows: String = (0..30).map(|i| format!("{},n{}\n", i, i % 3)).collect();
    let run = run_with(&format!("id,name,note\n{}", rows), "name");

    assert_eq!(run.report.status, RunStatus::Completed);
    assert_eq!(run.report.total_records(), Some(30));
    assert_eq!(run.report.impacted, 30);
    assert!(run
        .output_text()
        .unwrap()
        .starts_with("id,name,note\n0,n0,\n1,n1,\n"));
}

#[test]
fn total_counts_every_data_row() {
    let rows: String = (0..250).map(|i| format!("{},name{}\n", i, i % 7)).collect();
    let run = run_with(&format!("id,name\n{}", rows), "name");

    assert_eq!(run.report.total_records(), Some(250));
    assert_eq!(run.report.impacted, 250);
}

#[test]
fn repeated_runs_are_identical() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("input.csv");
    let output = dir.path().join("duplicates.csv");
    fs::write(&input, "sku,qty\nA1 ,3\nB2,4\nA1,5\nB2 ,6\n").unwrap();
    let config = RunConfig::new(&input, &output, "sku");

    let mut first_console = Console::new(Vec::new());
    let first_report = run(&config, &mut first_console);
    let first_output = fs::read(&output).unwrap();

    let mut second_console = Console::new(Vec::new());
    let second_report = run(&config, &mut second_console);
    let second_output = fs::read(&output).unwrap();

    assert_eq!(first_report, second_report);
    assert_eq!(first_output, second_output);
    assert_eq!(first_console.into_inner(), second_console.into_inner());
    assert_eq!(first_report.impacted, 4);
}
