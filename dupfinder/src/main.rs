//! Dupfinder CLI - list CSV records sharing a value in one column
//!
//! ```bash
//! dupfinder -i people.csv -o duplicates.csv -f id
//! ```
//!
//! Every outcome, including aborted runs, ends with a summary block on
//! stdout and a successful exit status.

use clap::Parser;
use dupfinder::{run, Console, RunConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dupfinder", version)]
#[command(
    about = "Find and list records with non-unique values in a specified field from a CSV file.",
    long_about = "Find and list records with non-unique values in a specified field from a CSV file.\n\
                  Checks for CSV headers and trims leading/trailing spaces from the target field."
)]
struct Cli {
    /// Path to the input CSV file
    #[arg(short, long = "input-file")]
    input_file: PathBuf,

    /// Path to save the output CSV file containing duplicate records
    #[arg(short, long = "output-file")]
    output_file: PathBuf,

    /// Name of the field (column header) to check for duplicates
    #[arg(short, long)]
    field: String,
}

fn main() {
    let cli = Cli::parse();
    let config = RunConfig::new(cli.input_file, cli.output_file, cli.field);

    run(&config, &mut Console::stdout());
}
