pub mod exec;
pub mod login;
pub mod logout;
pub mod shell;
pub mod start;
pub mod status;
pub mod tables;

use sqlrunner_core::models::{QueryOutcome, TableDetail};

/// Print a query outcome, one JSON row per line.
pub(crate) fn print_outcome(outcome: &QueryOutcome) {
    match outcome {
        QueryOutcome::Success {
            rows,
            execution_time,
        } => {
            for row in rows {
                println!("{}", row);
            }
            match execution_time {
                Some(seconds) => println!("{} row(s) in {:.4}s", rows.len(), seconds),
                None => println!("{} row(s)", rows.len()),
            }
        }
        QueryOutcome::Failure { error } => {
            println!("Error: {}", error);
        }
    }
}

/// Print a table's schema and sample rows.
pub(crate) fn print_table_detail(detail: &TableDetail) {
    println!("Table: {}", detail.name);
    println!();
    println!("{:<30} {:<20}", "COLUMN", "TYPE");
    println!("{}", "-".repeat(50));
    for column in &detail.columns {
        println!("{:<30} {:<20}", column.name, column.type_name);
    }

    if !detail.sample_data.is_empty() {
        println!();
        println!("Sample rows:");
        for row in &detail.sample_data {
            println!("  {}", row);
        }
    }
}
