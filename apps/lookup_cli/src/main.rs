use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{load_config, LookupController};
use shared::domain::{DisplayRow, Year};
use tracing_subscriber::EnvFilter;

/// Look up case details by acknowledgment number.
#[derive(Parser, Debug)]
struct Args {
    /// Acknowledgment number (last 5 digits).
    #[arg(long)]
    ack: String,
    #[arg(long, default_value = "2025")]
    year: Year,
    /// Overrides the configured lookup service address.
    #[arg(long)]
    base_url: Option<String>,
    /// Print the record as a JSON object instead of a table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut config = load_config();
    if let Some(base_url) = &args.base_url {
        config = config.with_base_url(base_url);
    }
    tracing::info!(base_url = %config.base_url, year = %args.year, "looking up case");
    let controller = LookupController::from_config(&config)
        .with_context(|| format!("failed to build lookup client for {}", config.base_url))?;

    match controller.submit(&args.ack, args.year).await {
        Ok(record) => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!("Case Details:");
                print!("{}", format_table(&record.rows()));
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            tracing::debug!(code = ?err.code(), %err, "lookup failed");
            eprintln!("{}", err.user_message());
            Ok(ExitCode::FAILURE)
        }
    }
}

fn format_table(rows: &[DisplayRow]) -> String {
    let width = rows
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0);
    rows.iter()
        .map(|row| format!("{:<width$}  {}\n", row.label, row.value))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(label: &str, value: &str) -> DisplayRow {
        DisplayRow {
            label: label.to_string(),
            value: value.to_string(),
        }
    }

    #[test]
    fn table_aligns_values_after_longest_label() {
        let table = format_table(&[
            row("Name", "Jane Doe"),
            row("Ack No", "12345"),
            row("Remarks", "-"),
        ]);
        assert_eq!(
            table,
            "Name     Jane Doe\nAck No   12345\nRemarks  -\n"
        );
    }

    #[test]
    fn empty_record_prints_nothing() {
        assert_eq!(format_table(&[]), "");
    }

    #[test]
    fn args_default_to_current_year() {
        let args = Args::try_parse_from(["lookup_cli", "--ack", "12345"]).expect("args");
        assert_eq!(args.year, Year::Y2025);
        assert!(!args.json);

        let args = Args::try_parse_from(["lookup_cli", "--ack", "1", "--year", "2024", "--json"])
            .expect("args");
        assert_eq!(args.year, Year::Y2024);
        assert!(args.json);

        assert!(Args::try_parse_from(["lookup_cli", "--ack", "1", "--year", "2023"]).is_err());
    }
}
