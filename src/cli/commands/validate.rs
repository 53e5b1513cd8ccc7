//! Validate command: load a contact file and print its validation report

use anyhow::{Context, Result};
use colored::*;
use serde::Serialize;
use tracing::info;

use super::shared::setup_logging;
use crate::app::models::{IndexStats, ValidationReport};
use crate::app::services::record_store::ContactStore;
use crate::app::services::row_parser::ParseStats;
use crate::app::services::validation_report::group_by_row;
use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::cli::input::resolve_contact_file;
use crate::config::{AppConfig, StoreConfig};

/// Everything the validate command reports
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutput {
    pub file: String,
    pub parse_stats: ParseStats,
    pub index: IndexStats,
    pub report: ValidationReport,
}

pub async fn run_validate(args: ValidateArgs) -> Result<()> {
    setup_logging(args.get_log_level(), args.quiet);

    let path = resolve_contact_file(&args.file)?;
    let defaults = AppConfig::from_env().context("Invalid environment configuration")?;
    let config = StoreConfig {
        source_path: path.clone(),
        index_threshold: args
            .index_threshold
            .unwrap_or(defaults.store.index_threshold),
        cache_capacity: defaults.store.cache_capacity,
    };

    let store = tokio::task::spawn_blocking(move || ContactStore::open(config))
        .await
        .context("Load task failed")?
        .with_context(|| format!("Failed to load contacts from {}", path.display()))?;

    let output = ValidationOutput {
        file: path.display().to_string(),
        parse_stats: store.parse_stats(),
        index: store.index_stats(),
        report: store.report(),
    };
    info!("{}", output.parse_stats.summary());

    match args.format {
        OutputFormat::Human => print!("{}", render_human(&output, args.show_rows)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialize report")?
        ),
    }

    if args.strict && output.report.invalid_rows > 0 {
        anyhow::bail!(
            "{} of {} rows failed validation",
            output.report.invalid_rows,
            output.report.total_rows
        );
    }
    Ok(())
}

/// Colored multi-section report
pub fn render_human(output: &ValidationOutput, show_rows: usize) -> String {
    let report = &output.report;
    let stats = &output.parse_stats;
    let mut text = String::new();

    text.push_str(&format!(
        "\n{}\n",
        "Contact File Validation".bright_green().bold()
    ));
    text.push_str(&format!("  File:          {}\n", output.file));
    text.push_str(&format!(
        "  Rows:          {} data, {} blank\n",
        stats.data_rows, stats.blank_rows
    ));
    text.push_str(&format!(
        "  Valid:         {}\n",
        report.valid_rows.to_string().bright_white().bold()
    ));

    let invalid = report.invalid_rows.to_string();
    let invalid = if report.invalid_rows > 0 {
        invalid.bright_red().bold()
    } else {
        invalid.bright_white().bold()
    };
    text.push_str(&format!("  Invalid:       {}\n", invalid));
    text.push_str(&format!("  Errors:        {}\n", report.errors.len()));
    text.push_str(&format!(
        "  Success rate:  {:.1}%\n",
        report.success_rate()
    ));
    text.push_str(&format!("  Read path:     {}\n", output.index.strategy));

    if report.is_clean() {
        text.push_str(&format!("\n{}\n", "All rows are valid.".bright_green()));
        return text;
    }

    text.push_str(&format!("\n{}\n", "Errors by field".bright_yellow().bold()));
    for (field, count) in &report.summary.errors_by_field {
        text.push_str(&format!("  {:<10} {}\n", field, count));
    }

    text.push_str(&format!("\n{}\n", "Most common errors".bright_yellow().bold()));
    for common in &report.summary.most_common_errors {
        text.push_str(&format!(
            "  {:>4}x  {}: {}\n",
            common.count, common.field, common.message
        ));
    }

    let by_row = group_by_row(&report.errors);
    text.push_str(&format!("\n{}\n", "Rejected rows".bright_yellow().bold()));
    for (row, errors) in by_row.iter().take(show_rows) {
        text.push_str(&format!("  Row {}\n", row.to_string().bright_white().bold()));
        for error in errors {
            text.push_str(&format!(
                "    [{}] {} = {:?}: {}\n",
                error.column, error.field, error.value, error.message
            ));
        }
    }
    if by_row.len() > show_rows {
        text.push_str(&format!(
            "  ... and {} more rows (use --format json for the full list)\n",
            by_row.len() - show_rows
        ));
    }

    text
}
