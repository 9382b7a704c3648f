//! Logs command - Search, filter, summarize and export payments

use std::path::PathBuf;

use anyhow::Context;
use autopay_state::{export_json, AppState, LogFilter, LogSummary, Selector};
use autopay_types::{PaymentRecord, PaymentStatus, ServiceType};
use colored::*;
use serde::Serialize;

use super::print_json;
use crate::display;

#[derive(Serialize)]
struct LogsOutput<'a> {
    filter: &'a LogFilter,
    summary: LogSummary,
    records: Vec<&'a PaymentRecord>,
}

pub fn show(
    state: &AppState,
    search: String,
    service: Selector<ServiceType>,
    status: Selector<PaymentStatus>,
    export: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let filter = LogFilter {
        search,
        service,
        status,
    };
    let records = state.filtered_logs(&filter);
    let summary = state.log_summary(&filter);

    if let Some(path) = export.as_ref() {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
        std::fs::write(path, export_json(&records)?)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!(path = %path.display(), count = records.len(), "payment logs exported");
    }

    if json {
        return print_json(&LogsOutput {
            filter: &filter,
            summary,
            records,
        });
    }

    display::section("Payment Logs");
    display::kv("Search", if filter.search.is_empty() { "-" } else { filter.search.as_str() });
    display::kv("Service", &filter.service.to_string());
    display::kv("Status", &filter.status.to_string());
    println!();

    if records.is_empty() {
        display::warning("No transactions match the current filters");
    }
    for record in &records {
        println!(
            "  {:<7} {}  {} {:<18} → {} {:<18} {:<8} {:>5}  {:>10}  {}",
            record.id.bright_yellow(),
            record.timestamp.format("%Y-%m-%d %H:%M").to_string().bright_black(),
            record.sender_role.icon(),
            record.sender,
            record.recipient_role.icon(),
            record.recipient,
            record.service_type.as_str(),
            record.units,
            record.amount.to_decimal_string().bright_cyan(),
            display::status(record.status)
        );
    }

    println!();
    display::labeled("Total Transactions", &summary.count.to_string());
    display::labeled("Total Volume", &summary.volume.to_display_string());
    display::labeled("Success Rate", &summary.success_rate_display());

    if let Some(path) = export {
        display::success(&format!("Exported {} records to {}", records.len(), path.display()));
    }
    Ok(())
}
