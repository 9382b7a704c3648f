//! Simulate command - Run one simulated payment

use std::time::Duration;

use autopay_state::{AppState, SimulationRequest};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use super::{print_json, rejected};
use crate::display;

pub async fn run(
    state: &mut AppState,
    from: String,
    to: String,
    service: String,
    units: String,
    json: bool,
) -> anyhow::Result<()> {
    let request = SimulationRequest::new(from, to, service, units);

    let spinner = (!json).then(|| {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.set_message(match request.preview() {
            Some(amount) => format!("Simulating payment of {}...", amount.to_display_string()),
            None => "Simulating payment...".to_string(),
        });
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    });

    let outcome = state.simulate(&request).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let result = outcome.map_err(rejected)?;

    if json {
        return print_json(&result);
    }

    display::section("Simulation Results");
    display::labeled("Status", &display::status(result.status).to_string());
    display::labeled("Transaction", &result.transaction_id);
    display::labeled(
        "From",
        &format!("{} {}", result.sender.role.icon(), result.sender.name),
    );
    display::labeled(
        "To",
        &format!("{} {}", result.recipient.role.icon(), result.recipient.name),
    );
    display::labeled(
        "Service",
        &format!(
            "{} ({} tokens/unit)",
            result.service_type.label(),
            result.service_type.rate().to_decimal_string()
        ),
    );
    display::labeled("Units", &result.usage_units.to_string());
    println!(
        "  {}: {}",
        "Amount".bright_white(),
        result.amount.to_display_string().bright_green().bold()
    );
    display::labeled("Time", &result.timestamp.to_rfc3339());
    println!();
    display::info("Simulated payments are not recorded in the payment log");
    Ok(())
}
