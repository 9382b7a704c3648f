//! Status command - Network and session summary

use autopay_state::AppState;

use super::print_json;
use crate::display;

pub fn show(state: &AppState, json: bool) -> anyhow::Result<()> {
    let summary = state.status_summary();
    if json {
        return print_json(&serde_json::json!({
            "session": summary,
            "network": state.stats,
        }));
    }

    display::section("Network Status");
    for card in state.stats.stat_cards() {
        match card.trend {
            Some(trend) => display::labeled(card.title, &format!("{} ({})", card.value, trend)),
            None => display::labeled(card.title, &card.value),
        }
    }

    display::section("Session");
    display::kv("Agents", &summary.agent_count.to_string());
    display::kv("Active agents", &summary.active_agent_count.to_string());
    display::kv("Payments on record", &summary.payment_count.to_string());
    display::kv("Started", &summary.started_at.to_rfc3339());
    Ok(())
}
