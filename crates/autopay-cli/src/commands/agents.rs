//! Agent commands - List, register and remove agents

use autopay_state::AppState;
use autopay_types::{Agent, AgentDraft};
use colored::*;

use super::{print_json, rejected};
use crate::display;

/// Print the registry as a table
pub fn list(state: &AppState, json: bool) -> anyhow::Result<()> {
    if json {
        return print_json(state.registry.agents());
    }

    display::section(&format!(
        "Agents ({} registered, {} active)",
        state.registry.len(),
        state.registry.active_count()
    ));
    for agent in state.registry.agents() {
        print_agent_row(agent);
    }
    println!();
    Ok(())
}

fn print_agent_row(agent: &Agent) {
    let status = if agent.status.is_active() {
        agent.status.to_string().bright_green()
    } else {
        agent.status.to_string().bright_black()
    };
    println!(
        "  {} {:<10} {:<20} {:<14} {:<14} {:>16}  {}",
        agent.role.icon(),
        agent.id.bright_yellow(),
        agent.name.bright_white(),
        agent.role.as_str(),
        agent.short_address(),
        agent.spending_limit.to_display_string().bright_cyan(),
        status
    );
}

/// Register an agent; the limit falls back to the default spending limit
pub fn register(
    state: &mut AppState,
    name: String,
    role: String,
    wallet: String,
    limit: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let limit = limit.unwrap_or_else(|| {
        state
            .settings
            .settings()
            .default_spending_limit
            .to_decimal_string()
    });
    let draft = AgentDraft::new(name, role, wallet, limit);
    let agent = state.register_agent(&draft).map_err(rejected)?;

    if json {
        return print_json(&agent);
    }
    display::kv("ID", &agent.id);
    display::kv("Wallet", &agent.wallet_address);
    display::kv("Spending limit", &agent.spending_limit.to_display_string());
    list(state, false)
}

/// Remove an agent by id
pub fn remove(state: &mut AppState, agent_id: &str, json: bool) -> anyhow::Result<()> {
    let agent = state.remove_agent(agent_id).map_err(rejected)?;
    if json {
        return print_json(&agent);
    }
    list(state, false)
}
