//! AutoPay State - In-memory stores and derived views for the console
//!
//! This crate provides the `AppState` shared by the terminal dashboard and
//! the CLI. It owns every store explicitly; nothing is global.
//!
//! # Architecture
//!
//! ```text
//! key press / CLI args
//!     → draft (AgentDraft, SimulationRequest)
//!     → AppState controller (register_agent, simulate, ...)
//!     → store mutation or ephemeral result + Notice
//!     → derived views (filter_logs, aggregate, stat_cards) → render
//! ```

pub mod config;
pub mod dashboard;
pub mod logs;
pub mod navigation;
pub mod notice;
pub mod registry;
pub mod seed;
pub mod settings;
pub mod simulation;
pub mod wallet;

use std::sync::Arc;

use autopay_types::{
    Agent, AgentDraft, Clock, IdGenerator, PaymentRecord, Result, SequentialIds, SimulationResult,
    SystemClock,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use config::StateConfig;
pub use dashboard::{time_ago, NetworkStats, StatCard, TransactionFeed};
pub use logs::{aggregate, export_json, filter_logs, LogFilter, LogSummary, PaymentLog, Selector};
pub use navigation::{Navigator, Route};
pub use notice::{Notice, NoticeLevel, NoticeLog, Notifier};
pub use registry::AgentRegistry;
pub use settings::SettingsStore;
pub use simulation::{PreparedSimulation, SimulationRequest, Simulator};
pub use wallet::{WalletConnector, WalletState, MOCK_WALLET_ADDRESS};

// ============================================================================
// Application State
// ============================================================================

/// Everything the console shows, owned in one place
///
/// Controllers (`register_agent`, `simulate`, ...) perform the action and
/// push a `Notice` describing the outcome.
pub struct AppState {
    pub registry: AgentRegistry,
    /// Read-only payment history
    pub payment_log: PaymentLog,
    /// Dashboard feed, independent of `payment_log`
    pub feed: TransactionFeed,
    pub stats: NetworkStats,
    pub settings: SettingsStore,
    pub simulator: Simulator,
    pub wallet: WalletConnector,
    pub notices: NoticeLog,
    /// Outcome of the latest simulation; view state only
    pub last_simulation: Option<SimulationResult>,
    sink: Option<Box<dyn Notifier>>,
    clock: Arc<dyn Clock>,
    started_at: DateTime<Utc>,
}

impl AppState {
    /// Seeded state on the wall clock
    pub fn new(config: StateConfig) -> Self {
        Self::with_parts(
            config,
            Arc::new(SystemClock),
            Arc::new(SequentialIds::starting_at(5)),
            Arc::new(SequentialIds::default()),
        )
    }

    /// Seeded state with explicit clock and id generators
    pub fn with_parts(
        config: StateConfig,
        clock: Arc<dyn Clock>,
        agent_ids: Arc<dyn IdGenerator>,
        simulation_ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let now = clock.now();
        Self {
            registry: AgentRegistry::seeded(agent_ids),
            payment_log: PaymentLog::seeded(),
            feed: TransactionFeed::seeded(now),
            stats: NetworkStats::default(),
            settings: SettingsStore::default(),
            simulator: Simulator::new(config.simulation_delay(), simulation_ids, clock.clone()),
            wallet: WalletConnector::new(config.wallet_connect_delay()),
            notices: NoticeLog::with_capacity(config.notice_capacity),
            last_simulation: None,
            sink: None,
            clock,
            started_at: now,
        }
    }

    /// Also forward every notice to `sink`
    pub fn with_notifier(mut self, sink: Box<dyn Notifier>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Stamp a notice from the state clock, record it and forward it to the sink
    pub fn notify(&mut self, mut notice: Notice) {
        notice.timestamp = self.clock.now();
        self.notices.notify(&notice);
        if let Some(sink) = self.sink.as_mut() {
            sink.notify(&notice);
        }
    }

    fn notify_outcome<T>(&mut self, outcome: &Result<T>, success: impl FnOnce(&T) -> Notice) {
        let notice = match outcome {
            Ok(value) => success(value),
            Err(err) => {
                tracing::warn!(code = err.error_code(), error = %err, "action rejected");
                Notice::from(err)
            }
        };
        self.notify(notice);
    }

    // ------------------------------------------------------------------------
    // Agents
    // ------------------------------------------------------------------------

    pub fn register_agent(&mut self, draft: &AgentDraft) -> Result<Agent> {
        let outcome = self.registry.register(draft);
        self.notify_outcome(&outcome, |agent| {
            Notice::info(
                "Agent Registered",
                format!(
                    "{} has been successfully registered as a {} agent.",
                    agent.name, agent.role
                ),
            )
        });
        outcome
    }

    pub fn remove_agent(&mut self, agent_id: &str) -> Result<Agent> {
        let outcome = self.registry.remove(agent_id);
        self.notify_outcome(&outcome, |agent| {
            Notice::info(
                "Agent Removed",
                format!("{} has been removed from the network.", agent.name),
            )
        });
        outcome
    }

    // ------------------------------------------------------------------------
    // Simulation
    // ------------------------------------------------------------------------

    /// Run a simulation against the current registry and record the outcome
    pub async fn simulate(&mut self, request: &SimulationRequest) -> Result<SimulationResult> {
        let agents = self.registry.agents().to_vec();
        let simulator = self.simulator.clone();
        let outcome = simulator.simulate(&agents, request).await;
        self.record_simulation(outcome)
    }

    /// Store a finished simulation as view state and announce it
    ///
    /// Used directly by callers that ran the simulator on a spawned task.
    pub fn record_simulation(
        &mut self,
        outcome: Result<SimulationResult>,
    ) -> Result<SimulationResult> {
        self.notify_outcome(&outcome, |result| {
            Notice::info(
                "Simulation Completed",
                format!(
                    "Payment of {} tokens processed successfully",
                    result.amount.to_decimal_string()
                ),
            )
        });
        if let Ok(result) = &outcome {
            self.last_simulation = Some(result.clone());
        }
        outcome
    }

    pub fn clear_simulation(&mut self) {
        self.last_simulation = None;
    }

    // ------------------------------------------------------------------------
    // Payment log
    // ------------------------------------------------------------------------

    pub fn filtered_logs(&self, filter: &LogFilter) -> Vec<&PaymentRecord> {
        filter_logs(self.payment_log.records(), filter)
    }

    pub fn log_summary(&self, filter: &LogFilter) -> LogSummary {
        aggregate(self.filtered_logs(filter))
    }

    // ------------------------------------------------------------------------
    // Settings
    // ------------------------------------------------------------------------

    pub fn save_settings(&mut self) {
        self.settings.save();
        self.notify(Notice::info(
            "Settings Saved",
            "Your configuration has been updated successfully.",
        ));
    }

    pub fn reset_settings(&mut self) {
        self.settings.reset();
        self.notify(Notice::info(
            "Settings Reset",
            "All settings have been reset to default values.",
        ));
    }

    /// Get system status summary
    pub fn status_summary(&self) -> StatusSummary {
        StatusSummary {
            agent_count: self.registry.len(),
            active_agent_count: self.registry.active_count(),
            payment_count: self.payment_log.len(),
            simulation_in_flight: self.simulator.is_busy(),
            uptime_seconds: (self.now() - self.started_at).num_seconds().max(0) as u64,
            started_at: self.started_at,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StateConfig::default())
    }
}

/// Header line for the dashboard and `--json` output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSummary {
    pub agent_count: usize,
    pub active_agent_count: usize,
    pub payment_count: usize,
    pub simulation_in_flight: bool,
    pub uptime_seconds: u64,
    pub started_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new(StateConfig::instant());
        let summary = state.status_summary();
        assert_eq!(summary.agent_count, 4);
        assert_eq!(summary.active_agent_count, 3);
        assert_eq!(summary.payment_count, 5);
        assert!(!summary.simulation_in_flight);
        assert!(state.notices.is_empty());
    }

    #[test]
    fn test_register_pushes_notice() {
        let mut state = AppState::new(StateConfig::instant());
        let draft = AgentDraft::new("StorageNode-Omega", "Storage", "0xomega", "300");
        state.register_agent(&draft).unwrap();
        let notice = state.notices.latest().unwrap();
        assert_eq!(notice.title, "Agent Registered");
        assert_eq!(
            notice.description,
            "StorageNode-Omega has been successfully registered as a Storage agent."
        );
    }

    #[test]
    fn test_remove_unknown_reports_not_found() {
        let mut state = AppState::new(StateConfig::instant());
        assert!(state.remove_agent("agent-999").is_err());
        let notice = state.notices.latest().unwrap();
        assert_eq!(notice.title, "Not Found");
        assert!(notice.is_error());
        assert!(!notice.description.contains("undefined"));
    }
}
