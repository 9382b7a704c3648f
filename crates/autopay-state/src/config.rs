//! Runtime knobs for the stores

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Delays and bounds used by [`crate::AppState`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateConfig {
    /// Artificial settlement delay of a simulation
    #[serde(default = "default_simulation_delay_ms")]
    pub simulation_delay_ms: u64,

    /// Artificial delay of the mock wallet connection
    #[serde(default = "default_wallet_connect_delay_ms")]
    pub wallet_connect_delay_ms: u64,

    /// Notices kept in history
    #[serde(default = "default_notice_capacity")]
    pub notice_capacity: usize,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            simulation_delay_ms: default_simulation_delay_ms(),
            wallet_connect_delay_ms: default_wallet_connect_delay_ms(),
            notice_capacity: default_notice_capacity(),
        }
    }
}

impl StateConfig {
    /// No artificial delays, for tests and scripted runs
    pub fn instant() -> Self {
        Self {
            simulation_delay_ms: 0,
            wallet_connect_delay_ms: 0,
            ..Self::default()
        }
    }

    pub fn simulation_delay(&self) -> Duration {
        Duration::from_millis(self.simulation_delay_ms)
    }

    pub fn wallet_connect_delay(&self) -> Duration {
        Duration::from_millis(self.wallet_connect_delay_ms)
    }
}

fn default_simulation_delay_ms() -> u64 {
    2000
}

fn default_wallet_connect_delay_ms() -> u64 {
    1500
}

fn default_notice_capacity() -> usize {
    100
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: StateConfig = serde_json::from_str(r#"{"simulation_delay_ms": 10}"#).unwrap();
        assert_eq!(config.simulation_delay(), Duration::from_millis(10));
        assert_eq!(config.wallet_connect_delay(), Duration::from_millis(1500));
        assert_eq!(config.notice_capacity, 100);
    }
}
