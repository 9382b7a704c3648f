//! Dashboard data: network stats and the live transaction feed

use autopay_types::{group_thousands, FeedTransaction, TokenAmount};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::seed;

/// Headline network numbers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkStats {
    pub total_agents: u64,
    pub total_payments: u64,
    pub active_simulations: u64,
    pub total_volume: TokenAmount,
    /// ETH
    pub gas_used: f64,
    pub block_height: u64,
}

impl Default for NetworkStats {
    fn default() -> Self {
        Self {
            total_agents: 24,
            total_payments: 8534,
            active_simulations: 12,
            total_volume: TokenAmount::from_tokens(124_890),
            gas_used: 0.0234,
            block_height: 2_847_521,
        }
    }
}

/// One tile of the stats grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatCard {
    pub title: &'static str,
    pub value: String,
    pub trend: Option<&'static str>,
    pub description: &'static str,
    pub highlight: bool,
}

impl NetworkStats {
    pub fn stat_cards(&self) -> Vec<StatCard> {
        vec![
            StatCard {
                title: "Total Agents",
                value: self.total_agents.to_string(),
                trend: Some("+5 this week"),
                description: "Registered AI agents",
                highlight: true,
            },
            StatCard {
                title: "Total Payments",
                value: group_thousands(self.total_payments),
                trend: Some("+18% this month"),
                description: "Onchain transactions",
                highlight: false,
            },
            StatCard {
                title: "Active Simulations",
                value: self.active_simulations.to_string(),
                trend: None,
                description: "Live agent interactions",
                highlight: false,
            },
            StatCard {
                title: "Total Volume",
                value: self.total_volume.to_grouped_string(),
                trend: Some("+12% this week"),
                description: "Tokens transacted",
                highlight: false,
            },
            StatCard {
                title: "Gas Used",
                value: format!("{} ETH", self.gas_used),
                trend: None,
                description: "Network fees paid",
                highlight: false,
            },
            StatCard {
                title: "Network Status",
                value: "ONLINE".to_string(),
                trend: None,
                description: "Monad blockchain",
                highlight: true,
            },
        ]
    }
}

/// Recent transactions shown on the dashboard
#[derive(Debug, Clone, Default)]
pub struct TransactionFeed {
    entries: Vec<FeedTransaction>,
}

impl TransactionFeed {
    pub fn new(entries: Vec<FeedTransaction>) -> Self {
        Self { entries }
    }

    /// Demo feed with ages measured from `now`
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::new(seed::feed(now))
    }

    pub fn entries(&self) -> &[FeedTransaction] {
        &self.entries
    }
}

/// `"3m ago"`; future timestamps read as `"0m ago"`
pub fn time_ago(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes().max(0);
    format!("{}m ago", minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use autopay_types::PaymentStatus;
    use chrono::Duration;

    #[test]
    fn test_stat_cards_formatting() {
        let cards = NetworkStats::default().stat_cards();
        let value = |title: &str| {
            cards
                .iter()
                .find(|c| c.title == title)
                .map(|c| c.value.clone())
                .unwrap_or_default()
        };
        assert_eq!(cards.len(), 6);
        assert_eq!(value("Total Payments"), "8,534");
        assert_eq!(value("Total Volume"), "124,890");
        assert_eq!(value("Gas Used"), "0.0234 ETH");
    }

    #[test]
    fn test_feed_ages() {
        let now = Utc::now();
        let feed = TransactionFeed::seeded(now);
        let ages: Vec<_> = feed
            .entries()
            .iter()
            .map(|tx| time_ago(now, tx.timestamp))
            .collect();
        assert_eq!(ages, vec!["1m ago", "3m ago", "7m ago", "12m ago"]);
        assert_eq!(feed.entries()[3].status, PaymentStatus::Pending);
    }

    #[test]
    fn test_time_ago_clamps_future() {
        let now = Utc::now();
        assert_eq!(time_ago(now, now + Duration::minutes(5)), "0m ago");
    }
}
