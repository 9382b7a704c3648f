//! Payment log store and its derived views
//!
//! The log is read-only. Filtering and aggregation are pure functions over
//! a slice of records so they can be recomputed on every frame.

use std::fmt;
use std::str::FromStr;

use autopay_types::{AutopayError, PaymentRecord, PaymentStatus, ServiceType, TokenAmount};
use serde::{Deserialize, Serialize};

use crate::seed;

/// Sentinel accepted by [`Selector::from_str`] for "no restriction"
pub const ALL_SENTINEL: &str = "all";

/// Static payment history
#[derive(Debug, Clone, Default)]
pub struct PaymentLog {
    records: Vec<PaymentRecord>,
}

impl PaymentLog {
    pub fn new(records: Vec<PaymentRecord>) -> Self {
        Self { records }
    }

    /// The built-in demo history
    pub fn seeded() -> Self {
        Self::new(seed::payment_log())
    }

    pub fn records(&self) -> &[PaymentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Either every value, or exactly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T: PartialEq + Copy> Selector<T> {
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == value,
        }
    }

    /// Step through `All` then each option in turn
    pub fn cycle(&self, options: &[T]) -> Self {
        match self {
            Self::All => options.first().map_or(Self::All, |first| Self::Only(*first)),
            Self::Only(current) => match options.iter().position(|o| o == current) {
                Some(i) if i + 1 < options.len() => Self::Only(options[i + 1]),
                _ => Self::All,
            },
        }
    }
}

impl<T: FromStr<Err = AutopayError>> FromStr for Selector<T> {
    type Err = AutopayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL_SENTINEL) {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("All"),
            Self::Only(value) => value.fmt(f),
        }
    }
}

/// Criteria applied to the payment log
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFilter {
    /// Case-insensitive substring of sender, recipient or id
    pub search: String,
    pub service: Selector<ServiceType>,
    pub status: Selector<PaymentStatus>,
}

impl LogFilter {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: term.into(),
            ..Self::default()
        }
    }

    pub fn matches(&self, record: &PaymentRecord) -> bool {
        let term = self.search.to_lowercase();
        let matches_search = term.is_empty()
            || record.sender.to_lowercase().contains(&term)
            || record.recipient.to_lowercase().contains(&term)
            || record.id.to_lowercase().contains(&term);
        matches_search
            && self.service.matches(&record.service_type)
            && self.status.matches(&record.status)
    }
}

/// Records matching `filter`, in log order
pub fn filter_logs<'a>(logs: &'a [PaymentRecord], filter: &LogFilter) -> Vec<&'a PaymentRecord> {
    logs.iter().filter(|record| filter.matches(record)).collect()
}

/// Totals over a filtered set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogSummary {
    pub count: usize,
    pub volume: TokenAmount,
    pub completed: usize,
    /// Percentage of completed records; `None` when `count == 0`
    pub success_rate: Option<f64>,
}

impl LogSummary {
    /// `"80.0%"`, or `"N/A"` for an empty set
    pub fn success_rate_display(&self) -> String {
        match self.success_rate {
            Some(rate) => format!("{:.1}%", rate),
            None => "N/A".to_string(),
        }
    }
}

/// Count, volume and success rate of `records`
pub fn aggregate<'a, I>(records: I) -> LogSummary
where
    I: IntoIterator<Item = &'a PaymentRecord>,
{
    let (count, completed, volume) = records.into_iter().fold(
        (0usize, 0usize, TokenAmount::ZERO),
        |(count, completed, volume), record| {
            (
                count + 1,
                completed + usize::from(record.status.is_success()),
                volume.saturating_add(&record.amount),
            )
        },
    );
    let success_rate = if count == 0 {
        None
    } else {
        Some(completed as f64 / count as f64 * 100.0)
    };
    LogSummary {
        count,
        volume,
        completed,
        success_rate,
    }
}

/// Pretty JSON array of the given records
pub fn export_json(records: &[&PaymentRecord]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logs() -> Vec<PaymentRecord> {
        seed::payment_log()
    }

    #[test]
    fn test_empty_filter_matches_everything_in_order() {
        let logs = logs();
        let ids: Vec<_> = filter_logs(&logs, &LogFilter::default())
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["tx-001", "tx-002", "tx-003", "tx-004", "tx-005"]);
    }

    #[test]
    fn test_search_is_case_insensitive_over_names_and_id() {
        let logs = logs();
        let alpha = filter_logs(&logs, &LogFilter::search("aLpHa"));
        assert_eq!(alpha.len(), 2);
        assert!(alpha.iter().all(|r| r.sender.contains("Alpha") || r.recipient.contains("Alpha")));

        let by_id = filter_logs(&logs, &LogFilter::search("TX-004"));
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id, "tx-004");
    }

    #[test]
    fn test_search_term_is_matched_verbatim() {
        let logs = logs();
        assert!(filter_logs(&logs, &LogFilter::search(" ")).is_empty());
        assert!(filter_logs(&logs, &LogFilter::search(" alpha")).is_empty());
    }

    #[test]
    fn test_service_and_status_selectors() {
        let logs = logs();
        let filter = LogFilter {
            search: String::new(),
            service: Selector::Only(ServiceType::Storage),
            status: Selector::Only(PaymentStatus::Failed),
        };
        let hits = filter_logs(&logs, &filter);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "tx-004");
    }

    #[test]
    fn test_selector_parses_sentinel() {
        assert_eq!("all".parse::<Selector<ServiceType>>().unwrap(), Selector::All);
        assert_eq!("ALL".parse::<Selector<PaymentStatus>>().unwrap(), Selector::All);
        assert_eq!(
            "Compute".parse::<Selector<ServiceType>>().unwrap(),
            Selector::Only(ServiceType::Compute)
        );
        assert!("bogus".parse::<Selector<ServiceType>>().is_err());
    }

    #[test]
    fn test_selector_cycle_returns_to_all() {
        let mut selector = Selector::All;
        let mut seen = Vec::new();
        for _ in 0..3 {
            selector = selector.cycle(&ServiceType::ALL);
            seen.push(selector);
        }
        assert_eq!(
            seen,
            vec![
                Selector::Only(ServiceType::Compute),
                Selector::Only(ServiceType::Storage),
                Selector::All
            ]
        );
    }

    #[test]
    fn test_aggregate_full_log() {
        let logs = logs();
        let summary = aggregate(&logs);
        assert_eq!(summary.count, 5);
        assert_eq!(summary.completed, 4);
        assert_eq!(summary.volume, TokenAmount::from_hundredths(148_690));
        assert_eq!(summary.success_rate_display(), "80.0%");
    }

    #[test]
    fn test_aggregate_empty_is_not_nan() {
        let summary = aggregate(std::iter::empty::<&PaymentRecord>());
        assert_eq!(summary.count, 0);
        assert_eq!(summary.volume, TokenAmount::ZERO);
        assert_eq!(summary.success_rate, None);
        assert_eq!(summary.success_rate_display(), "N/A");
    }

    #[test]
    fn test_export_json_round_trips_ids() {
        let logs = logs();
        let filtered = filter_logs(&logs, &LogFilter::search("Gamma"));
        let json = export_json(&filtered).unwrap();
        let parsed: Vec<PaymentRecord> = serde_json::from_str(&json).unwrap();
        let ids: Vec<_> = parsed.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["tx-002", "tx-005"]);
    }
}
