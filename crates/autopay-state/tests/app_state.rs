use std::sync::Arc;

use autopay_state::{
    aggregate, filter_logs, AppState, LogFilter, Selector, SimulationRequest, StateConfig,
};
use autopay_types::{
    AgentDraft, AgentStatus, AutopayError, FixedClock, PaymentStatus, SequentialIds, ServiceType,
    Settings, SettingField, TokenAmount,
};
use chrono::{TimeZone, Utc};

fn build_state() -> AppState {
    let clock = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    AppState::with_parts(
        StateConfig::instant(),
        Arc::new(FixedClock(clock)),
        Arc::new(SequentialIds::starting_at(5)),
        Arc::new(SequentialIds::starting_at(1)),
    )
}

fn full_draft() -> AgentDraft {
    AgentDraft::new("ComputeBot-Delta", "Compute", "0xD3174", "1500")
}

#[test]
fn test_register_with_all_fields_grows_registry_by_one() {
    let mut state = build_state();
    let before = state.registry.len();

    let agent = state.register_agent(&full_draft()).unwrap();

    assert_eq!(state.registry.len(), before + 1);
    assert_eq!(agent.status, AgentStatus::Active);
    assert_eq!(agent.id, "agent-005");
    assert_eq!(state.registry.get("agent-005"), Some(&agent));
}

#[test]
fn test_notices_are_stamped_by_state_clock() {
    let mut state = build_state();
    state.register_agent(&full_draft()).unwrap();
    let _ = state.remove_agent("agent-404");

    let expected = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    assert_eq!(state.notices.len(), 2);
    assert!(state.notices.entries().iter().all(|n| n.timestamp == expected));
}

#[test]
fn test_register_with_any_empty_field_is_rejected() {
    let blanks: [fn(&mut AgentDraft); 4] = [
        |d| d.name.clear(),
        |d| d.role.clear(),
        |d| d.wallet_address.clear(),
        |d| d.spending_limit.clear(),
    ];

    for blank in blanks {
        let mut state = build_state();
        let mut draft = full_draft();
        blank(&mut draft);

        let err = state.register_agent(&draft).unwrap_err();

        assert!(matches!(err, AutopayError::MissingFields { .. }));
        assert_eq!(state.registry.len(), 4);
        assert_eq!(
            state.notices.latest().map(|n| n.title.as_str()),
            Some("Validation Error")
        );
    }
}

#[test]
fn test_remove_known_then_unknown() {
    let mut state = build_state();

    let removed = state.remove_agent("agent-001").unwrap();
    assert_eq!(removed.name, "ComputeBot-Alpha");
    assert_eq!(state.registry.len(), 3);
    assert_eq!(
        state.notices.latest().map(|n| n.description.as_str()),
        Some("ComputeBot-Alpha has been removed from the network.")
    );

    let err = state.remove_agent("agent-001").unwrap_err();
    assert_eq!(err, AutopayError::agent_not_found("agent-001"));
    assert_eq!(state.registry.len(), 3);
}

#[tokio::test]
async fn test_simulate_compute_payment() {
    let mut state = build_state();
    let request = SimulationRequest::new("agent-001", "agent-002", "Compute", "100");

    let result = state.simulate(&request).await.unwrap();

    assert_eq!(result.amount, TokenAmount::from_tokens(250));
    assert_eq!(result.service_type, ServiceType::Compute);
    assert_eq!(result.usage_units, 100);
    assert_eq!(state.last_simulation.as_ref(), Some(&result));
    assert_eq!(
        state.notices.latest().map(|n| n.description.as_str()),
        Some("Payment of 250.00 tokens processed successfully")
    );
    // Simulations never reach the payment log
    assert_eq!(state.payment_log.len(), 5);
}

#[tokio::test]
async fn test_simulate_same_agent_is_configuration_error() {
    let mut state = build_state();
    for id in ["agent-001", "agent-002", "agent-003", "agent-004"] {
        let request = SimulationRequest::new(id, id, "Storage", "5");
        let err = state.simulate(&request).await.unwrap_err();
        assert_eq!(err, AutopayError::SameSenderRecipient);
    }
    assert!(state.last_simulation.is_none());
    assert_eq!(
        state.notices.latest().map(|n| n.title.as_str()),
        Some("Invalid Configuration")
    );
}

#[tokio::test]
async fn test_simulate_uses_live_registry() {
    let mut state = build_state();
    let agent = state.register_agent(&full_draft()).unwrap();

    let request = SimulationRequest::new(agent.id.as_str(), "agent-003", "Storage", "10");
    let result = state.simulate(&request).await.unwrap();
    assert_eq!(result.sender.name, "ComputeBot-Delta");
    assert_eq!(result.amount, TokenAmount::from_tokens(18));

    state.remove_agent(&agent.id).unwrap();
    let err = state.simulate(&request).await.unwrap_err();
    assert_eq!(err, AutopayError::agent_not_found(agent.id));
}

#[test]
fn test_search_alpha() {
    let state = build_state();
    let hits = state.filtered_logs(&LogFilter::search("Alpha"));
    let ids: Vec<_> = hits.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["tx-001", "tx-003"]);
}

#[test]
fn test_summary_of_filtered_view() {
    let state = build_state();
    let filter = LogFilter {
        search: String::new(),
        service: Selector::Only(ServiceType::Storage),
        status: Selector::All,
    };
    let summary = state.log_summary(&filter);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.volume, TokenAmount::from_hundredths(55_440));
    assert_eq!(summary.success_rate_display(), "50.0%");

    let nothing = LogFilter {
        status: Selector::Only(PaymentStatus::Pending),
        ..LogFilter::default()
    };
    let summary = state.log_summary(&nothing);
    assert_eq!(summary.count, 0);
    assert_eq!(summary.success_rate_display(), "N/A");
}

#[test]
fn test_settings_reset_after_mutations() {
    let mut state = build_state();
    state.settings.toggle(SettingField::AutoPayment);
    state.settings.step(SettingField::NetworkTimeout, 3);
    state.settings.cycle(SettingField::DataRetention);
    state.save_settings();
    assert_ne!(state.settings.settings(), &Settings::default());

    state.reset_settings();

    assert_eq!(state.settings.settings(), &Settings::default());
    assert_eq!(
        state.notices.latest().map(|n| n.title.as_str()),
        Some("Settings Reset")
    );
}

#[test]
fn test_aggregate_free_function_matches_controller() {
    let state = build_state();
    let filter = LogFilter::search("gamma");
    let direct = aggregate(filter_logs(state.payment_log.records(), &filter));
    assert_eq!(direct, state.log_summary(&filter));
}

mod filter_properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn filtered_is_ordered_subset(term in "[a-zA-Z0-9-]{0,6}") {
            let state = build_state();
            let records = state.payment_log.records();
            let hits = filter_logs(records, &LogFilter::search(term.clone()));

            let mut cursor = records.iter();
            for hit in &hits {
                prop_assert!(cursor.any(|r| r.id == hit.id));
            }

            let needle = term.to_lowercase();
            for hit in &hits {
                prop_assert!(
                    hit.sender.to_lowercase().contains(&needle)
                        || hit.recipient.to_lowercase().contains(&needle)
                        || hit.id.to_lowercase().contains(&needle)
                );
            }
        }

        #[test]
        fn success_rate_is_bounded(term in "[a-z]{0,3}") {
            let state = build_state();
            let summary = state.log_summary(&LogFilter::search(term));
            match summary.success_rate {
                Some(rate) => prop_assert!((0.0..=100.0).contains(&rate)),
                None => prop_assert_eq!(summary.count, 0),
            }
        }
    }
}
