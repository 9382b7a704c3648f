//! Built-in demo datasets
//!
//! The console has no backend; these are the records every session starts
//! from.

use autopay_types::{
    Agent, AgentRole, AgentStatus, FeedTransaction, PaymentRecord, PaymentStatus, ServiceType,
    TokenAmount,
};
use chrono::{DateTime, Duration, Utc};

/// 2024-01-15T00:00:00Z
const LOG_DAY_EPOCH: i64 = 1_705_276_800;

fn log_time(hour: i64, minute: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(LOG_DAY_EPOCH + hour * 3600 + minute * 60, 0).unwrap_or_default()
}

fn agent(
    id: &str,
    name: &str,
    role: AgentRole,
    wallet: &str,
    limit: u64,
    status: AgentStatus,
) -> Agent {
    Agent {
        id: id.to_string(),
        name: name.to_string(),
        role,
        wallet_address: wallet.to_string(),
        spending_limit: TokenAmount::from_tokens(limit),
        status,
    }
}

/// Initial registry contents
pub fn agents() -> Vec<Agent> {
    vec![
        agent(
            "agent-001",
            "ComputeBot-Alpha",
            AgentRole::Compute,
            "0x742d35Cc8C17e57E0C6d5A8e5B9F95c34A9B2C1D",
            1000,
            AgentStatus::Active,
        ),
        agent(
            "agent-002",
            "StorageNode-Beta",
            AgentRole::Storage,
            "0x8F3B17C9A2E5D1F9C8B4A6E3F7C2D5A8B9E4F1C6",
            750,
            AgentStatus::Active,
        ),
        agent(
            "agent-003",
            "OrchestratorPrime",
            AgentRole::Orchestrator,
            "0xA1B2C3D4E5F6G7H8I9J0K1L2M3N4O5P6Q7R8S9T0",
            2000,
            AgentStatus::Active,
        ),
        agent(
            "agent-004",
            "ComputeBot-Gamma",
            AgentRole::Compute,
            "0x1A2B3C4D5E6F7890ABCDEF1234567890ABCDEF12",
            1200,
            AgentStatus::Inactive,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn record(
    id: &str,
    minute: i64,
    sender: (&str, AgentRole),
    recipient: (&str, AgentRole),
    service_type: ServiceType,
    units: u64,
    amount_hundredths: u64,
    status: PaymentStatus,
) -> PaymentRecord {
    PaymentRecord {
        id: id.to_string(),
        timestamp: log_time(10, minute),
        sender: sender.0.to_string(),
        sender_role: sender.1,
        recipient: recipient.0.to_string(),
        recipient_role: recipient.1,
        service_type,
        units,
        amount: TokenAmount::from_hundredths(amount_hundredths),
        status,
    }
}

/// Payment log, newest first
pub fn payment_log() -> Vec<PaymentRecord> {
    use AgentRole::*;
    vec![
        record(
            "tx-001",
            30,
            ("ComputeBot-Alpha", Compute),
            ("StorageNode-Beta", Storage),
            ServiceType::Compute,
            150,
            37_500,
            PaymentStatus::Completed,
        ),
        record(
            "tx-002",
            25,
            ("OrchestratorPrime", Orchestrator),
            ("ComputeBot-Gamma", Compute),
            ServiceType::Storage,
            200,
            36_000,
            PaymentStatus::Completed,
        ),
        record(
            "tx-003",
            20,
            ("StorageNode-Delta", Storage),
            ("ComputeBot-Alpha", Compute),
            ServiceType::Compute,
            128,
            32_000,
            PaymentStatus::Completed,
        ),
        record(
            "tx-004",
            15,
            ("ComputeBot-Beta", Compute),
            ("OrchestratorPrime", Orchestrator),
            ServiceType::Storage,
            108,
            19_440,
            PaymentStatus::Failed,
        ),
        record(
            "tx-005",
            10,
            ("StorageNode-Beta", Storage),
            ("ComputeBot-Gamma", Compute),
            ServiceType::Compute,
            95,
            23_750,
            PaymentStatus::Completed,
        ),
    ]
}

#[allow(clippy::too_many_arguments)]
fn feed_entry(
    now: DateTime<Utc>,
    id: &str,
    sender: (&str, AgentRole),
    recipient: (&str, AgentRole),
    amount: u64,
    service: &str,
    minutes_ago: i64,
    gas_used: f64,
    status: PaymentStatus,
) -> FeedTransaction {
    FeedTransaction {
        id: id.to_string(),
        sender: sender.0.to_string(),
        sender_role: sender.1,
        recipient: recipient.0.to_string(),
        recipient_role: recipient.1,
        amount: TokenAmount::from_tokens(amount),
        service: service.to_string(),
        timestamp: now - Duration::minutes(minutes_ago),
        gas_used,
        status,
    }
}

/// Dashboard feed relative to `now`
pub fn feed(now: DateTime<Utc>) -> Vec<FeedTransaction> {
    use AgentRole::*;
    vec![
        feed_entry(
            now,
            "0x7b8a...3f21",
            ("ComputeBot-Alpha", Compute),
            ("StorageNode-Zeta", Storage),
            450,
            "GPU Compute",
            1,
            0.0012,
            PaymentStatus::Completed,
        ),
        feed_entry(
            now,
            "0x9c4d...8a76",
            ("OrchestratorPrime", Orchestrator),
            ("ComputeBot-Gamma", Compute),
            290,
            "Model Training",
            3,
            0.0008,
            PaymentStatus::Completed,
        ),
        feed_entry(
            now,
            "0x2e1f...6b93",
            ("StorageNode-Delta", Storage),
            ("ComputeBot-Alpha", Compute),
            180,
            "Data Storage",
            7,
            0.0005,
            PaymentStatus::Completed,
        ),
        feed_entry(
            now,
            "0x5f82...4d17",
            ("ComputeBot-Beta", Compute),
            ("OrchestratorPrime", Orchestrator),
            760,
            "Inference API",
            12,
            0.0015,
            PaymentStatus::Pending,
        ),
    ]
}
