//! Payment types for AutoPay
//!
//! The payment log and the dashboard feed are independent datasets that
//! share one status vocabulary. Neither references the agent registry by
//! key; counterparties are plain names.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AgentRef, AgentRole, AutopayError, Result, TokenAmount};

/// Billable service between agents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServiceType {
    Compute,
    Storage,
}

impl ServiceType {
    pub const ALL: [ServiceType; 2] = [Self::Compute, Self::Storage];

    /// Fixed price per usage unit
    pub fn rate(&self) -> TokenAmount {
        match self {
            Self::Compute => TokenAmount::from_hundredths(250),
            Self::Storage => TokenAmount::from_hundredths(180),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Storage => "Storage",
        }
    }

    /// Label shown in the service picker
    pub fn label(&self) -> &'static str {
        match self {
            Self::Compute => "Compute Processing",
            Self::Storage => "Data Storage",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Compute => Self::Storage,
            Self::Storage => Self::Compute,
        }
    }

    /// `units × rate`, `None` on overflow
    pub fn price(&self, units: u64) -> Option<TokenAmount> {
        self.rate().checked_mul_units(units)
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = AutopayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compute" => Ok(Self::Compute),
            "storage" => Ok(Self::Storage),
            other => Err(AutopayError::invalid_input(
                "service type",
                format!("unknown service '{}' (expected Compute or Storage)", other),
            )),
        }
    }
}

/// Canonical payment status
///
/// The payment log says `Completed`/`Failed`, the live feed says
/// `confirmed`/`pending`. Both map onto this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

impl PaymentStatus {
    pub const ALL: [PaymentStatus; 3] = [Self::Completed, Self::Pending, Self::Failed];

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Pending => "Pending",
            Self::Failed => "Failed",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = AutopayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "completed" | "confirmed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "failed" => Ok(Self::Failed),
            other => Err(AutopayError::invalid_input(
                "status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// Entry of the payment log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub sender: String,
    pub sender_role: AgentRole,
    pub recipient: String,
    pub recipient_role: AgentRole,
    pub service_type: ServiceType,
    pub units: u64,
    pub amount: TokenAmount,
    pub status: PaymentStatus,
}

/// Entry of the dashboard's live feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedTransaction {
    /// Abbreviated hash, e.g. `0x7b8a...3f21`
    pub id: String,
    pub sender: String,
    pub sender_role: AgentRole,
    pub recipient: String,
    pub recipient_role: AgentRole,
    pub amount: TokenAmount,
    /// Free-form service label, e.g. "GPU Compute"
    pub service: String,
    pub timestamp: DateTime<Utc>,
    /// Network fee in ETH
    pub gas_used: f64,
    pub status: PaymentStatus,
}

/// Outcome of a simulated payment
///
/// Lives only in view state; it is never appended to the payment log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub transaction_id: String,
    pub sender: AgentRef,
    pub recipient: AgentRef,
    pub service_type: ServiceType,
    pub usage_units: u64,
    pub amount: TokenAmount,
    pub timestamp: DateTime<Utc>,
    pub status: PaymentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_rates() {
        assert_eq!(ServiceType::Compute.price(100), Some(TokenAmount::from_tokens(250)));
        assert_eq!(ServiceType::Storage.price(108), Some(TokenAmount::from_hundredths(19_440)));
    }

    #[test]
    fn test_status_aliases_map_to_canonical() {
        assert_eq!("Completed".parse::<PaymentStatus>().unwrap(), PaymentStatus::Completed);
        assert_eq!("confirmed".parse::<PaymentStatus>().unwrap(), PaymentStatus::Completed);
        assert_eq!("pending".parse::<PaymentStatus>().unwrap(), PaymentStatus::Pending);
        assert_eq!("FAILED".parse::<PaymentStatus>().unwrap(), PaymentStatus::Failed);
        assert!("settled".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn test_service_parse() {
        assert_eq!("compute".parse::<ServiceType>().unwrap(), ServiceType::Compute);
        assert!("GPU".parse::<ServiceType>().is_err());
    }
}
