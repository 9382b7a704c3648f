//! Agent types for AutoPay
//!
//! Agents are the participants of the payment network. They are created
//! from a registration draft and removed explicitly; there is no
//! update-in-place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{AutopayError, Result, TokenAmount};

/// What an agent does in the network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentRole {
    Compute,
    Storage,
    Orchestrator,
}

impl AgentRole {
    pub const ALL: [AgentRole; 3] = [Self::Compute, Self::Storage, Self::Orchestrator];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Compute => "Compute",
            Self::Storage => "Storage",
            Self::Orchestrator => "Orchestrator",
        }
    }

    /// Glyph used in listings
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Compute => "🧠",
            Self::Storage => "📦",
            Self::Orchestrator => "⚙",
        }
    }

    /// The role after this one, wrapping around
    pub fn next(&self) -> Self {
        match self {
            Self::Compute => Self::Storage,
            Self::Storage => Self::Orchestrator,
            Self::Orchestrator => Self::Compute,
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentRole {
    type Err = AutopayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "compute" => Ok(Self::Compute),
            "storage" => Ok(Self::Storage),
            "orchestrator" => Ok(Self::Orchestrator),
            other => Err(AutopayError::invalid_input(
                "role",
                format!("unknown role '{}' (expected Compute, Storage or Orchestrator)", other),
            )),
        }
    }
}

/// Whether an agent currently takes part in payments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentStatus {
    Active,
    Inactive,
}

impl AgentStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active)
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("Active"),
            Self::Inactive => f.write_str("Inactive"),
        }
    }
}

/// A registered agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub name: String,
    pub role: AgentRole,
    /// Opaque, never validated
    pub wallet_address: String,
    pub spending_limit: TokenAmount,
    pub status: AgentStatus,
}

impl Agent {
    /// Wallet address shortened for tables
    pub fn short_address(&self) -> String {
        short_address(&self.wallet_address)
    }

    /// Lightweight reference used by simulation results
    pub fn to_ref(&self) -> AgentRef {
        AgentRef {
            id: self.id.clone(),
            name: self.name.clone(),
            role: self.role,
        }
    }
}

/// Name and role of an agent, detached from the registry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRef {
    pub id: String,
    pub name: String,
    pub role: AgentRole,
}

/// Raw registration form input
///
/// Every field is kept as typed so validation can report exactly which
/// ones are missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDraft {
    pub name: String,
    pub role: String,
    pub wallet_address: String,
    pub spending_limit: String,
}

/// Draft that passed validation, waiting for an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidAgentDraft {
    pub name: String,
    pub role: AgentRole,
    pub wallet_address: String,
    pub spending_limit: TokenAmount,
}

impl AgentDraft {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        wallet_address: impl Into<String>,
        spending_limit: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            wallet_address: wallet_address.into(),
            spending_limit: spending_limit.into(),
        }
    }

    /// Names of the fields that are empty after trimming
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("name", &self.name),
            ("role", &self.role),
            ("wallet address", &self.wallet_address),
            ("spending limit", &self.spending_limit),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    /// Check presence first, then parse role and limit
    pub fn validate(&self) -> Result<ValidAgentDraft> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(AutopayError::MissingFields { fields: missing });
        }
        let role = self.role.parse()?;
        let spending_limit = TokenAmount::from_decimal_str(&self.spending_limit).map_err(|_| {
            AutopayError::invalid_input(
                "spending limit",
                format!("'{}' is not a non-negative amount", self.spending_limit.trim()),
            )
        })?;
        Ok(ValidAgentDraft {
            name: self.name.trim().to_string(),
            role,
            wallet_address: self.wallet_address.trim().to_string(),
            spending_limit,
        })
    }
}

impl ValidAgentDraft {
    /// Registration always starts active
    pub fn into_agent(self, id: String) -> Agent {
        Agent {
            id,
            name: self.name,
            role: self.role,
            wallet_address: self.wallet_address,
            spending_limit: self.spending_limit,
            status: AgentStatus::Active,
        }
    }
}

/// `0x742d35Cc…2C1D` → `0x742d...2C1D`
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_draft() -> AgentDraft {
        AgentDraft::new("ComputeBot-Delta", "Compute", "0xabc", "1000")
    }

    #[test]
    fn test_role_parsing_is_case_insensitive() {
        assert_eq!("storage".parse::<AgentRole>().unwrap(), AgentRole::Storage);
        assert_eq!(" Orchestrator ".parse::<AgentRole>().unwrap(), AgentRole::Orchestrator);
        assert!("Miner".parse::<AgentRole>().is_err());
    }

    #[test]
    fn test_role_cycle_wraps() {
        let mut role = AgentRole::Compute;
        for _ in 0..AgentRole::ALL.len() {
            role = role.next();
        }
        assert_eq!(role, AgentRole::Compute);
    }

    #[test]
    fn test_validate_full_draft() {
        let valid = full_draft().validate().unwrap();
        assert_eq!(valid.role, AgentRole::Compute);
        assert_eq!(valid.spending_limit, TokenAmount::from_tokens(1000));
        let agent = valid.into_agent("agent-005".to_string());
        assert_eq!(agent.status, AgentStatus::Active);
    }

    #[test]
    fn test_validate_reports_every_missing_field() {
        let draft = AgentDraft::new("", "Compute", "   ", "");
        match draft.validate() {
            Err(AutopayError::MissingFields { fields }) => {
                assert_eq!(fields, vec!["name", "wallet address", "spending limit"]);
            }
            other => panic!("Expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_negative_limit() {
        let mut draft = full_draft();
        draft.spending_limit = "-10".to_string();
        assert!(matches!(
            draft.validate(),
            Err(AutopayError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_short_address() {
        assert_eq!(
            short_address("0x742d35Cc8C17e57E0C6d5A8e5B9F95c34A9B2C1D"),
            "0x742d...2C1D"
        );
        assert_eq!(short_address("0xabc"), "0xabc");
    }
}
