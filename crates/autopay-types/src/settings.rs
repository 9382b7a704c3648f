//! Settings record
//!
//! A flat set of toggles and thresholds. Nothing here is persisted; the
//! defaults are the only fixed point.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::TokenAmount;

/// How long payment data is kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataRetention {
    Days30,
    Days90,
    Months6,
    Year1,
    Forever,
}

impl DataRetention {
    pub const ALL: [DataRetention; 5] = [
        Self::Days30,
        Self::Days90,
        Self::Months6,
        Self::Year1,
        Self::Forever,
    ];

    /// Retention in days, `None` for forever
    pub fn days(&self) -> Option<u32> {
        match self {
            Self::Days30 => Some(30),
            Self::Days90 => Some(90),
            Self::Months6 => Some(180),
            Self::Year1 => Some(365),
            Self::Forever => None,
        }
    }
}

impl fmt::Display for DataRetention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Days30 => "30 days",
            Self::Days90 => "90 days",
            Self::Months6 => "6 months",
            Self::Year1 => "1 year",
            Self::Forever => "Forever",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncryptionLevel {
    Aes128,
    Aes256,
    Rsa2048,
}

impl EncryptionLevel {
    pub const ALL: [EncryptionLevel; 3] = [Self::Aes128, Self::Aes256, Self::Rsa2048];
}

impl fmt::Display for EncryptionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aes128 => "AES-128 (Standard)",
            Self::Aes256 => "AES-256 (Recommended)",
            Self::Rsa2048 => "RSA-2048 (High Security)",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthMethod {
    Basic,
    MultiFactor,
    Biometric,
}

impl AuthMethod {
    pub const ALL: [AuthMethod; 3] = [Self::Basic, Self::MultiFactor, Self::Biometric];
}

impl fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Basic => "Basic Authentication",
            Self::MultiFactor => "Multi-Factor Authentication",
            Self::Biometric => "Biometric + MFA",
        })
    }
}

/// Payment system preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Process payments without confirmation
    pub auto_payment: bool,
    /// Require approval for high-value transactions
    pub manual_approval: bool,
    pub max_transaction_amount: TokenAmount,
    /// Seconds
    pub network_timeout: u64,
    pub enable_notifications: bool,
    pub enable_analytics: bool,
    pub data_retention: DataRetention,
    /// Pre-filled limit for newly registered agents
    pub default_spending_limit: TokenAmount,
    pub encryption_level: EncryptionLevel,
    pub auth_method: AuthMethod,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_payment: true,
            manual_approval: false,
            max_transaction_amount: TokenAmount::from_tokens(1000),
            network_timeout: 30,
            enable_notifications: true,
            enable_analytics: true,
            data_retention: DataRetention::Days90,
            default_spending_limit: TokenAmount::from_tokens(500),
            encryption_level: EncryptionLevel::Aes256,
            auth_method: AuthMethod::MultiFactor,
        }
    }
}

/// Addressable settings field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettingField {
    AutoPayment,
    ManualApproval,
    MaxTransactionAmount,
    DefaultSpendingLimit,
    NetworkTimeout,
    EnableNotifications,
    EnableAnalytics,
    EncryptionLevel,
    AuthMethod,
    DataRetention,
}

impl SettingField {
    /// Display order, grouped as on the settings screen
    pub const ALL: [SettingField; 10] = [
        Self::AutoPayment,
        Self::ManualApproval,
        Self::MaxTransactionAmount,
        Self::DefaultSpendingLimit,
        Self::NetworkTimeout,
        Self::EnableNotifications,
        Self::EnableAnalytics,
        Self::EncryptionLevel,
        Self::AuthMethod,
        Self::DataRetention,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::AutoPayment => "Auto-Payment",
            Self::ManualApproval => "Manual Approval",
            Self::MaxTransactionAmount => "Maximum Transaction Amount",
            Self::DefaultSpendingLimit => "Default Agent Spending Limit",
            Self::NetworkTimeout => "Network Timeout",
            Self::EnableNotifications => "Enable Notifications",
            Self::EnableAnalytics => "Analytics Tracking",
            Self::EncryptionLevel => "Encryption Level",
            Self::AuthMethod => "Authentication Method",
            Self::DataRetention => "Data Retention Period",
        }
    }

    pub fn is_toggle(&self) -> bool {
        matches!(
            self,
            Self::AutoPayment
                | Self::ManualApproval
                | Self::EnableNotifications
                | Self::EnableAnalytics
        )
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            Self::MaxTransactionAmount | Self::DefaultSpendingLimit | Self::NetworkTimeout
        )
    }
}

impl Settings {
    /// Current value of a field, formatted for display
    pub fn display_value(&self, field: SettingField) -> String {
        let on_off = |b: bool| if b { "on" } else { "off" }.to_string();
        match field {
            SettingField::AutoPayment => on_off(self.auto_payment),
            SettingField::ManualApproval => on_off(self.manual_approval),
            SettingField::MaxTransactionAmount => {
                format!("{} tokens", self.max_transaction_amount.whole_tokens())
            }
            SettingField::DefaultSpendingLimit => {
                format!("{} tokens", self.default_spending_limit.whole_tokens())
            }
            SettingField::NetworkTimeout => format!("{} seconds", self.network_timeout),
            SettingField::EnableNotifications => on_off(self.enable_notifications),
            SettingField::EnableAnalytics => on_off(self.enable_analytics),
            SettingField::EncryptionLevel => self.encryption_level.to_string(),
            SettingField::AuthMethod => self.auth_method.to_string(),
            SettingField::DataRetention => self.data_retention.to_string(),
        }
    }
}
