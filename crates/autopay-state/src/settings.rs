//! Settings store
//!
//! Holds the live settings record. `save` acknowledges without persisting;
//! `reset` restores the defaults.

use autopay_types::{AuthMethod, DataRetention, EncryptionLevel, SettingField, Settings, TokenAmount};

/// Tokens added or removed per step of an amount field
pub const AMOUNT_STEP_TOKENS: u64 = 100;
/// Seconds added or removed per step of the timeout
pub const TIMEOUT_STEP_SECS: u64 = 5;

#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    current: Settings,
}

fn cycle<T: Copy + PartialEq>(options: &[T], current: T) -> T {
    let index = options.iter().position(|o| *o == current).unwrap_or(0);
    options[(index + 1) % options.len()]
}

fn step_u64(value: u64, step: u64, direction: i64) -> u64 {
    if direction >= 0 {
        value.saturating_add(step.saturating_mul(direction.unsigned_abs()))
    } else {
        value.saturating_sub(step.saturating_mul(direction.unsigned_abs()))
    }
}

impl SettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self { current: settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.current
    }

    pub fn is_default(&self) -> bool {
        self.current == Settings::default()
    }

    /// Flip a boolean field; returns false if the field is not a toggle
    pub fn toggle(&mut self, field: SettingField) -> bool {
        let flag = match field {
            SettingField::AutoPayment => &mut self.current.auto_payment,
            SettingField::ManualApproval => &mut self.current.manual_approval,
            SettingField::EnableNotifications => &mut self.current.enable_notifications,
            SettingField::EnableAnalytics => &mut self.current.enable_analytics,
            _ => return false,
        };
        *flag = !*flag;
        true
    }

    /// Move a numeric field by `direction` steps, never below zero
    pub fn step(&mut self, field: SettingField, direction: i64) -> bool {
        let step_amount = |amount: &mut TokenAmount| {
            let tokens = step_u64(amount.whole_tokens(), AMOUNT_STEP_TOKENS, direction);
            *amount = TokenAmount::from_tokens(tokens);
        };
        match field {
            SettingField::MaxTransactionAmount => step_amount(&mut self.current.max_transaction_amount),
            SettingField::DefaultSpendingLimit => step_amount(&mut self.current.default_spending_limit),
            SettingField::NetworkTimeout => {
                self.current.network_timeout =
                    step_u64(self.current.network_timeout, TIMEOUT_STEP_SECS, direction)
            }
            _ => return false,
        }
        true
    }

    /// Advance an enumerated field to its next option
    pub fn cycle(&mut self, field: SettingField) -> bool {
        match field {
            SettingField::DataRetention => {
                self.current.data_retention = cycle(&DataRetention::ALL, self.current.data_retention)
            }
            SettingField::EncryptionLevel => {
                self.current.encryption_level =
                    cycle(&EncryptionLevel::ALL, self.current.encryption_level)
            }
            SettingField::AuthMethod => {
                self.current.auth_method = cycle(&AuthMethod::ALL, self.current.auth_method)
            }
            _ => return false,
        }
        true
    }

    /// Toggle, step forward or cycle, whichever the field supports
    pub fn activate(&mut self, field: SettingField) -> bool {
        self.toggle(field) || self.cycle(field) || self.step(field, 1)
    }

    /// Acknowledge the current settings; there is no backing store
    pub fn save(&self) -> &Settings {
        tracing::info!(settings = ?self.current, "settings saved (in memory only)");
        &self.current
    }

    /// Restore the fixed defaults
    pub fn reset(&mut self) -> &Settings {
        self.current = Settings::default();
        tracing::info!("settings reset to defaults");
        &self.current
    }
}
