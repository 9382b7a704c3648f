//! Subcommand implementations
//!
//! Each command runs against a freshly seeded `AppState`.

pub mod agents;
pub mod dashboard;
pub mod logs;
pub mod routes;
pub mod settings;
pub mod simulate;
pub mod status;

use autopay_types::AutopayError;
use serde::Serialize;

/// Turn a rejected action into an error headed by its notice title
pub(crate) fn rejected(err: AutopayError) -> anyhow::Error {
    anyhow::anyhow!("{}: {}", err.notice_title(), err)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_leads_with_notice_title() {
        let err = rejected(AutopayError::SameSenderRecipient);
        assert_eq!(
            err.to_string(),
            "Invalid Configuration: Sender and recipient agents must be different"
        );
    }
}
