//! Mock wallet connection
//!
//! Connecting takes a fixed delay and always yields the same address.
//! There is no signing and no provider.

use std::sync::Arc;
use std::time::Duration;

use autopay_types::{short_address, AutopayError, Result};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

/// Address every mock connection resolves to
pub const MOCK_WALLET_ADDRESS: &str = "0x742d35Cc8C17e57E0C6d5A8e5B9F95c34A9B2C1D";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WalletState {
    Disconnected,
    Connecting,
    Connected { address: String },
}

impl WalletState {
    /// Short label for headers
    pub fn label(&self) -> String {
        match self {
            Self::Disconnected => "Connect Wallet".to_string(),
            Self::Connecting => "Connecting...".to_string(),
            Self::Connected { address } => short_address(address),
        }
    }
}

#[derive(Clone)]
pub struct WalletConnector {
    state: Arc<RwLock<WalletState>>,
    delay: Duration,
}

impl WalletConnector {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(WalletState::Disconnected)),
            delay,
        }
    }

    pub async fn state(&self) -> WalletState {
        self.state.read().await.clone()
    }

    /// Connect after the configured delay
    ///
    /// Already connected: returns the address immediately. Connecting:
    /// fails with `Busy`.
    pub async fn connect(&self) -> Result<String> {
        {
            let mut state = self.state.write().await;
            match &*state {
                WalletState::Connected { address } => return Ok(address.clone()),
                WalletState::Connecting => {
                    return Err(AutopayError::Busy {
                        operation: "Wallet connection",
                    })
                }
                WalletState::Disconnected => *state = WalletState::Connecting,
            }
        }

        tokio::time::sleep(self.delay).await;

        let address = MOCK_WALLET_ADDRESS.to_string();
        *self.state.write().await = WalletState::Connected {
            address: address.clone(),
        };
        tracing::info!(address = %short_address(&address), "wallet connected");
        Ok(address)
    }

    pub async fn disconnect(&self) {
        let mut state = self.state.write().await;
        if matches!(*state, WalletState::Connected { .. }) {
            tracing::info!("wallet disconnected");
        }
        *state = WalletState::Disconnected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_and_disconnect() {
        let wallet = WalletConnector::new(Duration::ZERO);
        assert_eq!(wallet.state().await, WalletState::Disconnected);

        let address = wallet.connect().await.unwrap();
        assert_eq!(address, MOCK_WALLET_ADDRESS);
        assert_eq!(wallet.state().await.label(), "0x742d...2C1D");

        wallet.disconnect().await;
        assert_eq!(wallet.state().await, WalletState::Disconnected);
    }

    #[tokio::test]
    async fn test_connect_while_connecting_is_busy() {
        let wallet = WalletConnector::new(Duration::from_millis(200));
        let pending = {
            let wallet = wallet.clone();
            tokio::spawn(async move { wallet.connect().await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(wallet.state().await, WalletState::Connecting);
        assert!(matches!(
            wallet.connect().await,
            Err(AutopayError::Busy { .. })
        ));

        assert!(pending.await.unwrap().is_ok());
        assert!(matches!(wallet.state().await, WalletState::Connected { .. }));
    }

    #[tokio::test]
    async fn test_connect_when_connected_is_noop() {
        let wallet = WalletConnector::new(Duration::ZERO);
        let first = wallet.connect().await.unwrap();
        let second = wallet.connect().await.unwrap();
        assert_eq!(first, second);
    }
}
