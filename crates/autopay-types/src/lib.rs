//! AutoPay Types - Canonical domain types for the agent payment console
//!
//! This crate contains the foundational types shared by the state, TUI and
//! CLI crates. It has no dependencies on other autopay crates and defines:
//!
//! - Identity generation (`IdGenerator`, `SequentialIds`, `UuidIds`)
//! - Fixed-point token amounts
//! - Agent records and registration drafts
//! - Payment records, the canonical status vocabulary and service rates
//! - The settings record and its defaults
//! - Error types shared by every layer
//!
//! # Data flow
//!
//! ```text
//! user input → draft → validation → record → derived view → display
//! ```

pub mod identity;
pub mod amount;
pub mod agent;
pub mod payment;
pub mod settings;
pub mod error;

pub use identity::*;
pub use amount::*;
pub use agent::*;
pub use payment::*;
pub use settings::*;
pub use error::*;

use chrono::{DateTime, Utc};

/// Version of the AutoPay types schema
pub const TYPES_VERSION: &str = "0.1.0";

/// Source of the current time
///
/// Injected wherever a timestamp is stamped so tests can pin time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
