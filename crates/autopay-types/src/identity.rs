//! Identity generation for AutoPay records
//!
//! Records are identified by prefixed strings (`agent-005`, `sim-12`).
//! Generation goes through the `IdGenerator` trait so the stores never
//! derive ids from the wall clock.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

/// Prefix for registered agents
pub const AGENT_PREFIX: &str = "agent";
/// Prefix for simulated transactions
pub const SIMULATION_PREFIX: &str = "sim";

/// Produces unique identifiers for new records
pub trait IdGenerator: Send + Sync {
    /// Generate the next id for the given prefix
    fn next_id(&self, prefix: &str) -> String;
}

/// Monotonic counter, zero-padded to three digits
///
/// Matches the seed data scheme (`agent-001` … `agent-004`), so a registry
/// seeded with four agents starts this generator at 5.
#[derive(Debug)]
pub struct SequentialIds {
    next: AtomicU64,
}

impl SequentialIds {
    /// Start counting at `first`
    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&self, prefix: &str) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}-{:03}", prefix, n)
    }
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&self, prefix: &str) -> String {
        format!("{}-{}", prefix, Uuid::new_v4())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_are_padded_and_monotonic() {
        let ids = SequentialIds::starting_at(5);
        assert_eq!(ids.next_id(AGENT_PREFIX), "agent-005");
        assert_eq!(ids.next_id(AGENT_PREFIX), "agent-006");
        assert_eq!(ids.next_id(SIMULATION_PREFIX), "sim-007");
    }

    #[test]
    fn test_sequential_ids_grow_past_padding() {
        let ids = SequentialIds::starting_at(1234);
        assert_eq!(ids.next_id("agent"), "agent-1234");
    }

    #[test]
    fn test_uuid_ids_are_unique() {
        let ids = UuidIds;
        let a = ids.next_id(AGENT_PREFIX);
        let b = ids.next_id(AGENT_PREFIX);
        assert!(a.starts_with("agent-"));
        assert_ne!(a, b);
    }
}
