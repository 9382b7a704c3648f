//! Payment simulation
//!
//! A simulation validates a request against a registry snapshot, waits an
//! artificial settlement delay, and yields an ephemeral result. Results
//! are never written to the payment log.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use autopay_types::{
    Agent, AgentRef, AutopayError, Clock, IdGenerator, PaymentStatus, Result, ServiceType,
    SimulationResult, TokenAmount, SIMULATION_PREFIX,
};
use serde::{Deserialize, Serialize};

/// Raw simulation form input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationRequest {
    pub sender_id: String,
    pub recipient_id: String,
    pub service_type: String,
    pub units: String,
}

impl SimulationRequest {
    pub fn new(
        sender_id: impl Into<String>,
        recipient_id: impl Into<String>,
        service_type: impl Into<String>,
        units: impl Into<String>,
    ) -> Self {
        Self {
            sender_id: sender_id.into(),
            recipient_id: recipient_id.into(),
            service_type: service_type.into(),
            units: units.into(),
        }
    }

    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("sender agent", &self.sender_id),
            ("recipient agent", &self.recipient_id),
            ("service type", &self.service_type),
            ("usage units", &self.units),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }

    fn parse_units(&self) -> Result<u64> {
        self.units.trim().parse().map_err(|_| {
            AutopayError::invalid_input(
                "usage units",
                format!("'{}' is not a whole number of units", self.units.trim()),
            )
        })
    }

    /// Amount shown while the form is being filled in
    pub fn preview(&self) -> Option<TokenAmount> {
        let service: ServiceType = self.service_type.parse().ok()?;
        service.price(self.parse_units().ok()?)
    }
}

/// Request that passed validation, ready to settle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedSimulation {
    pub sender: AgentRef,
    pub recipient: AgentRef,
    pub service_type: ServiceType,
    pub usage_units: u64,
    pub amount: TokenAmount,
}

/// Runs simulated payments, one at a time
#[derive(Clone)]
pub struct Simulator {
    delay: Duration,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
    in_flight: Arc<AtomicBool>,
}

/// Clears the in-flight flag when the simulation ends
struct InFlight(Arc<AtomicBool>);

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Simulator {
    pub fn new(delay: Duration, ids: Arc<dyn IdGenerator>, clock: Arc<dyn Clock>) -> Self {
        Self {
            delay,
            ids,
            clock,
            in_flight: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// True while a simulation is waiting out its delay
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    fn begin(&self) -> Result<InFlight> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map(|_| InFlight(self.in_flight.clone()))
            .map_err(|_| AutopayError::Busy {
                operation: "Simulation",
            })
    }

    /// Validate `request` against the agents in `agents`
    pub fn prepare(&self, agents: &[Agent], request: &SimulationRequest) -> Result<PreparedSimulation> {
        let missing = request.missing_fields();
        if !missing.is_empty() {
            return Err(AutopayError::MissingFields { fields: missing });
        }
        let sender_id = request.sender_id.trim();
        let recipient_id = request.recipient_id.trim();
        if sender_id == recipient_id {
            return Err(AutopayError::SameSenderRecipient);
        }
        let service_type: ServiceType = request.service_type.parse()?;
        let usage_units = request.parse_units()?;
        let lookup = |id: &str| {
            agents
                .iter()
                .find(|a| a.id == id)
                .map(Agent::to_ref)
                .ok_or_else(|| AutopayError::agent_not_found(id))
        };
        let sender = lookup(sender_id)?;
        let recipient = lookup(recipient_id)?;
        let amount = service_type.price(usage_units).ok_or_else(|| {
            AutopayError::invalid_input("usage units", "amount overflows the token range")
        })?;
        Ok(PreparedSimulation {
            sender,
            recipient,
            service_type,
            usage_units,
            amount,
        })
    }

    /// Stamp a prepared simulation as completed
    pub fn settle(&self, prepared: PreparedSimulation) -> SimulationResult {
        SimulationResult {
            transaction_id: self.ids.next_id(SIMULATION_PREFIX),
            sender: prepared.sender,
            recipient: prepared.recipient,
            service_type: prepared.service_type,
            usage_units: prepared.usage_units,
            amount: prepared.amount,
            timestamp: self.clock.now(),
            status: PaymentStatus::Completed,
        }
    }

    /// Validate, wait the settlement delay, then settle
    ///
    /// Fails with `Busy` if another simulation is still waiting. Once
    /// started a simulation always resolves.
    pub async fn simulate(
        &self,
        agents: &[Agent],
        request: &SimulationRequest,
    ) -> Result<SimulationResult> {
        let _guard = self.begin()?;
        let prepared = match self.prepare(agents, request) {
            Ok(prepared) => prepared,
            Err(err) => {
                tracing::warn!(error = %err, "simulation rejected");
                return Err(err);
            }
        };
        tracing::debug!(
            sender = %prepared.sender.id,
            recipient = %prepared.recipient.id,
            amount = %prepared.amount,
            delay_ms = self.delay.as_millis() as u64,
            "simulation started"
        );
        tokio::time::sleep(self.delay).await;
        let result = self.settle(prepared);
        tracing::info!(
            transaction_id = %result.transaction_id,
            amount = %result.amount,
            "simulation completed"
        );
        Ok(result)
    }
}
