//! Agent registry
//!
//! Ordered, append-only collection of agents. Insertion order is the
//! display order.

use std::sync::Arc;

use autopay_types::{
    Agent, AgentDraft, AgentRole, AutopayError, IdGenerator, Result, SequentialIds, AGENT_PREFIX,
};

use crate::seed;

/// Registry of all agents known to the console
pub struct AgentRegistry {
    agents: Vec<Agent>,
    ids: Arc<dyn IdGenerator>,
}

impl AgentRegistry {
    /// Create an empty registry
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_agents(Vec::new(), ids)
    }

    /// Create a registry holding `agents` in the given order
    pub fn with_agents(agents: Vec<Agent>, ids: Arc<dyn IdGenerator>) -> Self {
        Self { agents, ids }
    }

    /// Registry holding the four demo agents
    pub fn seeded(ids: Arc<dyn IdGenerator>) -> Self {
        Self::with_agents(seed::agents(), ids)
    }

    /// Validate a draft and append the new agent
    ///
    /// The store is untouched on any error.
    pub fn register(&mut self, draft: &AgentDraft) -> Result<Agent> {
        let valid = draft.validate()?;
        let id = self.ids.next_id(AGENT_PREFIX);
        if self.get(&id).is_some() {
            return Err(AutopayError::DuplicateAgent { agent_id: id });
        }
        let agent = valid.into_agent(id);
        tracing::info!(agent_id = %agent.id, name = %agent.name, role = %agent.role, "agent registered");
        self.agents.push(agent.clone());
        Ok(agent)
    }

    /// Remove an agent by id, returning the removed record
    pub fn remove(&mut self, agent_id: &str) -> Result<Agent> {
        let index = self
            .agents
            .iter()
            .position(|a| a.id == agent_id)
            .ok_or_else(|| AutopayError::agent_not_found(agent_id))?;
        let agent = self.agents.remove(index);
        tracing::info!(agent_id = %agent.id, name = %agent.name, "agent removed");
        Ok(agent)
    }

    pub fn get(&self, agent_id: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.id == agent_id)
    }

    /// All agents in insertion order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.agents.iter().filter(|a| a.status.is_active()).count()
    }

    pub fn count_by_role(&self, role: AgentRole) -> usize {
        self.agents.iter().filter(|a| a.role == role).count()
    }
}

impl Default for AgentRegistry {
    /// Seeded registry whose generator continues after `agent-004`
    fn default() -> Self {
        Self::seeded(Arc::new(SequentialIds::starting_at(5)))
    }
}
