//! Collector agents
//!
//! An agent's phase is never stored: it is derived from what the agent is
//! doing (carrying, pursuing a live target, or neither), so the fields and
//! the reported state cannot drift apart.

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, DepotId, ResourceId, Vec2};

/// Observable phase of the collect/deliver cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AgentState {
    /// No live target; scanning or wandering
    Searching,
    /// Moving toward an available resource
    Collecting,
    /// Carrying a load back to the assigned depot
    Returning,
}

/// A mobile collector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub position: Vec2,
    /// World units covered per tick, drawn once at spawn
    pub speed: f32,
    /// True between a successful harvest and the matching delivery
    pub carrying: bool,
    /// Resource currently pursued; a stale id reads as unavailable
    pub target_resource: Option<ResourceId>,
    /// Delivery destination, fixed at spawn by round-robin
    pub assigned_depot: DepotId,
}

impl Agent {
    pub fn new(id: AgentId, position: Vec2, speed: f32, assigned_depot: DepotId) -> Self {
        Self {
            id,
            position,
            speed,
            carrying: false,
            target_resource: None,
            assigned_depot,
        }
    }

    /// Derive the agent's state; `target_available` reports whether the
    /// current `target_resource` resolves to a stocked resource.
    pub fn state(&self, target_available: bool) -> AgentState {
        if self.carrying {
            AgentState::Returning
        } else if self.target_resource.is_some() && target_available {
            AgentState::Collecting
        } else {
            AgentState::Searching
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_agent() -> Agent {
        Agent::new(AgentId(0), Vec2::new(10.0, 10.0), 2.0, DepotId(0))
    }

    #[test]
    fn test_state_searching_without_target() {
        let agent = sample_agent();
        assert_eq!(agent.state(false), AgentState::Searching);
    }

    #[test]
    fn test_state_collecting_with_live_target() {
        let mut agent = sample_agent();
        agent.target_resource = Some(ResourceId(3));
        assert_eq!(agent.state(true), AgentState::Collecting);
    }

    #[test]
    fn test_state_searching_when_target_unavailable() {
        // A drained or removed target reads as Searching until re-acquisition
        let mut agent = sample_agent();
        agent.target_resource = Some(ResourceId(3));
        assert_eq!(agent.state(false), AgentState::Searching);
    }

    #[test]
    fn test_state_returning_overrides_target() {
        let mut agent = sample_agent();
        agent.carrying = true;
        agent.target_resource = Some(ResourceId(3));
        assert_eq!(agent.state(true), AgentState::Returning);
    }
}
