//! Read-only serializable views of world state
//!
//! Presentation layers poll these after ticks; nothing here mutates the
//! world or exposes interior references.

use serde::{Deserialize, Serialize};

use crate::core::types::{AgentId, DepotId, ResourceId, Tick, Vec2};
use crate::simulation::agent::AgentState;
use crate::world::World;

/// Per-agent view for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    pub position: Vec2,
    /// Drives the "loaded" visual marker
    pub carrying: bool,
    pub state: AgentState,
}

/// Per-resource view for rendering and quantity labels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceView {
    pub id: ResourceId,
    pub position: Vec2,
    pub quantity: u32,
    /// Drained but still visible until its grace period ends
    pub depleted: bool,
}

/// Per-depot running total
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepotView {
    pub id: DepotId,
    pub total: u64,
}

/// Full world view bundling every per-entity snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: Tick,
    pub running: bool,
    pub agents: Vec<AgentView>,
    pub resources: Vec<ResourceView>,
    pub depots: Vec<DepotView>,
}

impl World {
    pub fn agent_views(&self) -> Vec<AgentView> {
        self.agents
            .iter()
            .map(|agent| {
                let target_available = agent
                    .target_resource
                    .and_then(|id| self.resource(id))
                    .map_or(false, |resource| resource.is_available());
                AgentView {
                    id: agent.id,
                    position: agent.position,
                    carrying: agent.carrying,
                    state: agent.state(target_available),
                }
            })
            .collect()
    }

    pub fn resource_views(&self) -> Vec<ResourceView> {
        self.resources
            .iter()
            .map(|resource| ResourceView {
                id: resource.id,
                position: resource.position,
                quantity: resource.quantity,
                depleted: !resource.is_available(),
            })
            .collect()
    }

    pub fn depot_views(&self) -> Vec<DepotView> {
        self.depots
            .iter()
            .map(|depot| DepotView {
                id: depot.id,
                total: depot.total,
            })
            .collect()
    }

    /// Remaining quantity of one resource, for label/hover queries
    pub fn resource_quantity(&self, id: ResourceId) -> Option<u32> {
        self.resource(id).map(|resource| resource.quantity)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            tick: self.current_tick,
            running: self.running,
            agents: self.agent_views(),
            resources: self.resource_views(),
            depots: self.depot_views(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::SimulationConfig;

    #[test]
    fn test_snapshot_reflects_world_contents() {
        let mut world = World::new(SimulationConfig::default());
        world.spawn_resource_at(Vec2::new(100.0, 100.0));
        world.spawn_agent_at(Vec2::new(50.0, 50.0), 2.0);

        let snapshot = world.snapshot();
        assert_eq!(snapshot.tick, 0);
        assert!(!snapshot.running, "fresh worlds snapshot as paused");
        assert_eq!(snapshot.agents.len(), 1);
        assert_eq!(snapshot.resources.len(), 1);
        assert_eq!(snapshot.depots.len(), 2);
        assert_eq!(snapshot.resources[0].quantity, 100);
        assert!(!snapshot.resources[0].depleted);
    }

    #[test]
    fn test_agent_view_state_derivation() {
        let mut world = World::new(SimulationConfig::default());
        let resource = world.spawn_resource_at(Vec2::new(100.0, 100.0));
        world.spawn_agent_at(Vec2::new(50.0, 50.0), 2.0);

        let views = world.agent_views();
        assert_eq!(views[0].state, AgentState::Searching);

        world.agents[0].target_resource = Some(resource);
        assert_eq!(world.agent_views()[0].state, AgentState::Collecting);

        world.agents[0].carrying = true;
        assert_eq!(world.agent_views()[0].state, AgentState::Returning);
    }

    #[test]
    fn test_depleted_flag_in_resource_view() {
        let mut world = World::new(SimulationConfig::default());
        let id = world.spawn_resource_at(Vec2::new(100.0, 100.0));
        if let Some(resource) = world.resource_mut(id) {
            resource.quantity = 0;
        }
        let views = world.resource_views();
        assert!(views[0].depleted);
        assert_eq!(views[0].quantity, 0);
    }

    #[test]
    fn test_resource_quantity_point_query() {
        let mut world = World::new(SimulationConfig::default());
        let id = world.spawn_resource_at(Vec2::new(100.0, 100.0));
        assert_eq!(world.resource_quantity(id), Some(100));
        assert_eq!(world.resource_quantity(ResourceId(42)), None);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let mut world = World::new(SimulationConfig::default());
        world.populate();
        let json = serde_json::to_string(&world.snapshot()).unwrap();
        assert!(json.contains("\"agents\""));
        assert!(json.contains("\"depots\""));
    }
}
