//! World aggregate - owns all entities and the run state

pub mod snapshot;

pub use snapshot::{AgentView, DepotView, ResourceView, WorldSnapshot};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::config::SimulationConfig;
use crate::core::error::{ForageError, Result};
use crate::core::types::{AgentId, DepotId, ResourceId, Tick, Vec2};
use crate::simulation::agent::Agent;
use crate::simulation::depot::Depot;
use crate::simulation::resource::Resource;

/// The simulation world: entity collections, RNG, and run state
///
/// Agents and resources live in insertion-ordered vectors; that order is
/// the tie-break order for target selection and the update order for the
/// tick, so it is part of the simulation's observable behavior.
pub struct World {
    /// Active configuration, fixed for the world's lifetime
    pub config: SimulationConfig,
    /// All agents, in creation order
    pub agents: Vec<Agent>,
    /// All live resources, in creation order
    pub resources: Vec<Resource>,
    /// All depots, fixed at construction
    pub depots: Vec<Depot>,
    /// Random number generator (deterministic)
    pub rng: ChaCha8Rng,
    /// Gates whether ticks advance simulation state
    pub running: bool,
    /// Completed tick count
    pub current_tick: Tick,
    /// Next agent ID to assign
    next_agent_id: u32,
    /// Next resource ID to assign
    next_resource_id: u32,
}

impl World {
    /// Build an empty world from a config; depots come up at their
    /// configured positions and the world boots paused, advancing only
    /// after the first `toggle_running` call.
    pub fn new(config: SimulationConfig) -> Self {
        // Debug builds reject invalid configs at the boundary
        if cfg!(debug_assertions) {
            if let Err(reason) = config.validate() {
                panic!("invalid simulation config: {}", reason);
            }
        }

        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let depots = config
            .depot_positions
            .iter()
            .enumerate()
            .map(|(i, position)| Depot::new(DepotId(i as u32), Some(*position)))
            .collect();

        Self {
            config,
            agents: Vec::new(),
            resources: Vec::new(),
            depots,
            rng,
            running: false,
            current_tick: 0,
            next_agent_id: 0,
            next_resource_id: 0,
        }
    }

    /// Generate a new unique AgentId
    fn next_agent_id(&mut self) -> AgentId {
        let id = AgentId(self.next_agent_id);
        self.next_agent_id += 1;
        id
    }

    /// Generate a new unique ResourceId
    fn next_resource_id(&mut self) -> ResourceId {
        let id = ResourceId(self.next_resource_id);
        self.next_resource_id += 1;
        id
    }

    /// Sample a point from the margin-inset arena interior
    pub fn random_position(&mut self) -> Vec2 {
        let margin = self.config.spawn_margin;
        let max_x = self.config.arena_width - margin;
        let max_y = self.config.arena_height - margin;
        Vec2::new(
            self.rng.gen_range(margin..max_x),
            self.rng.gen_range(margin..max_y),
        )
    }

    /// Spawn a resource at a random position
    pub fn spawn_resource(&mut self) -> ResourceId {
        let position = self.random_position();
        self.spawn_resource_at(position)
    }

    /// Spawn a resource at an explicit position
    pub fn spawn_resource_at(&mut self, position: Vec2) -> ResourceId {
        let id = self.next_resource_id();
        let quantity = self.config.initial_quantity;
        self.resources.push(Resource::new(id, position, quantity));
        tracing::info!(
            "resource {} spawned at ({:.0}, {:.0}) with {} units",
            id.0,
            position.x,
            position.y,
            quantity
        );
        id
    }

    /// Spawn an agent at a random position with a random speed
    pub fn spawn_agent(&mut self) -> AgentId {
        let position = self.random_position();
        let speed = if self.config.speed_min < self.config.speed_max {
            let (min, max) = (self.config.speed_min, self.config.speed_max);
            self.rng.gen_range(min..max)
        } else {
            self.config.speed_min
        };
        self.spawn_agent_at(position, speed)
    }

    /// Spawn an agent at an explicit position with an explicit speed.
    ///
    /// The depot assignment is round-robin over the depot list by creation
    /// index, and never changes afterwards.
    pub fn spawn_agent_at(&mut self, position: Vec2, speed: f32) -> AgentId {
        let id = self.next_agent_id();
        let depot_index = id.0 as usize % self.depots.len();
        let assigned_depot = self.depots[depot_index].id;
        self.agents.push(Agent::new(id, position, speed, assigned_depot));
        tracing::info!(
            "agent {} spawned at ({:.0}, {:.0}), speed {:.1}, depot {}",
            id.0,
            position.x,
            position.y,
            speed,
            assigned_depot.0
        );
        id
    }

    /// Seed the starting population from the config
    pub fn populate(&mut self) {
        for _ in 0..self.config.initial_resources {
            self.spawn_resource();
        }
        for _ in 0..self.config.initial_agents {
            self.spawn_agent();
        }
        tracing::info!(
            "seeded {} resources and {} agents",
            self.config.initial_resources,
            self.config.initial_agents
        );
    }

    /// Flip the running flag, returning the new state
    pub fn toggle_running(&mut self) -> bool {
        self.running = !self.running;
        tracing::info!(
            "simulation {}",
            if self.running { "resumed" } else { "paused" }
        );
        self.running
    }

    /// Resolve a depot's position after the fact (hosts that measure
    /// layout late call this before carrying agents can deliver there)
    pub fn place_depot(&mut self, id: DepotId, position: Vec2) -> Result<()> {
        match self.depots.iter_mut().find(|depot| depot.id == id) {
            Some(depot) => {
                depot.position = Some(position);
                tracing::info!(
                    "depot {} placed at ({:.0}, {:.0})",
                    id.0,
                    position.x,
                    position.y
                );
                Ok(())
            }
            None => Err(ForageError::DepotNotFound(id)),
        }
    }

    pub fn resource(&self, id: ResourceId) -> Option<&Resource> {
        self.resources.iter().find(|resource| resource.id == id)
    }

    pub fn resource_mut(&mut self, id: ResourceId) -> Option<&mut Resource> {
        self.resources.iter_mut().find(|resource| resource.id == id)
    }

    pub fn depot(&self, id: DepotId) -> Option<&Depot> {
        self.depots.iter().find(|depot| depot.id == id)
    }

    pub fn depot_mut(&mut self, id: DepotId) -> Option<&mut Depot> {
        self.depots.iter_mut().find(|depot| depot.id == id)
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    /// Drop every agent target that names the given resource
    pub fn clear_targets_for(&mut self, resource: ResourceId) {
        for agent in &mut self.agents {
            if agent.target_resource == Some(resource) {
                agent.target_resource = None;
            }
        }
    }

    pub fn advance_tick(&mut self) {
        self.current_tick += 1;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}
