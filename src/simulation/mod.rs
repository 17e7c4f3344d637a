pub mod agent;
pub mod depot;
pub mod movement;
pub mod resource;
pub mod tick;

pub use agent::{Agent, AgentState};
pub use depot::Depot;
pub use movement::move_toward;
pub use resource::Resource;
pub use tick::{find_nearest_available, run_simulation_tick, SimulationEvent};
