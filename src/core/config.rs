//! Simulation configuration with documented constants
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other.

use serde::{Deserialize, Serialize};

use crate::core::error::{ForageError, Result};
use crate::core::types::Vec2;

/// Configuration for the foraging simulation
///
/// These values reproduce the reference arena behavior. Changing them
/// affects pacing (how fast resources drain) and traffic patterns
/// (how far agents travel between resources and depots).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    // === ARENA ===
    /// Arena width in world units
    pub arena_width: f32,

    /// Arena height in world units
    pub arena_height: f32,

    /// Inset from every arena edge for sampled positions (world units)
    ///
    /// Spawn points and wander targets are drawn from the margin-inset
    /// interior, so entities never sit on the boundary.
    pub spawn_margin: f32,

    // === RESOURCES ===
    /// Quantity a freshly spawned resource holds
    ///
    /// With the default harvest_amount (10), a resource of 100 survives
    /// exactly 10 collection visits before depleting.
    pub initial_quantity: u32,

    /// Units removed from a resource per successful harvest
    pub harvest_amount: u32,

    /// Units credited to a depot per delivery
    ///
    /// Kept equal to harvest_amount so depot totals mirror the quantity
    /// drained from resources one-to-one.
    pub delivery_amount: u64,

    /// Delay between a resource reaching quantity 0 and its removal (ms)
    ///
    /// At the default 6000 ms and 16 ms tick cadence, a depleted resource
    /// stays visible for roughly 375 ticks before it disappears.
    pub grace_period_ms: u64,

    // === AGENTS ===
    /// Lower bound of the per-agent speed draw (world units per tick)
    pub speed_min: f32,

    /// Upper bound of the per-agent speed draw, exclusive
    ///
    /// Each agent samples its lifetime speed once from
    /// [speed_min, speed_max) at spawn.
    pub speed_max: f32,

    // === DEPOTS ===
    /// Depot positions, in creation order
    ///
    /// Agents are assigned round-robin over this list by creation index,
    /// so its length sets the delivery fan-out.
    pub depot_positions: Vec<Vec2>,

    // === POPULATION ===
    /// Resources seeded by `World::populate`
    pub initial_resources: usize,

    /// Agents seeded by `World::populate`
    pub initial_agents: usize,

    // === DRIVER ===
    /// Logical time advanced per driver tick (ms)
    ///
    /// The core never sleeps; drivers add this to their clock before each
    /// tick call. 16 ms approximates a 60 Hz frame cadence.
    pub tick_interval_ms: u64,

    /// Seed for the world's deterministic RNG
    ///
    /// Two worlds with the same seed and the same command sequence
    /// produce identical runs.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            // Arena
            arena_width: 800.0,
            arena_height: 600.0,
            spawn_margin: 20.0,

            // Resources (quantity / harvest = visits to deplete)
            initial_quantity: 100,
            harvest_amount: 10,
            delivery_amount: 10,
            grace_period_ms: 6000,

            // Agent speed draw, half-open
            speed_min: 1.0,
            speed_max: 3.0,

            // Two depots, one near each upper corner
            depot_positions: vec![Vec2::new(60.0, 80.0), Vec2::new(740.0, 80.0)],

            // Startup population
            initial_resources: 5,
            initial_agents: 3,

            // Driver cadence and determinism
            tick_interval_ms: 16,
            seed: 12345,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return Err(format!(
                "arena dimensions must be positive (got {} x {})",
                self.arena_width, self.arena_height
            ));
        }

        // The margin-inset interior must be nonempty on both axes
        if self.spawn_margin < 0.0
            || self.spawn_margin * 2.0 >= self.arena_width
            || self.spawn_margin * 2.0 >= self.arena_height
        {
            return Err(format!(
                "spawn_margin ({}) must leave interior space in a {} x {} arena",
                self.spawn_margin, self.arena_width, self.arena_height
            ));
        }

        if self.speed_min <= 0.0 {
            return Err(format!("speed_min ({}) must be positive", self.speed_min));
        }
        if self.speed_min > self.speed_max {
            return Err(format!(
                "speed_min ({}) must be <= speed_max ({})",
                self.speed_min, self.speed_max
            ));
        }

        if self.initial_quantity == 0 {
            return Err("initial_quantity must be at least 1".into());
        }
        if self.harvest_amount == 0 || self.delivery_amount == 0 {
            return Err("harvest_amount and delivery_amount must be at least 1".into());
        }

        if self.depot_positions.is_empty() {
            return Err("at least one depot position is required".into());
        }
        for (i, pos) in self.depot_positions.iter().enumerate() {
            if pos.x < 0.0 || pos.x > self.arena_width || pos.y < 0.0 || pos.y > self.arena_height {
                return Err(format!(
                    "depot {} at ({}, {}) lies outside the {} x {} arena",
                    i, pos.x, pos.y, self.arena_width, self.arena_height
                ));
            }
        }

        if self.tick_interval_ms == 0 {
            return Err("tick_interval_ms must be at least 1".into());
        }

        Ok(())
    }

    /// Load and validate a config from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate a config from TOML text
    ///
    /// Missing fields fall back to their defaults, so partial files work.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate().map_err(ForageError::InvalidConfig)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_nonpositive_speed() {
        let mut config = SimulationConfig::default();
        config.speed_min = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_speed_range() {
        let mut config = SimulationConfig::default();
        config.speed_min = 5.0;
        config.speed_max = 3.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_margin_consuming_arena() {
        let mut config = SimulationConfig::default();
        config.spawn_margin = 400.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_depot_list() {
        let mut config = SimulationConfig::default();
        config.depot_positions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_depot_outside_arena() {
        let mut config = SimulationConfig::default();
        config.depot_positions.push(Vec2::new(-10.0, 50.0));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_toml_partial_file_uses_defaults() {
        let config = SimulationConfig::parse_toml(
            r#"
            harvest_amount = 25
            grace_period_ms = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.harvest_amount, 25);
        assert_eq!(config.grace_period_ms, 1000);
        // Untouched fields keep their defaults
        assert_eq!(config.initial_quantity, 100);
        assert_eq!(config.depot_positions.len(), 2);
    }

    #[test]
    fn test_parse_toml_depot_tables() {
        let config = SimulationConfig::parse_toml(
            r#"
            depot_positions = [{ x = 100.0, y = 100.0 }]
            "#,
        )
        .unwrap();
        assert_eq!(config.depot_positions.len(), 1);
        assert!((config.depot_positions[0].x - 100.0).abs() < 0.0001);
    }

    #[test]
    fn test_parse_toml_rejects_invalid_values() {
        let result = SimulationConfig::parse_toml("speed_min = 0.0");
        assert!(result.is_err(), "zero speed_min should fail validation");
    }

    #[test]
    fn test_parse_toml_rejects_malformed_text() {
        assert!(SimulationConfig::parse_toml("harvest_amount = ").is_err());
    }
}
