//! Forage - Real-time multi-agent foraging simulation

pub mod core;
pub mod simulation;
pub mod world;
