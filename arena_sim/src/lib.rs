//! arena_sim - Headless lane simulation driving arena_core from a TOML scenario

pub mod scenario;
pub mod simulation;

pub use scenario::{default_scenario, Scenario};
pub use simulation::{SimError, Simulation, SimulationReport};
