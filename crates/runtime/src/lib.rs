//! Orchestration layer between indexed chain state and the simulation engine.
//!
//! `sim-runtime` owns everything the pure engine refuses to: decoding indexer
//! JSON into snapshots, parsing hex entropy words, presentation adjustments,
//! environment-driven configuration, and tracing. The engine itself stays in
//! `sim-core` and is re-exported for callers that need raw access.
pub mod config;
pub mod error;
pub mod simulator;
pub mod snapshot;

pub use config::SimConfig;
pub use error::RuntimeError;
pub use simulator::{EncounterRow, Simulator};
pub use snapshot::{parse_entropy, DecisionContext, DecisionRecord};
