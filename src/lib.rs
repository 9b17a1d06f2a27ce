//! # squish_velocity_simulator
//!
//! The `squish_velocity_simulator` crate estimates the peak gas velocity
//! produced by squish flow in two-stroke engine combustion chambers,
//! following G.P. Blair's closed-form method ("Design and Simulation of
//! Two-Stroke Engines", 1996, p. 325-330).
//!
//! The piston kinematics are rebuilt from the crank and conrod geometry,
//! the squish band and the bowl are treated as adiabatic uniform-pressure
//! control volumes exchanging mass, and the model marches crank angle in
//! fixed 1-degree steps from exhaust-port opening to TDC.

mod engine;
mod kinematics;
mod storage;
mod zero_dim;

pub mod plot;

// Re-exporting
pub use crate::engine::engine::{Engine, EngineGeometry, OperatingPoint};
pub use crate::engine::json_reader::{read_json, JsonEngine};
pub use crate::kinematics::crank_slider::piston_displacement;
pub use crate::storage::StoredInputs;
pub use crate::zero_dim::chamber::ChamberGeometry;
pub use crate::zero_dim::squish::{SquishModel, SquishResult, GAMMA, GAS_R};
