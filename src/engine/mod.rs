//! Pathway tracing and lesion simulation
//!
//! Pure, read-only operations over a shared [`Catalog`](crate::anatomy::Catalog).
//! Unknown names produce empty results, never errors.

pub mod highlight;
pub mod simulator;
pub mod tracer;

pub use highlight::{HighlightSet, Simulation, SimulationMode};
pub use simulator::LesionSimulator;
pub use tracer::PathwayTracer;
