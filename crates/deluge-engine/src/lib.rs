//! Run configuration and stepping driver for the deluge flood automaton.
//!
//! [`FloodConfig`] describes one run: elevation, optional domain mask,
//! seeds and [`SimParams`]. [`FloodWorld`] validates it, applies the
//! boundary raise once, and then steps the rules until no cell holds more
//! than the threshold of excess volume or the step cap is hit.
//!
//! Two update orders are offered ([`UpdateOrder`]): strict row-major
//! in-place updates, and a buffered mode that classifies every cell
//! against the frozen start-of-step state.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod metrics;
pub mod scenario;
pub mod trajectory;
pub mod world;

pub use config::{ConfigError, FloodConfig, FloodSeed, SimParams, UpdateOrder};
pub use metrics::{RegimeCounts, StepMetrics};
pub use scenario::ScenarioError;
pub use trajectory::Snapshot;
pub use world::{FloodWorld, RunOutcome};
