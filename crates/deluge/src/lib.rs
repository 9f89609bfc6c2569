//! Deluge: a cellular-automaton flood model over elevation grids.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! deluge sub-crates. For most users, adding `deluge` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use deluge::prelude::*;
//!
//! // A small valley draining toward the bottom row, with the outer
//! // ring walled off by the boundary mask.
//! let elevation = Grid2::from_rows(vec![
//!     vec![50.0, 50.0, 50.0, 50.0, 50.0],
//!     vec![50.0, 12.0, 10.0, 11.0, 50.0],
//!     vec![50.0, 9.0, 7.0, 8.0, 50.0],
//!     vec![50.0, 6.0, 4.0, 5.0, 50.0],
//!     vec![50.0, 50.0, 50.0, 50.0, 50.0],
//! ])
//! .unwrap();
//! let mut mask = Grid2::zeros(5, 5).unwrap();
//! for r in 1..4 {
//!     for c in 1..4 {
//!         mask[(r, c)] = 1.0;
//!     }
//! }
//!
//! let mut config = FloodConfig::new(elevation, vec![FloodSeed { row: 1, col: 2, volume: 6.0 }]);
//! config.boundary_mask = Some(mask);
//!
//! let mut world = FloodWorld::new(config).unwrap();
//! let outcome = world.run();
//! assert!(outcome.converged());
//! assert!((world.state().total_volume() - 6.0).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `deluge-core` | `Grid2`, `FloodState`, step ids, grid errors |
//! | [`space`] | `deluge-space` | Directions and the four-neighbour grid topology |
//! | [`geo`] | `deluge-geo` | Geodesic distances and geographic extents |
//! | [`rules`] | `deluge-rules` | Regime classification, transfer actions, preprocessing |
//! | [`engine`] | `deluge-engine` | Run configuration, the stepping driver, scenario files |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Grids, flood state and ids (`deluge-core`).
///
/// [`types::FloodState`] owns the elevation, water and excess grids
/// of a run.
pub use deluge_core as types;

/// Directions and grid topology (`deluge-space`).
///
/// [`space::GridTopology`] resolves the up to four neighbours of a cell;
/// off-grid neighbours do not exist.
pub use deluge_space as space;

/// Geodesic helpers (`deluge-geo`).
///
/// [`geo::GeoExtent`] frames a grid over a latitude/longitude box.
pub use deluge_geo as geo;

/// Local flood rules (`deluge-rules`).
///
/// [`rules::classify`] picks a [`rules::Regime`] for a cell and
/// [`rules::RuleSet`] plans its [`rules::Transfer`].
pub use deluge_rules as rules;

/// Stepping driver (`deluge-engine`).
///
/// Build a [`engine::FloodConfig`], hand it to [`engine::FloodWorld::new`],
/// then [`step`](engine::FloodWorld::step) or [`run`](engine::FloodWorld::run).
pub use deluge_engine as engine;

/// Common imports for typical deluge usage.
///
/// ```rust
/// use deluge::prelude::*;
/// ```
///
/// This imports grids and state, the topology, the rule types and the
/// driver with its configuration.
pub mod prelude {
    // Core types
    pub use deluge_core::{FloodState, Grid2, GridError, StepId};

    // Space
    pub use deluge_space::{Direction, DirectionSet, GridTopology};

    // Geography
    pub use deluge_geo::GeoExtent;

    // Rules
    pub use deluge_rules::{Action, Regime, RuleSet, Transfer};

    // Engine
    pub use deluge_engine::{
        ConfigError, FloodConfig, FloodSeed, FloodWorld, RunOutcome, SimParams, StepMetrics,
        UpdateOrder,
    };
}
