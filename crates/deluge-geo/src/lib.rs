//! Geodesic helpers for placing a simulated grid on the globe.
//!
//! Pure functions and a validated bounding box; nothing here touches the
//! flood rules. The distances use a spherical Earth of radius
//! [`EARTH_RADIUS_KM`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod distance;
pub mod extent;

pub use distance::{lat_distance, lon_distance, EARTH_RADIUS_KM};
pub use extent::{GeoError, GeoExtent};
