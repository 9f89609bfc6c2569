//! Lat/lon bounding box framing a simulated grid.

use crate::distance::{lat_distance, lon_distance};
use serde::{Deserialize, Serialize};

/// Errors from constructing a [`GeoExtent`].
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeoError {
    /// A bound was NaN or infinite.
    #[error("{name} bound is not finite: {value}")]
    NonFinite {
        /// Which bound.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A latitude outside `[-90, 90]`.
    #[error("{name} latitude {value} outside [-90, 90]")]
    LatitudeRange {
        /// `"north"` or `"south"`.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// A longitude outside `[-180, 180]`.
    #[error("{name} longitude {value} outside [-180, 180]")]
    LongitudeRange {
        /// `"east"` or `"west"`.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
    /// North bound below south bound.
    #[error("north {north} is below south {south}")]
    Inverted {
        /// North bound.
        north: f64,
        /// South bound.
        south: f64,
    },
    /// A grid dimension of zero passed to [`GeoExtent::cell_size_km`].
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    EmptyGrid {
        /// Rows requested.
        rows: usize,
        /// Columns requested.
        cols: usize,
    },
}

/// A validated bounding box in degrees.
///
/// Rows of the simulated grid run north to south and columns west to
/// east. `east < west` is allowed and means the box crosses the
/// antimeridian; widths are always measured the short way round.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExtent")]
pub struct GeoExtent {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

#[derive(Deserialize)]
struct RawExtent {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl TryFrom<RawExtent> for GeoExtent {
    type Error = GeoError;

    fn try_from(raw: RawExtent) -> Result<Self, GeoError> {
        Self::new(raw.north, raw.south, raw.east, raw.west)
    }
}

impl GeoExtent {
    /// Validate and build an extent.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self, GeoError> {
        for (name, value) in [("north", north), ("south", south), ("east", east), ("west", west)] {
            if !value.is_finite() {
                return Err(GeoError::NonFinite { name, value });
            }
        }
        for (name, value) in [("north", north), ("south", south)] {
            if !(-90.0..=90.0).contains(&value) {
                return Err(GeoError::LatitudeRange { name, value });
            }
        }
        for (name, value) in [("east", east), ("west", west)] {
            if !(-180.0..=180.0).contains(&value) {
                return Err(GeoError::LongitudeRange { name, value });
            }
        }
        if north < south {
            return Err(GeoError::Inverted { north, south });
        }
        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// North bound.
    pub fn north(&self) -> f64 {
        self.north
    }

    /// South bound.
    pub fn south(&self) -> f64 {
        self.south
    }

    /// East bound.
    pub fn east(&self) -> f64 {
        self.east
    }

    /// West bound.
    pub fn west(&self) -> f64 {
        self.west
    }

    /// North-south size in km.
    pub fn height_km(&self) -> f64 {
        lat_distance(self.south, self.north)
    }

    /// East-west size in km along the centre parallel.
    pub fn width_km(&self) -> f64 {
        let (lat, _) = self.center();
        lon_distance(self.west, self.east) * lat.to_radians().cos()
    }

    /// `(lat, lon)` of the box centre.
    pub fn center(&self) -> (f64, f64) {
        let lat = (self.north + self.south) / 2.0;
        let mut lon = (self.west + self.east) / 2.0;
        if self.east < self.west {
            lon += 180.0;
            if lon > 180.0 {
                lon -= 360.0;
            }
        }
        (lat, lon)
    }

    /// `(cell_height_km, cell_width_km)` when the box is divided into a
    /// `rows x cols` grid.
    pub fn cell_size_km(&self, rows: usize, cols: usize) -> Result<(f64, f64), GeoError> {
        if rows == 0 || cols == 0 {
            return Err(GeoError::EmptyGrid { rows, cols });
        }
        Ok((self.height_km() / rows as f64, self.width_km() / cols as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn survey_box() -> GeoExtent {
        GeoExtent::new(36.9052, 36.9022, -121.7456, -121.7519).unwrap()
    }

    #[test]
    fn survey_box_dimensions() {
        let e = survey_box();
        // 0.003 deg of latitude, 0.0063 deg of longitude at ~36.9 N.
        assert!((e.height_km() - 0.33358).abs() < 1e-3, "{}", e.height_km());
        assert!((e.width_km() - 0.5603).abs() < 2e-3, "{}", e.width_km());
        let (lat, lon) = e.center();
        assert!((lat - 36.9037).abs() < 1e-9);
        assert!((lon - -121.74875).abs() < 1e-9);
    }

    #[test]
    fn cell_size_divides_extent() {
        let e = survey_box();
        let (h, w) = e.cell_size_km(9, 9).unwrap();
        assert!((h * 9.0 - e.height_km()).abs() < 1e-12);
        assert!((w * 9.0 - e.width_km()).abs() < 1e-12);
        assert_eq!(
            e.cell_size_km(0, 9),
            Err(GeoError::EmptyGrid { rows: 0, cols: 9 })
        );
    }

    #[test]
    fn invalid_boxes_rejected() {
        assert!(matches!(
            GeoExtent::new(f64::NAN, 0.0, 1.0, 0.0),
            Err(GeoError::NonFinite { name: "north", .. })
        ));
        assert!(matches!(
            GeoExtent::new(91.0, 0.0, 1.0, 0.0),
            Err(GeoError::LatitudeRange { name: "north", .. })
        ));
        assert!(matches!(
            GeoExtent::new(1.0, 0.0, 181.0, 0.0),
            Err(GeoError::LongitudeRange { name: "east", .. })
        ));
        assert_eq!(
            GeoExtent::new(0.0, 1.0, 1.0, 0.0),
            Err(GeoError::Inverted {
                north: 0.0,
                south: 1.0
            })
        );
    }

    #[test]
    fn antimeridian_center() {
        let e = GeoExtent::new(1.0, -1.0, -179.0, 179.0).unwrap();
        let (_, lon) = e.center();
        assert!((lon.abs() - 180.0).abs() < 1e-9, "{lon}");
        // Two degrees the short way round.
        assert!((e.width_km() - lon_distance(0.0, 2.0)).abs() < 1e-6);
    }

    #[test]
    fn serde_field_names() {
        let e = survey_box();
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"north\":36.9052"));
        let back: GeoExtent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
        let inverted = r#"{"north":0.0,"south":1.0,"east":1.0,"west":0.0}"#;
        assert!(serde_json::from_str::<GeoExtent>(inverted).is_err());
    }
}
