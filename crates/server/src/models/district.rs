//! District domain type.

use storemap_core::DistrictId;

/// An administrative boundary (domain type).
///
/// Read-only at serving time; populated by the CLI import.
#[derive(Debug, Clone)]
pub struct District {
    pub id: DistrictId,
    pub name: String,
    /// Boundary as a GeoJSON geometry object (Polygon or MultiPolygon
    /// coordinate rings), as produced by `ST_AsGeoJSON`.
    pub boundary: serde_json::Value,
}
