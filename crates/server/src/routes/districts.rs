//! District route handlers.

use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value;

use crate::db::DistrictRepository;
use crate::error::AppError;
use crate::models::District;
use crate::state::AppState;

/// Response for a single district boundary.
#[derive(Debug, Serialize)]
pub struct DistrictResponse {
    pub name: String,
    /// GeoJSON geometry object (coordinate rings per polygon).
    pub geom: Value,
}

impl From<District> for DistrictResponse {
    fn from(district: District) -> Self {
        Self {
            name: district.name,
            geom: district.boundary,
        }
    }
}

/// List every district with its boundary.
///
/// GET /districts
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<DistrictResponse>>, AppError> {
    let districts = DistrictRepository::new(state.pool()).list().await?;

    Ok(Json(districts.into_iter().map(Into::into).collect()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;
    use storemap_core::DistrictId;

    #[test]
    fn test_district_response_wire_shape() {
        let district = District {
            id: DistrictId::new(1),
            name: "North".to_owned(),
            boundary: json!({"type": "MultiPolygon", "coordinates": []}),
        };

        let value = serde_json::to_value(DistrictResponse::from(district)).unwrap();
        assert_eq!(value["name"], "North");
        assert_eq!(value["geom"]["type"], "MultiPolygon");
        // The surrogate id stays internal on this surface
        assert!(value.get("id").is_none());
    }
}
