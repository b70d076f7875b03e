//! Store route handlers.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use storemap_core::Coordinates;

use crate::db::{RepositoryError, StoreRepository};
use crate::error::AppError;
use crate::models::store::{NewStore, Store, StoreFilter, StoreUpdate};
use crate::state::AppState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Query parameters for store search.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub district: Option<String>,
}

/// Query parameters for store deletion.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub name: Option<String>,
}

/// Response for a single store.
#[derive(Debug, Serialize)]
pub struct StoreResponse {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub open_hours: Option<String>,
    pub district: String,
    pub longitude: f64,
    pub latitude: f64,
    pub image: Option<String>,
}

impl From<Store> for StoreResponse {
    fn from(store: Store) -> Self {
        Self {
            id: store.id.as_i32(),
            name: store.name,
            address: store.address,
            phone: store.phone,
            open_hours: store.open_hours,
            district: store.district,
            longitude: store.location.longitude(),
            latitude: store.location.latitude(),
            image: store.image,
        }
    }
}

/// Request to create a store.
///
/// Coordinates arrive as raw JSON values so that both numbers and
/// numeric strings are accepted.
#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub open_hours: Option<String>,
    pub district: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub image: Option<String>,
}

impl CreateStoreRequest {
    /// Validate required fields and parse coordinates.
    fn into_new_store(self) -> Result<NewStore, AppError> {
        let location = parse_location(self.longitude.as_ref(), self.latitude.as_ref())?;

        Ok(NewStore {
            name: required(self.name, "name")?,
            address: required(self.address, "address")?,
            phone: required(self.phone, "phone")?,
            open_hours: required(self.open_hours, "open_hours")?,
            district: required(self.district, "district")?,
            location,
            image: self.image,
        })
    }
}

/// Response for store creation.
#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: i32,
    pub message: String,
}

/// Request to partially update a store, keyed by `original_name`.
#[derive(Debug, Deserialize)]
pub struct UpdateStoreRequest {
    pub original_name: Option<String>,
    pub name: Option<String>,
    pub latitude: Option<Value>,
    pub longitude: Option<Value>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub open_hours: Option<String>,
    pub district: Option<String>,
    pub image: Option<String>,
}

/// Generic success message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// =============================================================================
// Validation Helpers
// =============================================================================

/// Require a field to be present.
fn required(value: Option<String>, field: &'static str) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::Validation(format!("missing required field: {field}")))
}

/// Parse a coordinate component from a JSON number or numeric string.
fn parse_coordinate(value: Option<&Value>, field: &'static str) -> Result<f64, AppError> {
    let value =
        value.ok_or_else(|| AppError::Validation(format!("missing required field: {field}")))?;

    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or_else(|| AppError::Validation(format!("{field} must be a number")))
}

/// Parse and range-check a (longitude, latitude) pair.
fn parse_location(longitude: Option<&Value>, latitude: Option<&Value>) -> Result<Coordinates, AppError> {
    let longitude = parse_coordinate(longitude, "longitude")?;
    let latitude = parse_coordinate(latitude, "latitude")?;

    Coordinates::new(longitude, latitude).map_err(|e| AppError::Validation(e.to_string()))
}

/// Map write-path repository errors onto the API taxonomy.
fn map_write_error(e: RepositoryError) -> AppError {
    match e {
        RepositoryError::Conflict(msg) => AppError::Conflict(msg),
        RepositoryError::NotFound => AppError::NotFound("Store not found".to_owned()),
        other => AppError::Database(other),
    }
}

// =============================================================================
// Route Handlers
// =============================================================================

/// Search or list stores.
///
/// GET /stores?q=&district=
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<StoreResponse>>, AppError> {
    let filter = StoreFilter::from_params(params.q, params.district);
    let stores = StoreRepository::new(state.pool()).search(&filter).await?;

    Ok(Json(stores.into_iter().map(Into::into).collect()))
}

/// Create a store.
///
/// POST /stores
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AppError> {
    let new = request.into_new_store()?;

    let id = StoreRepository::new(state.pool())
        .create(&new)
        .await
        .map_err(map_write_error)?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: id.as_i32(),
            message: "Store created".to_owned(),
        }),
    ))
}

/// Partially update a store, keyed by `original_name`.
///
/// PUT /stores
///
/// Optional fields follow the replace-only-with-non-empty-override merge
/// policy; `name`, `latitude`, and `longitude` are always applied. The
/// update statement is keyed by the id captured during the fetch, so a
/// concurrent delete or rename surfaces as 404 rather than silent
/// success.
pub async fn update(
    State(state): State<AppState>,
    Json(request): Json<UpdateStoreRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let original_name = required(request.original_name, "original_name")?;
    let name = required(request.name, "name")?;
    if request.latitude.is_none() {
        return Err(AppError::Validation(
            "missing required field: latitude".to_owned(),
        ));
    }
    if request.longitude.is_none() {
        return Err(AppError::Validation(
            "missing required field: longitude".to_owned(),
        ));
    }

    let repo = StoreRepository::new(state.pool());
    let existing = repo
        .get_by_name(&original_name)
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found".to_owned()))?;

    let location = parse_location(request.longitude.as_ref(), request.latitude.as_ref())?;
    let update = StoreUpdate {
        name,
        location,
        address: request.address,
        phone: request.phone,
        open_hours: request.open_hours,
        district: request.district,
        image: request.image,
    };

    let merged = existing.merged_with(&update);
    repo.update(&merged).await.map_err(map_write_error)?;

    Ok(Json(MessageResponse {
        message: "Store updated".to_owned(),
    }))
}

/// Delete a store by name.
///
/// DELETE /stores?name=
pub async fn remove(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Result<Json<MessageResponse>, AppError> {
    let name = params
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::Validation("missing store name".to_owned()))?;

    StoreRepository::new(state.pool())
        .delete_by_name(&name)
        .await
        .map_err(map_write_error)?;

    Ok(Json(MessageResponse {
        message: "Store deleted".to_owned(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::models::store::Store;

    #[test]
    fn test_parse_coordinate_accepts_number_and_string() {
        assert_eq!(
            parse_coordinate(Some(&json!(21.7168)), "latitude").unwrap(),
            21.7168
        );
        assert_eq!(
            parse_coordinate(Some(&json!("21.7168")), "latitude").unwrap(),
            21.7168
        );
        assert_eq!(
            parse_coordinate(Some(&json!(" 21.7168 ")), "latitude").unwrap(),
            21.7168
        );
    }

    #[test]
    fn test_parse_coordinate_rejects_garbage() {
        assert!(parse_coordinate(Some(&json!("north")), "latitude").is_err());
        assert!(parse_coordinate(Some(&json!(true)), "latitude").is_err());
        assert!(parse_coordinate(Some(&json!(null)), "latitude").is_err());
        assert!(parse_coordinate(None, "latitude").is_err());
    }

    #[test]
    fn test_parse_location_range_checks() {
        assert!(parse_location(Some(&json!(104.9)), Some(&json!(21.7))).is_ok());
        assert!(matches!(
            parse_location(Some(&json!(200.0)), Some(&json!(21.7))),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_create_request_requires_all_fields() {
        let request: CreateStoreRequest = serde_json::from_value(json!({
            "name": "Store A",
            "address": "1 Main St",
            "phone": "0123",
            "open_hours": "8-17",
            "latitude": 21.7,
            "longitude": 104.9
        }))
        .unwrap();

        // district is missing
        assert!(matches!(
            request.into_new_store(),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_create_request_parses_string_coordinates() {
        let request: CreateStoreRequest = serde_json::from_value(json!({
            "name": "Store A",
            "address": "1 Main St",
            "phone": "0123",
            "open_hours": "8-17",
            "district": "North",
            "latitude": "21.7",
            "longitude": "104.9"
        }))
        .unwrap();

        let new = request.into_new_store().unwrap();
        assert_eq!(new.location.latitude(), 21.7);
        assert_eq!(new.location.longitude(), 104.9);
        assert!(new.image.is_none());
    }

    #[test]
    fn test_store_response_wire_shape() {
        let store = Store {
            id: storemap_core::StoreId::new(5),
            name: "Store A".to_owned(),
            address: None,
            phone: None,
            open_hours: None,
            district: "North".to_owned(),
            location: Coordinates::new(104.9, 21.7).unwrap(),
            image: None,
        };

        let value = serde_json::to_value(StoreResponse::from(store)).unwrap();
        assert_eq!(value["id"], 5);
        assert_eq!(value["name"], "Store A");
        assert_eq!(value["district"], "North");
        assert_eq!(value["longitude"], 104.9);
        assert_eq!(value["latitude"], 21.7);
        assert_eq!(value["address"], json!(null));
    }
}
