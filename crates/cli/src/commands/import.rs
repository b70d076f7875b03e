//! Offline data import commands.
//!
//! Districts arrive as a GeoJSON FeatureCollection (one feature per
//! boundary, name taken from a configurable property); stores arrive as
//! a JSON array of records. Both go through the same PostGIS
//! constructors the server uses.

use std::fs;
use std::path::Path;

use secrecy::SecretString;
use serde::Deserialize;
use serde_json::Value;
use sqlx::PgPool;

use storemap_core::Coordinates;
use storemap_server::db::{self, RepositoryError, StoreRepository};
use storemap_server::models::NewStore;

/// Errors that can occur during data import.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {0}: {1}")]
    Json(String, #[source] serde_json::Error),

    #[error("feature {0} has no string property '{1}'")]
    MissingName(usize, String),

    #[error("invalid store record '{0}': {1}")]
    InvalidRecord(String, String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),
}

// =============================================================================
// Input Types
// =============================================================================

/// Minimal GeoJSON FeatureCollection shape for boundary import.
#[derive(Debug, Deserialize)]
struct FeatureCollection {
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
    geometry: Value,
}

/// One store record in the import file.
#[derive(Debug, Deserialize)]
struct StoreRecord {
    name: String,
    address: String,
    phone: String,
    open_hours: String,
    district: String,
    longitude: f64,
    latitude: f64,
    #[serde(default)]
    image: Option<String>,
}

// =============================================================================
// Commands
// =============================================================================

/// Import district boundaries from a GeoJSON FeatureCollection.
///
/// Geometry is inserted through `ST_GeomFromGeoJSON` and coerced to
/// MultiPolygon with `ST_Multi` so Polygon and MultiPolygon features
/// both fit the column type.
///
/// # Errors
///
/// Returns `ImportError` if the file is unreadable, not a
/// FeatureCollection, a feature lacks the name property, or an insert
/// fails.
pub async fn districts(path: &Path, name_property: &str) -> Result<(), ImportError> {
    let collection: FeatureCollection = read_json(path)?;
    let pool = connect().await?;

    let mut imported = 0usize;
    for (index, feature) in collection.features.iter().enumerate() {
        let name = feature
            .properties
            .get(name_property)
            .and_then(Value::as_str)
            .ok_or_else(|| ImportError::MissingName(index, name_property.to_owned()))?;

        sqlx::query(
            r"
            INSERT INTO districts (name, geom)
            VALUES ($1, ST_Multi(ST_SetSRID(ST_GeomFromGeoJSON($2), 4326)))
            ",
        )
        .bind(name)
        .bind(feature.geometry.to_string())
        .execute(&pool)
        .await?;

        imported += 1;
    }

    tracing::info!("Imported {imported} districts");
    Ok(())
}

/// Import stores from a JSON array of records.
///
/// # Errors
///
/// Returns `ImportError` if the file is unreadable, a record has an
/// out-of-range location, or an insert fails.
pub async fn stores(path: &Path) -> Result<(), ImportError> {
    let records: Vec<StoreRecord> = read_json(path)?;
    let pool = connect().await?;
    let repo = StoreRepository::new(&pool);

    let mut imported = 0usize;
    for record in records {
        let location = Coordinates::new(record.longitude, record.latitude)
            .map_err(|e| ImportError::InvalidRecord(record.name.clone(), e.to_string()))?;

        let new = NewStore {
            name: record.name,
            address: record.address,
            phone: record.phone,
            open_hours: record.open_hours,
            district: record.district,
            location,
            image: record.image,
        };

        repo.create(&new).await?;
        imported += 1;
    }

    tracing::info!("Imported {imported} stores");
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

/// Read and deserialize a JSON file.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ImportError> {
    let display = path.display().to_string();
    let raw = fs::read_to_string(path).map_err(|source| ImportError::Io {
        path: display.clone(),
        source,
    })?;

    serde_json::from_str(&raw).map_err(|e| ImportError::Json(display, e))
}

/// Connect to the database from `DATABASE_URL`.
async fn connect() -> Result<PgPool, ImportError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| ImportError::MissingEnvVar("DATABASE_URL"))?;

    Ok(db::create_pool(&SecretString::from(database_url)).await?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_collection_parsing() {
        let raw = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"NAME_2": "North"},
                "geometry": {"type": "Polygon", "coordinates": [[[0,0],[0,1],[1,1],[0,0]]]}
            }]
        }"#;

        let collection: FeatureCollection = serde_json::from_str(raw).unwrap();
        assert_eq!(collection.features.len(), 1);
        let feature = collection.features.first().unwrap();
        assert_eq!(
            feature.properties.get("NAME_2").and_then(Value::as_str),
            Some("North")
        );
        assert_eq!(feature.geometry["type"], "Polygon");
    }

    #[test]
    fn test_store_record_parsing() {
        let raw = r#"[{
            "name": "Store A",
            "address": "1 Main St",
            "phone": "0123",
            "open_hours": "8-17",
            "district": "North",
            "longitude": 104.9,
            "latitude": 21.7
        }]"#;

        let records: Vec<StoreRecord> = serde_json::from_str(raw).unwrap();
        let record = records.first().unwrap();
        assert_eq!(record.name, "Store A");
        assert_eq!(record.longitude, 104.9);
        assert!(record.image.is_none());
    }
}
