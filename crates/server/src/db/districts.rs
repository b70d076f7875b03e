//! District repository for database operations.
//!
//! Districts are read-only at serving time; boundaries are exported as
//! GeoJSON via `ST_AsGeoJSON` and parsed into structured JSON here.

use sqlx::PgPool;

use storemap_core::DistrictId;

use super::RepositoryError;
use crate::models::District;

/// Internal row type for district queries.
#[derive(Debug, sqlx::FromRow)]
struct DistrictRow {
    id: i32,
    name: String,
    boundary: String,
}

impl TryFrom<DistrictRow> for District {
    type Error = RepositoryError;

    fn try_from(row: DistrictRow) -> Result<Self, Self::Error> {
        let boundary = serde_json::from_str(&row.boundary).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid boundary GeoJSON in database: {e}"))
        })?;

        Ok(Self {
            id: DistrictId::new(row.id),
            name: row.name,
            boundary,
        })
    }
}

/// Repository for district database operations.
pub struct DistrictRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> DistrictRepository<'a> {
    /// Create a new district repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every district with its boundary geometry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored boundary is
    /// not valid GeoJSON.
    pub async fn list(&self) -> Result<Vec<District>, RepositoryError> {
        let rows: Vec<DistrictRow> =
            sqlx::query_as("SELECT id, name, ST_AsGeoJSON(geom) AS boundary FROM districts")
                .fetch_all(self.pool)
                .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Count stores per district (group-and-count).
    ///
    /// Districts with zero stores are absent from the result; callers
    /// must not zero-fill.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn store_counts(&self) -> Result<Vec<(String, i64)>, RepositoryError> {
        let counts: Vec<(String, i64)> =
            sqlx::query_as("SELECT district, COUNT(*) FROM stores GROUP BY district")
                .fetch_all(self.pool)
                .await?;

        Ok(counts)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion_parses_geojson() {
        let row = DistrictRow {
            id: 1,
            name: "North".to_owned(),
            boundary: r#"{"type":"MultiPolygon","coordinates":[[[[0,0],[0,1],[1,1],[0,0]]]]}"#
                .to_owned(),
        };
        let district = District::try_from(row).unwrap();
        assert_eq!(district.name, "North");
        assert_eq!(district.boundary["type"], "MultiPolygon");
    }

    #[test]
    fn test_row_conversion_rejects_bad_geojson() {
        let row = DistrictRow {
            id: 1,
            name: "North".to_owned(),
            boundary: "not json".to_owned(),
        };
        assert!(matches!(
            District::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
