//! Store repository for database operations.
//!
//! The location column is PostGIS `geometry(Point, 4326)`; reads project
//! it through `ST_X`/`ST_Y` and writes construct it with
//! `ST_SetSRID(ST_MakePoint(longitude, latitude), 4326)`.

use sqlx::{PgPool, Postgres, QueryBuilder};

use storemap_core::{Coordinates, StoreId};

use super::RepositoryError;
use crate::models::store::{NewStore, Store, StoreFilter};

/// Shared SELECT head for store reads.
const SELECT_STORE: &str = "SELECT id, name, address, phone, open_hours, district, \
     ST_X(geom) AS longitude, ST_Y(geom) AS latitude, image \
     FROM stores";

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for store queries.
#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: i32,
    name: String,
    address: Option<String>,
    phone: Option<String>,
    open_hours: Option<String>,
    district: String,
    longitude: f64,
    latitude: f64,
    image: Option<String>,
}

impl TryFrom<StoreRow> for Store {
    type Error = RepositoryError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let location = Coordinates::new(row.longitude, row.latitude).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid store location in database: {e}"))
        })?;

        Ok(Self {
            id: StoreId::new(row.id),
            name: row.name,
            address: row.address,
            phone: row.phone,
            open_hours: row.open_hours,
            district: row.district,
            location,
            image: row.image,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Search stores by optional name substring and district.
    ///
    /// With no filters this lists every store. Present filters are ANDed;
    /// the name filter is case-insensitive containment (`ILIKE`), the
    /// district filter is an exact match. Ordering is unspecified.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored location is
    /// invalid.
    pub async fn search(&self, filter: &StoreFilter) -> Result<Vec<Store>, RepositoryError> {
        let mut query = Self::search_query(filter);
        let rows: Vec<StoreRow> = query.build_query_as().fetch_all(self.pool).await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Get a store by its name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored location
    /// is invalid.
    pub async fn get_by_name(&self, name: &str) -> Result<Option<Store>, RepositoryError> {
        let sql = format!("{SELECT_STORE} WHERE name = $1");
        let row: Option<StoreRow> = sqlx::query_as(&sql)
            .bind(name)
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Insert a new store and return its generated id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the name already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, new: &NewStore) -> Result<StoreId, RepositoryError> {
        let id: i32 = sqlx::query_scalar(
            r"
            INSERT INTO stores (name, address, phone, open_hours, district, geom, image)
            VALUES ($1, $2, $3, $4, $5, ST_SetSRID(ST_MakePoint($6, $7), 4326), $8)
            RETURNING id
            ",
        )
        .bind(&new.name)
        .bind(&new.address)
        .bind(&new.phone)
        .bind(&new.open_hours)
        .bind(&new.district)
        .bind(new.location.longitude())
        .bind(new.location.latitude())
        .bind(&new.image)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("store name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(StoreId::new(id))
    }

    /// Overwrite a store row with merged values, keyed by its surrogate id.
    ///
    /// The id comes from the fetch step of a partial update; a concurrent
    /// rename or delete of the same record between fetch and update
    /// matches zero rows here.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched.
    /// Returns `RepositoryError::Conflict` if the new name is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, store: &Store) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            UPDATE stores
            SET name = $1, address = $2, phone = $3, open_hours = $4, district = $5,
                geom = ST_SetSRID(ST_MakePoint($6, $7), 4326), image = $8
            WHERE id = $9
            ",
        )
        .bind(&store.name)
        .bind(&store.address)
        .bind(&store.phone)
        .bind(&store.open_hours)
        .bind(&store.district)
        .bind(store.location.longitude())
        .bind(store.location.latitude())
        .bind(&store.image)
        .bind(store.id.as_i32())
        .execute(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("store name already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a store by name.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched.
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn delete_by_name(&self, name: &str) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM stores WHERE name = $1")
            .bind(name)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Compose the filtered search statement.
    fn search_query(filter: &StoreFilter) -> QueryBuilder<'static, Postgres> {
        let mut query = QueryBuilder::new(SELECT_STORE);
        let mut first = true;

        if let Some(q) = &filter.name_contains {
            query.push(" WHERE name ILIKE ");
            query.push_bind(format!("%{q}%"));
            first = false;
        }
        if let Some(district) = &filter.district {
            query.push(if first { " WHERE " } else { " AND " });
            query.push("district = ");
            query.push_bind(district.clone());
        }

        query
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query_no_filters() {
        let query = StoreRepository::search_query(&StoreFilter::default());
        assert_eq!(query.sql(), SELECT_STORE);
    }

    #[test]
    fn test_search_query_name_only() {
        let filter = StoreFilter::from_params(Some("store".to_owned()), None);
        let query = StoreRepository::search_query(&filter);
        assert!(query.sql().ends_with("WHERE name ILIKE $1"));
    }

    #[test]
    fn test_search_query_district_only() {
        let filter = StoreFilter::from_params(None, Some("North".to_owned()));
        let query = StoreRepository::search_query(&filter);
        assert!(query.sql().ends_with("WHERE district = $1"));
    }

    #[test]
    fn test_search_query_combined_filters_are_anded() {
        let filter = StoreFilter::from_params(Some("store".to_owned()), Some("North".to_owned()));
        let query = StoreRepository::search_query(&filter);
        assert!(
            query
                .sql()
                .ends_with("WHERE name ILIKE $1 AND district = $2")
        );
    }

    #[test]
    fn test_row_conversion_rejects_invalid_location() {
        let row = StoreRow {
            id: 1,
            name: "Store A".to_owned(),
            address: None,
            phone: None,
            open_hours: None,
            district: "North".to_owned(),
            longitude: 500.0,
            latitude: 0.0,
            image: None,
        };
        assert!(matches!(
            Store::try_from(row),
            Err(RepositoryError::DataCorruption(_))
        ));
    }
}
