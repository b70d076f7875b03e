//! Stats route handler.

use std::collections::HashMap;

use axum::{Json, extract::State};

use crate::db::DistrictRepository;
use crate::error::AppError;
use crate::state::AppState;

/// Per-district store counts.
///
/// GET /stats
///
/// Districts with zero stores are absent from the mapping; clients must
/// treat absence as zero rather than expect an explicit entry.
pub async fn stats(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, i64>>, AppError> {
    let counts = DistrictRepository::new(state.pool()).store_counts().await?;

    Ok(Json(counts.into_iter().collect()))
}
