//! Temperature Statistics Routes
//!
//! Date parameters are compared as ISO strings; anything else simply matches
//! no rows and yields `[null, null, null]`.

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::{ApiError, AppState};

const ROUTE: &str = "stats";

/// `[min, avg, max]`
pub type StatsResponse = [Option<f64>; 3];

async fn stats(state: &AppState, start: &str, end: Option<&str>) -> Result<StatsResponse, ApiError> {
    super::record_request(ROUTE);

    let stats = state
        .repository
        .temperature_stats(start, end)
        .await
        .map_err(|e| {
            super::record_error(ROUTE);
            e
        })?;

    Ok(stats.to_array())
}

/// Get min/avg/max temperature from `start` onwards
pub async fn get_stats_from(
    State(state): State<Arc<AppState>>,
    Path(start): Path<String>,
) -> Result<Json<StatsResponse>, ApiError> {
    stats(&state, &start, None).await.map(Json)
}

/// Get min/avg/max temperature between `start` and `end`, inclusive
pub async fn get_stats_between(
    State(state): State<Arc<AppState>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<StatsResponse>, ApiError> {
    stats(&state, &start, Some(end.as_str())).await.map(Json)
}
