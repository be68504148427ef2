//! Precipitation Routes

use axum::{extract::State, Json};
use serde_json::{Map, Value};
use std::sync::Arc;
use storage::PrecipitationReading;

use crate::{ApiError, AppState};

const ROUTE: &str = "precipitation";

/// `{date: precipitation}`, one object per reading
pub fn to_date_objects(readings: Vec<PrecipitationReading>) -> Vec<Map<String, Value>> {
    readings
        .into_iter()
        .map(|reading| {
            let mut object = Map::with_capacity(1);
            object.insert(reading.date, reading.precipitation.into());
            object
        })
        .collect()
}

/// Get every date/precipitation pair
pub async fn get_precipitation(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Map<String, Value>>>, ApiError> {
    super::record_request(ROUTE);

    let readings = state.repository.precipitation().await.map_err(|e| {
        super::record_error(ROUTE);
        e
    })?;

    Ok(Json(to_date_objects(readings)))
}
