//! Temperature Observation Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use storage::TemperatureReading;

use super::FlatValue;
use crate::{ApiError, AppState};

const ROUTE: &str = "tobs";

/// `[date, tobs, date, tobs, ...]`
pub fn flatten_readings(readings: Vec<TemperatureReading>) -> Vec<FlatValue> {
    readings
        .into_iter()
        .flat_map(|reading| {
            [
                FlatValue::from(reading.date),
                FlatValue::from(reading.temperature_observed),
            ]
        })
        .collect()
}

/// Get temperature observations for the year ending at the newest measurement
pub async fn get_tobs(State(state): State<Arc<AppState>>) -> Result<Json<Vec<FlatValue>>, ApiError> {
    super::record_request(ROUTE);

    let readings = state.repository.recent_temperatures().await.map_err(|e| {
        super::record_error(ROUTE);
        e
    })?;

    Ok(Json(flatten_readings(readings)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_alternates_date_and_value() {
        let flat = flatten_readings(vec![
            TemperatureReading {
                date: "2016-08-23".to_string(),
                temperature_observed: 77.0,
            },
            TemperatureReading {
                date: "2016-08-24".to_string(),
                temperature_observed: 79.5,
            },
        ]);

        assert_eq!(
            serde_json::to_value(flat).unwrap(),
            serde_json::json!(["2016-08-23", 77.0, "2016-08-24", 79.5])
        );
    }
}
