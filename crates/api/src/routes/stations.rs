//! Station Routes

use axum::{extract::State, Json};
use std::sync::Arc;
use storage::Station;

use crate::{ApiError, AppState};

const ROUTE: &str = "stations";

/// `[station_id, name, station_id, name, ...]`
pub fn flatten_stations(stations: Vec<Station>) -> Vec<String> {
    stations
        .into_iter()
        .flat_map(|station| [station.station_id, station.name])
        .collect()
}

/// Get the list of stations
pub async fn get_stations(State(state): State<Arc<AppState>>) -> Result<Json<Vec<String>>, ApiError> {
    super::record_request(ROUTE);

    let stations = state.repository.stations().await.map_err(|e| {
        super::record_error(ROUTE);
        e
    })?;

    Ok(Json(flatten_stations(stations)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_keeps_station_order() {
        let station = |id: &str, name: &str| Station {
            station_id: id.to_string(),
            name: name.to_string(),
            latitude: Some(21.3),
            longitude: Some(-157.8),
            elevation: Some(3.0),
        };

        let flat = flatten_stations(vec![
            station("USC00519397", "WAIKIKI 717.2, HI US"),
            station("USC00513117", "KANEOHE 838.1, HI US"),
        ]);

        assert_eq!(
            flat,
            vec!["USC00519397", "WAIKIKI 717.2, HI US", "USC00513117", "KANEOHE 838.1, HI US"]
        );
    }
}
