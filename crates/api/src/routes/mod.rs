//! Route handlers

pub mod index;
pub mod precipitation;
pub mod stations;
pub mod stats;
pub mod tobs;

use serde::Serialize;

/// Element of a flattened record list: `["USC00519397", "WAIKIKI", ...]`
/// or `["2016-08-23", 77.0, ...]`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FlatValue {
    Text(String),
    Number(f64),
}

impl From<String> for FlatValue {
    fn from(value: String) -> Self {
        FlatValue::Text(value)
    }
}

impl From<f64> for FlatValue {
    fn from(value: f64) -> Self {
        FlatValue::Number(value)
    }
}

/// Count a request against `route`
pub(crate) fn record_request(route: &'static str) {
    metrics::counter!("climate_api_requests_total", "route" => route).increment(1);
}

/// Count a failed request against `route`
pub(crate) fn record_error(route: &'static str) {
    metrics::counter!("climate_api_errors_total", "route" => route).increment(1);
}
