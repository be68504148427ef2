//! Route listing

/// Paths served under the API prefix
pub const ROUTES: [&str; 5] = [
    "/api/v1.0/precipitation",
    "/api/v1.0/stations",
    "/api/v1.0/tobs",
    "/api/v1.0/<start>",
    "/api/v1.0/<start>/<end>",
];

/// List all available api routes
pub async fn list_routes() -> String {
    super::record_request("index");

    let mut body = String::from("Available Routes:\n");
    body.push_str(&ROUTES.join("\n"));
    body
}
