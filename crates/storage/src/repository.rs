//! Repository Implementation

use crate::window::trailing_year_cutoff;
use crate::StorageError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::str::FromStr;
use tracing::{debug, info};

/// Weather station. Coordinates are `None` where the dataset has no value.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Station {
    pub station_id: String,
    pub name: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Daily precipitation reading; missing readings are `None`
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct PrecipitationReading {
    pub date: String,
    pub precipitation: Option<f64>,
}

/// Daily observed temperature reading
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct TemperatureReading {
    pub date: String,
    pub temperature_observed: f64,
}

/// Temperature aggregates over a date range.
///
/// All three are `None` when no measurement falls inside the range.
#[derive(Debug, Clone, Copy, PartialEq, FromRow)]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub avg: Option<f64>,
    pub max: Option<f64>,
}

impl TemperatureStats {
    /// `[min, avg, max]`
    pub fn to_array(self) -> [Option<f64>; 3] {
        [self.min, self.avg, self.max]
    }
}

const SELECT_PRECIPITATION: &str = "SELECT date, prcp AS precipitation FROM measurement";

const SELECT_STATIONS: &str = "SELECT station AS station_id, name, latitude, longitude, elevation \
     FROM station";

const SELECT_LATEST_DATE: &str = "SELECT MAX(date) FROM measurement";

// `tobs` is cast because some copies of the dataset declare it INTEGER.
const SELECT_TEMPERATURES_SINCE: &str = "SELECT date, CAST(tobs AS REAL) AS temperature_observed \
     FROM measurement WHERE date >= ?1";

const SELECT_STATS_FROM: &str = "SELECT CAST(MIN(tobs) AS REAL) AS min, \
     CAST(AVG(tobs) AS REAL) AS avg, \
     CAST(MAX(tobs) AS REAL) AS max \
     FROM measurement WHERE date >= ?1";

const SELECT_STATS_BETWEEN: &str = "SELECT CAST(MIN(tobs) AS REAL) AS min, \
     CAST(AVG(tobs) AS REAL) AS avg, \
     CAST(MAX(tobs) AS REAL) AS max \
     FROM measurement WHERE date >= ?1 AND date <= ?2";

/// Read-only handle to the climate dataset
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Open the dataset read-only.
    ///
    /// The database file must already exist; nothing is created or migrated.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .read_only(true)
            .create_if_missing(false);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await?;

        info!("Opened climate dataset at {}", database_url);
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Close all pooled connections
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Date and precipitation of every measurement, in table order
    pub async fn precipitation(&self) -> Result<Vec<PrecipitationReading>, StorageError> {
        let rows = sqlx::query_as::<_, PrecipitationReading>(SELECT_PRECIPITATION)
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} precipitation readings", rows.len());
        Ok(rows)
    }

    /// Every station, in table order
    pub async fn stations(&self) -> Result<Vec<Station>, StorageError> {
        let rows = sqlx::query_as::<_, Station>(SELECT_STATIONS)
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} stations", rows.len());
        Ok(rows)
    }

    /// Newest measurement date, `None` for an empty table
    pub async fn latest_date(&self) -> Result<Option<String>, StorageError> {
        let latest = sqlx::query_scalar::<_, Option<String>>(SELECT_LATEST_DATE)
            .fetch_one(&self.pool)
            .await?;

        Ok(latest)
    }

    /// Temperature readings dated on or after `cutoff`
    pub async fn temperatures_since(
        &self,
        cutoff: &str,
    ) -> Result<Vec<TemperatureReading>, StorageError> {
        let rows = sqlx::query_as::<_, TemperatureReading>(SELECT_TEMPERATURES_SINCE)
            .bind(cutoff)
            .fetch_all(&self.pool)
            .await?;

        debug!("Fetched {} temperature readings since {}", rows.len(), cutoff);
        Ok(rows)
    }

    /// Temperature readings of the trailing year ending at the newest
    /// measurement. Empty when there are no measurements.
    pub async fn recent_temperatures(&self) -> Result<Vec<TemperatureReading>, StorageError> {
        let Some(latest) = self.latest_date().await? else {
            debug!("No measurements, trailing year is empty");
            return Ok(Vec::new());
        };

        let cutoff = trailing_year_cutoff(&latest)?;
        self.temperatures_since(&cutoff).await
    }

    /// Min/avg/max temperature for `start <= date`, bounded by `end` when given
    pub async fn temperature_stats(
        &self,
        start: &str,
        end: Option<&str>,
    ) -> Result<TemperatureStats, StorageError> {
        let stats = match end {
            Some(end) => {
                sqlx::query_as::<_, TemperatureStats>(SELECT_STATS_BETWEEN)
                    .bind(start)
                    .bind(end)
                    .fetch_one(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as::<_, TemperatureStats>(SELECT_STATS_FROM)
                    .bind(start)
                    .fetch_one(&self.pool)
                    .await?
            }
        };

        debug!(start, ?end, ?stats, "Computed temperature stats");
        Ok(stats)
    }
}
