use chrono::{DateTime, Utc};

use crate::domain::models::city::City;

/// A reading as it is about to be inserted. The id is assigned by the store.
#[derive(Debug, Clone)]
pub struct NewWeatherReading {
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub condition: String,
    pub recorded_at: DateTime<Utc>,
    pub city_id: Option<i32>,
}

/// A persisted reading, with the associated city resolved when present.
#[derive(Debug, Clone)]
pub struct WeatherReading {
    pub id: i32,
    pub latitude: f64,
    pub longitude: f64,
    pub temperature: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub condition: String,
    pub recorded_at: DateTime<Utc>,
    pub city: Option<City>,
}
