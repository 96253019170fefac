//! Domain services shared by the weather-fetch use cases: resolving the city
//! a reading belongs to and staging the reading itself. Neither commits; the
//! calling use case owns the transaction boundary.

use tracing::{debug, info};

use crate::domain::{
    error::DomainError,
    models::{
        city::{City, UNKNOWN_LOCATION},
        weather_reading::NewWeatherReading,
    },
    repositories::{
        city_repository::CityRepository, weather_reading_repository::WeatherReadingRepository,
    },
    services::weather_provider::{CityReport, WeatherReport},
};

/// Finds the city by exact name, creating it when absent. Returns `None` for
/// the unknown-location sentinel. When the city already exists, the stored
/// record wins; a differing country in the report is ignored.
pub async fn resolve_or_create_city<R>(
    cities: &R,
    report: &CityReport,
) -> Result<Option<City>, DomainError>
where
    R: CityRepository + ?Sized,
{
    if report.name == UNKNOWN_LOCATION {
        debug!("unknown location reported, no city to associate");
        return Ok(None);
    }

    debug!(city = %report.name, country = %report.country, "looking up city");

    let city = match cities.find_city(&report.name).await? {
        Some(existing) => {
            debug!(city = existing.name(), id = existing.id(), "city already known");
            existing
        }
        None => {
            info!(city = %report.name, country = %report.country, "creating city");
            cities.add_city(&report.name, &report.country).await?
        }
    };

    Ok(Some(city))
}

/// Stages one weather reading for insertion, associated with `city` when the
/// location was resolved.
pub async fn record_reading<R>(
    readings: &R,
    report: &WeatherReport,
    city: Option<&City>,
) -> Result<(), DomainError>
where
    R: WeatherReadingRepository + ?Sized,
{
    info!(
        city = city.map_or(UNKNOWN_LOCATION, City::name),
        latitude = report.latitude,
        longitude = report.longitude,
        temperature = report.temperature,
        "recording weather reading"
    );

    let reading = NewWeatherReading {
        latitude: report.latitude,
        longitude: report.longitude,
        temperature: report.temperature,
        temperature_min: report.temperature_min,
        temperature_max: report.temperature_max,
        condition: report.condition.clone(),
        recorded_at: report.recorded_at,
        city_id: city.map(City::id),
    };

    readings.add_reading(&reading).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryStore;
    use chrono::Utc;

    fn report(city: &str, country: &str) -> WeatherReport {
        WeatherReport {
            city: CityReport {
                name: city.to_string(),
                country: country.to_string(),
            },
            latitude: -23.5505,
            longitude: -46.6333,
            temperature: 25.5,
            temperature_min: 20.0,
            temperature_max: 28.0,
            condition: "clear sky".to_string(),
            recorded_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn unknown_location_resolves_to_no_city() {
        let store = InMemoryStore::default();
        let resolved = resolve_or_create_city(&store, &report(UNKNOWN_LOCATION, "BR").city)
            .await
            .unwrap();

        assert!(resolved.is_none());
        assert_eq!(store.city_count(), 0);
    }

    #[tokio::test]
    async fn creates_city_once_under_sequential_use() {
        let store = InMemoryStore::default();
        let city_report = report("São Paulo", "BR").city;

        let first = resolve_or_create_city(&store, &city_report)
            .await
            .unwrap()
            .unwrap();
        let second = resolve_or_create_city(&store, &city_report)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(first.id(), second.id());
        assert_eq!(store.city_count(), 1);
    }

    #[tokio::test]
    async fn existing_city_wins_on_country_mismatch() {
        let store = InMemoryStore::default();
        let original = resolve_or_create_city(&store, &report("Lisboa", "PT").city)
            .await
            .unwrap()
            .unwrap();

        let resolved = resolve_or_create_city(&store, &report("Lisboa", "ES").city)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(resolved.id(), original.id());
        assert_eq!(resolved.country(), "PT");
        assert_eq!(store.city_count(), 1);
    }

    #[tokio::test]
    async fn record_reading_links_city_when_present() {
        let store = InMemoryStore::default();
        let r = report("São Paulo", "BR");
        let city = resolve_or_create_city(&store, &r.city).await.unwrap();

        record_reading(&store, &r, city.as_ref()).await.unwrap();

        let readings = store.readings();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].city_id, city.map(|c| c.id()));
        assert_eq!(readings[0].latitude, r.latitude);
    }

    #[tokio::test]
    async fn record_reading_without_city_stores_null_reference() {
        let store = InMemoryStore::default();
        let r = report(UNKNOWN_LOCATION, "");

        record_reading(&store, &r, None).await.unwrap();

        let readings = store.readings();
        assert_eq!(readings.len(), 1);
        assert!(readings[0].city_id.is_none());
    }
}
