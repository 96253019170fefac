//! In-memory fakes shared by the unit and handler tests. The unit of work
//! stages writes on a cloned copy of the store state and publishes it on
//! commit, so rollback behavior is observable.

use std::sync::{
    Arc, Mutex,
    atomic::{AtomicUsize, Ordering},
};

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use crate::domain::{
    error::{DomainError, ProviderError, RepositoryError},
    models::{
        city::City,
        user::{HashedPassword, User},
        weather_reading::{NewWeatherReading, WeatherReading},
    },
    repositories::{
        city_repository::CityRepository,
        unit_of_work::{TransactionScope, UnitOfWork},
        user_repository::UserRepository,
        weather_reading_repository::{HISTORY_LIMIT, WeatherReadingRepository},
    },
    services::{
        password_service::PasswordHasher,
        token_service::{Token, TokenClaims, TokenService},
        weather_provider::{CityReport, WeatherProvider, WeatherReport},
    },
};

#[derive(Debug, Clone)]
struct StoredReading {
    id: i32,
    data: NewWeatherReading,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    cities: Vec<City>,
    readings: Vec<StoredReading>,
    users: Vec<User>,
    next_id: i32,
    fail_next_reading_insert: bool,
    fail_next_user_insert: bool,
}

impl StoreState {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn find_city(&self, name: &str) -> Option<City> {
        self.cities.iter().find(|c| c.name() == name).cloned()
    }

    fn add_city(&mut self, name: &str, country: &str) -> City {
        let city = City::new(self.next_id(), name.to_string(), country.to_string());
        self.cities.push(city.clone());
        city
    }

    fn add_reading(&mut self, reading: &NewWeatherReading) -> Result<(), RepositoryError> {
        if self.fail_next_reading_insert {
            self.fail_next_reading_insert = false;
            return Err(RepositoryError::Database("simulated insert failure".into()));
        }
        let id = self.next_id();
        self.readings.push(StoredReading {
            id,
            data: reading.clone(),
        });
        Ok(())
    }

    fn find_user(&self, name: &str) -> Option<User> {
        self.users.iter().find(|u| u.name() == name).cloned()
    }

    fn add_user(
        &mut self,
        name: &str,
        password_hash: &HashedPassword,
    ) -> Result<User, RepositoryError> {
        if self.fail_next_user_insert {
            self.fail_next_user_insert = false;
            return Err(RepositoryError::Database("simulated insert failure".into()));
        }
        let user = User::new(self.next_id(), name.to_string(), password_hash.clone());
        self.users.push(user.clone());
        Ok(user)
    }

    fn to_reading(&self, stored: &StoredReading) -> WeatherReading {
        let city = stored
            .data
            .city_id
            .and_then(|id| self.cities.iter().find(|c| c.id() == id).cloned());
        WeatherReading {
            id: stored.id,
            latitude: stored.data.latitude,
            longitude: stored.data.longitude,
            temperature: stored.data.temperature,
            temperature_min: stored.data.temperature_min,
            temperature_max: stored.data.temperature_max,
            condition: stored.data.condition.clone(),
            recorded_at: stored.data.recorded_at,
            city,
        }
    }

    fn history_where<F>(&self, keep: F) -> Vec<WeatherReading>
    where
        F: Fn(&WeatherReading) -> bool,
    {
        let mut rows: Vec<WeatherReading> = self
            .readings
            .iter()
            .map(|s| self.to_reading(s))
            .filter(|r| keep(r))
            .collect();
        rows.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        rows.truncate(HISTORY_LIMIT as usize);
        rows
    }
}

/// Shared in-memory store. Clones share state.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryStore {
    pub fn city_count(&self) -> usize {
        self.state.lock().unwrap().cities.len()
    }

    pub fn user_count(&self) -> usize {
        self.state.lock().unwrap().users.len()
    }

    pub fn readings(&self) -> Vec<NewWeatherReading> {
        self.state
            .lock()
            .unwrap()
            .readings
            .iter()
            .map(|s| s.data.clone())
            .collect()
    }

    pub fn find_user_sync(&self, name: &str) -> Option<User> {
        self.state.lock().unwrap().find_user(name)
    }

    pub fn seed_city(&self, name: &str, country: &str) -> City {
        self.state.lock().unwrap().add_city(name, country)
    }

    pub fn seed_user(&self, name: &str, password_hash: &HashedPassword) -> User {
        self.state
            .lock()
            .unwrap()
            .add_user(name, password_hash)
            .unwrap()
    }

    /// Seeds a reading whose `recorded_at` lies `offset_secs` after a fixed
    /// epoch, so relative ordering in tests is deterministic.
    pub fn seed_reading(
        &self,
        latitude: f64,
        longitude: f64,
        temperature: f64,
        city_id: Option<i32>,
        offset_secs: i64,
    ) {
        let base = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let reading = NewWeatherReading {
            latitude,
            longitude,
            temperature,
            temperature_min: temperature - 2.0,
            temperature_max: temperature + 2.0,
            condition: "clear sky".to_string(),
            recorded_at: base + Duration::seconds(offset_secs),
            city_id,
        };
        self.state.lock().unwrap().add_reading(&reading).unwrap();
    }

    pub fn fail_next_reading_insert(&self) {
        self.state.lock().unwrap().fail_next_reading_insert = true;
    }

    pub fn fail_next_user_insert(&self) {
        self.state.lock().unwrap().fail_next_user_insert = true;
    }
}

#[async_trait]
impl CityRepository for InMemoryStore {
    async fn find_city(&self, name: &str) -> Result<Option<City>, RepositoryError> {
        Ok(self.state.lock().unwrap().find_city(name))
    }

    async fn add_city(&self, name: &str, country: &str) -> Result<City, RepositoryError> {
        Ok(self.state.lock().unwrap().add_city(name, country))
    }
}

#[async_trait]
impl WeatherReadingRepository for InMemoryStore {
    async fn add_reading(&self, reading: &NewWeatherReading) -> Result<(), RepositoryError> {
        self.state.lock().unwrap().add_reading(reading)
    }

    async fn history(&self) -> Result<Vec<WeatherReading>, RepositoryError> {
        Ok(self.state.lock().unwrap().history_where(|_| true))
    }

    async fn history_by_city(
        &self,
        city_name: &str,
    ) -> Result<Vec<WeatherReading>, RepositoryError> {
        let wanted = city_name.to_lowercase();
        Ok(self.state.lock().unwrap().history_where(|r| {
            r.city
                .as_ref()
                .is_some_and(|c| c.name().to_lowercase() == wanted)
        }))
    }

    async fn history_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherReading>, RepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .history_where(|r| r.latitude == latitude && r.longitude == longitude))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_user(&self, name: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.state.lock().unwrap().find_user(name))
    }

    async fn add_user(
        &self,
        name: &str,
        password_hash: &HashedPassword,
    ) -> Result<User, RepositoryError> {
        self.state.lock().unwrap().add_user(name, password_hash)
    }
}

#[derive(Clone)]
pub struct InMemoryUnitOfWork {
    store: InMemoryStore,
}

impl InMemoryUnitOfWork {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UnitOfWork for InMemoryUnitOfWork {
    type Tx = InMemoryTransaction;

    async fn begin(&self) -> Result<InMemoryTransaction, RepositoryError> {
        let snapshot = self.store.state.lock().unwrap().clone();
        Ok(InMemoryTransaction {
            store: self.store.clone(),
            staged: Mutex::new(snapshot),
        })
    }
}

/// Works on a snapshot of the store; commit replaces the store state with
/// the staged one, rollback simply drops it.
pub struct InMemoryTransaction {
    store: InMemoryStore,
    staged: Mutex<StoreState>,
}

#[async_trait]
impl CityRepository for InMemoryTransaction {
    async fn find_city(&self, name: &str) -> Result<Option<City>, RepositoryError> {
        Ok(self.staged.lock().unwrap().find_city(name))
    }

    async fn add_city(&self, name: &str, country: &str) -> Result<City, RepositoryError> {
        Ok(self.staged.lock().unwrap().add_city(name, country))
    }
}

#[async_trait]
impl WeatherReadingRepository for InMemoryTransaction {
    async fn add_reading(&self, reading: &NewWeatherReading) -> Result<(), RepositoryError> {
        self.staged.lock().unwrap().add_reading(reading)
    }

    async fn history(&self) -> Result<Vec<WeatherReading>, RepositoryError> {
        Ok(self.staged.lock().unwrap().history_where(|_| true))
    }

    async fn history_by_city(
        &self,
        city_name: &str,
    ) -> Result<Vec<WeatherReading>, RepositoryError> {
        let wanted = city_name.to_lowercase();
        Ok(self.staged.lock().unwrap().history_where(|r| {
            r.city
                .as_ref()
                .is_some_and(|c| c.name().to_lowercase() == wanted)
        }))
    }

    async fn history_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<WeatherReading>, RepositoryError> {
        Ok(self
            .staged
            .lock()
            .unwrap()
            .history_where(|r| r.latitude == latitude && r.longitude == longitude))
    }
}

#[async_trait]
impl UserRepository for InMemoryTransaction {
    async fn find_user(&self, name: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self.staged.lock().unwrap().find_user(name))
    }

    async fn add_user(
        &self,
        name: &str,
        password_hash: &HashedPassword,
    ) -> Result<User, RepositoryError> {
        self.staged.lock().unwrap().add_user(name, password_hash)
    }
}

#[async_trait]
impl TransactionScope for InMemoryTransaction {
    async fn commit(self) -> Result<(), RepositoryError> {
        let staged = self.staged.into_inner().unwrap();
        *self.store.state.lock().unwrap() = staged;
        Ok(())
    }

    async fn rollback(self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[derive(Clone)]
enum StubOutcome {
    Report {
        city: String,
        country: String,
        temperature: f64,
    },
    Failure(StubFailure),
}

#[derive(Clone)]
enum StubFailure {
    CityNotFound(String),
    Unavailable(String),
    InvalidPayload(String),
}

impl StubFailure {
    fn to_error(&self) -> ProviderError {
        match self {
            StubFailure::CityNotFound(m) => ProviderError::CityNotFound(m.clone()),
            StubFailure::Unavailable(m) => ProviderError::Unavailable(m.clone()),
            StubFailure::InvalidPayload(m) => ProviderError::InvalidPayload(m.clone()),
        }
    }
}

/// Provider stub returning a fixed report (echoing requested coordinates)
/// or a fixed failure. Counts calls.
#[derive(Clone)]
pub struct StubWeatherProvider {
    outcome: StubOutcome,
    calls: Arc<AtomicUsize>,
}

impl StubWeatherProvider {
    pub fn reporting(city: &str, country: &str, temperature: f64) -> Self {
        Self {
            outcome: StubOutcome::Report {
                city: city.to_string(),
                country: country.to_string(),
                temperature,
            },
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        let failure = match error {
            ProviderError::CityNotFound(m) => StubFailure::CityNotFound(m),
            ProviderError::Unavailable(m) => StubFailure::Unavailable(m),
            ProviderError::InvalidPayload(m) => StubFailure::InvalidPayload(m),
        };
        Self {
            outcome: StubOutcome::Failure(failure),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn respond(&self, latitude: f64, longitude: f64) -> Result<WeatherReport, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            StubOutcome::Report {
                city,
                country,
                temperature,
            } => Ok(WeatherReport {
                city: CityReport {
                    name: city.clone(),
                    country: country.clone(),
                },
                latitude,
                longitude,
                temperature: *temperature,
                temperature_min: temperature - 3.0,
                temperature_max: temperature + 3.0,
                condition: "clear sky".to_string(),
                recorded_at: Utc::now(),
            }),
            StubOutcome::Failure(failure) => Err(failure.to_error()),
        }
    }
}

#[async_trait]
impl WeatherProvider for StubWeatherProvider {
    async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, ProviderError> {
        self.respond(latitude, longitude)
    }

    async fn fetch_by_city(&self, _name: &str) -> Result<WeatherReport, ProviderError> {
        self.respond(-23.5505, -46.6333)
    }
}

/// Reversible stand-in for the argon2 hasher; fast and deterministic.
#[derive(Clone)]
pub struct PlainPasswordHasher;

impl PasswordHasher for PlainPasswordHasher {
    fn hash(&self, plain_password: &str) -> Result<HashedPassword, DomainError> {
        Ok(HashedPassword::new(format!("hashed:{plain_password}")))
    }

    fn verify(
        &self,
        plain_password: &str,
        hashed_password: &HashedPassword,
    ) -> Result<bool, DomainError> {
        Ok(hashed_password.as_str() == format!("hashed:{plain_password}"))
    }
}

/// Token service accepting only tokens it issued itself.
#[derive(Clone)]
pub struct MockTokenService;

impl TokenService for MockTokenService {
    fn issue(&self, username: &str) -> Result<Token, DomainError> {
        Ok(format!("token-for-{username}"))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, DomainError> {
        match token.strip_prefix("token-for-") {
            Some(username) => Ok(TokenClaims {
                username: username.to_string(),
                role: "User".to_string(),
            }),
            None => Err(DomainError::Token("invalid token".to_string())),
        }
    }
}
