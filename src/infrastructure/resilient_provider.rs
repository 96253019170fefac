use std::{
    future::Future,
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};

use async_trait::async_trait;
use tracing::warn;

use crate::domain::{
    error::ProviderError,
    services::weather_provider::{WeatherProvider, WeatherReport},
};

/// Retry and circuit-breaker knobs. All of this is configuration, not
/// behavior baked into the client.
#[derive(Debug, Clone)]
pub struct ResilienceSettings {
    pub max_attempts: u32,
    pub retry_base_delay: Duration,
    pub circuit_threshold: u32,
    pub circuit_open_for: Duration,
}

impl Default for ResilienceSettings {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            retry_base_delay: Duration::from_millis(200),
            circuit_threshold: 5,
            circuit_open_for: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Default)]
struct BreakerState {
    consecutive_failures: u32,
    open_until: Option<Instant>,
}

/// Decorator adding exponential-backoff retries and a circuit breaker around
/// any [`WeatherProvider`]. Only transient failures are retried; a business
/// "city not found" passes through on the first attempt. Clones share the
/// circuit state.
#[derive(Clone)]
pub struct ResilientWeatherProvider<P> {
    inner: P,
    settings: ResilienceSettings,
    breaker: Arc<Mutex<BreakerState>>,
}

impl<P: WeatherProvider> ResilientWeatherProvider<P> {
    pub fn new(inner: P, settings: ResilienceSettings) -> Self {
        Self {
            inner,
            settings,
            breaker: Arc::new(Mutex::new(BreakerState::default())),
        }
    }

    fn check_circuit(&self) -> Result<(), ProviderError> {
        let mut state = self.breaker.lock().unwrap();

        if let Some(open_until) = state.open_until {
            if Instant::now() < open_until {
                return Err(ProviderError::Unavailable(
                    "weather provider circuit is open".to_string(),
                ));
            }
            // Half-open: allow the next call through.
            state.open_until = None;
        }

        Ok(())
    }

    fn record_success(&self) {
        let mut state = self.breaker.lock().unwrap();
        state.consecutive_failures = 0;
        state.open_until = None;
    }

    fn record_failure(&self) {
        let mut state = self.breaker.lock().unwrap();
        state.consecutive_failures += 1;

        if state.consecutive_failures >= self.settings.circuit_threshold {
            warn!(
                failures = state.consecutive_failures,
                open_for_secs = self.settings.circuit_open_for.as_secs(),
                "opening weather provider circuit"
            );
            state.open_until = Some(Instant::now() + self.settings.circuit_open_for);
        }
    }

    async fn call<F, Fut>(&self, op: F) -> Result<WeatherReport, ProviderError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<WeatherReport, ProviderError>>,
    {
        let mut attempt: u32 = 0;

        loop {
            self.check_circuit()?;

            match op().await {
                Ok(report) => {
                    self.record_success();
                    return Ok(report);
                }
                Err(err) if err.is_transient() => {
                    self.record_failure();
                    attempt += 1;

                    if attempt >= self.settings.max_attempts {
                        return Err(err);
                    }

                    let delay = backoff_delay(self.settings.retry_base_delay, attempt);
                    warn!(attempt, delay_ms = delay.as_millis() as u64, %err,
                        "transient weather provider failure, retrying");
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Exponential backoff, saturating so a large configured attempt count
/// cannot overflow the doubling factor or the resulting duration.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let factor = 2u32
        .checked_pow(attempt.saturating_sub(1))
        .unwrap_or(u32::MAX);
    base.saturating_mul(factor)
}

#[async_trait]
impl<P: WeatherProvider> WeatherProvider for ResilientWeatherProvider<P> {
    async fn fetch_by_coordinates(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherReport, ProviderError> {
        self.call(|| self.inner.fetch_by_coordinates(latitude, longitude))
            .await
    }

    async fn fetch_by_city(&self, name: &str) -> Result<WeatherReport, ProviderError> {
        self.call(|| self.inner.fetch_by_city(name)).await
    }
}
