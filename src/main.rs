mod config;
mod domain;
mod entity;
mod infrastructure;
mod presentation;
#[cfg(test)]
mod testing;
mod usecase;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde_json::json;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::{
    config::Settings,
    infrastructure::{
        argon2_password_hasher::Argon2PasswordHasher, jwt_token_service::JwtTokenService,
        open_weather_client::OpenWeatherClient, resilient_provider::ResilientWeatherProvider,
        unit_of_work::PostgresUnitOfWork, user_repository::PostgresUserRepository,
        weather_repository::PostgresWeatherReadingRepository,
    },
    presentation::handlers::weather_handler::create_weather_router,
    usecase::{
        create_user::CreateUser, get_history::GetHistory,
        get_weather_by_city::GetWeatherByCity,
        get_weather_by_coordinates::GetWeatherByCoordinates,
        validate_credentials::ValidateCredentials,
    },
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = Settings::from_env()?;

    let mut opt = ConnectOptions::new(settings.database_url.clone());
    opt.max_connections(10)
        .min_connections(1)
        .sqlx_logging(true);

    let db = Database::connect(opt).await?;

    let unit_of_work = PostgresUnitOfWork::new(db.clone());
    let reading_repository = PostgresWeatherReadingRepository::new(db.clone());
    let user_repository = PostgresUserRepository::new(db.clone());
    let weather_client = OpenWeatherClient::new(settings.open_weather.clone());
    let provider =
        ResilientWeatherProvider::new(weather_client.clone(), settings.resilience.clone());
    let password_hasher = Argon2PasswordHasher::new();
    let token_service = JwtTokenService::new(settings.jwt.clone());

    let app = Router::new()
        .route("/health", get(health))
        .with_state(HealthState {
            db,
            provider: weather_client,
        })
        .nest(
            "/weather",
            create_weather_router(
                GetWeatherByCoordinates::new(unit_of_work.clone(), provider.clone()),
                GetWeatherByCity::new(unit_of_work.clone(), provider.clone()),
                GetHistory::new(reading_repository),
                CreateUser::new(
                    user_repository.clone(),
                    unit_of_work.clone(),
                    password_hasher.clone(),
                ),
                ValidateCredentials::new(user_repository, password_hasher),
                token_service,
            ),
        );

    info!(addr = %settings.listen_addr, "starting server");

    let listener = TcpListener::bind(settings.listen_addr).await?;
    axum::serve(listener, app.into_make_service()).await?;

    Ok(())
}

#[derive(Clone)]
struct HealthState {
    db: DatabaseConnection,
    provider: OpenWeatherClient,
}

/// Liveness probe; checks that the store and the weather provider answer.
async fn health(State(state): State<HealthState>) -> (StatusCode, Json<serde_json::Value>) {
    let database_ok = state.db.ping().await.is_ok();
    let provider_ok = state.provider.probe().await;

    health_body(database_ok, provider_ok)
}

fn health_body(database_ok: bool, provider_ok: bool) -> (StatusCode, Json<serde_json::Value>) {
    let component = |ok: bool| if ok { "up" } else { "down" };
    let healthy = database_ok && provider_ok;
    let status = if healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(json!({
            "status": if healthy { "ok" } else { "degraded" },
            "database": component(database_ok),
            "weatherProvider": component(provider_ok),
        })),
    )
}
