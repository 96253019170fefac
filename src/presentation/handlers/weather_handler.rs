use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        models::{city::UNKNOWN_LOCATION, weather_reading::WeatherReading},
        repositories::{
            unit_of_work::UnitOfWork, user_repository::UserRepository,
            weather_reading_repository::WeatherReadingRepository,
        },
        services::{
            password_service::PasswordHasher, token_service::TokenService,
            weather_provider::{WeatherProvider, WeatherReport},
        },
    },
    presentation::{auth::require_auth, error::ApiError, validation},
    usecase::{
        create_user::CreateUser, get_history::GetHistory,
        get_weather_by_city::GetWeatherByCity,
        get_weather_by_coordinates::GetWeatherByCoordinates,
        validate_credentials::ValidateCredentials,
    },
};

// Request

#[derive(Deserialize)]
pub struct CoordinatesQuery {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
pub struct CityQuery {
    pub nome: String,
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(rename = "nomeCidade")]
    pub nome_cidade: Option<String>,
}

/// json for register and login requests
#[derive(Serialize, Deserialize)]
pub struct UserPayload {
    pub nome: String,
    pub senha: String,
}

// Response

#[derive(Serialize, Deserialize)]
pub struct CityPayload {
    pub nome: String,
    pub pais: String,
}

/// json for a single weather observation, shared by the lookup and history
/// endpoints
#[derive(Serialize, Deserialize)]
pub struct WeatherResponse {
    pub cidade: CityPayload,
    pub latitude: f64,
    pub longitude: f64,
    pub temperatura: f64,
    #[serde(rename = "temperaturaMin")]
    pub temperatura_min: f64,
    #[serde(rename = "temperaturaMax")]
    pub temperatura_max: f64,
    pub condicao: String,
    #[serde(rename = "dataHora")]
    pub data_hora: DateTime<Utc>,
}

#[derive(Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[derive(Serialize, Deserialize)]
pub struct MessageResponse {
    pub mensagem: String,
}

impl From<WeatherReport> for WeatherResponse {
    fn from(report: WeatherReport) -> Self {
        Self {
            cidade: CityPayload {
                nome: report.city.name,
                pais: report.city.country,
            },
            latitude: report.latitude,
            longitude: report.longitude,
            temperatura: report.temperature,
            temperatura_min: report.temperature_min,
            temperatura_max: report.temperature_max,
            condicao: report.condition,
            data_hora: report.recorded_at,
        }
    }
}

impl From<WeatherReading> for WeatherResponse {
    fn from(reading: WeatherReading) -> Self {
        // readings stored without a city render as the unknown-location placeholder
        let cidade = match reading.city {
            Some(city) => CityPayload {
                nome: city.name().to_string(),
                pais: city.country().to_string(),
            },
            None => CityPayload {
                nome: UNKNOWN_LOCATION.to_string(),
                pais: String::new(),
            },
        };

        Self {
            cidade,
            latitude: reading.latitude,
            longitude: reading.longitude,
            temperatura: reading.temperature,
            temperatura_min: reading.temperature_min,
            temperatura_max: reading.temperature_max,
            condicao: reading.condition,
            data_hora: reading.recorded_at,
        }
    }
}

/* Router Function and Handler Function */

// Weather Router

/// function return Router object
/// Suppose to be nested by main router; lookup and history routes require a
/// bearer token, register and login stay public

pub fn create_weather_router<
    U: UnitOfWork + 'static,
    W: WeatherProvider + 'static,
    RW: WeatherReadingRepository + 'static,
    RU: UserRepository + 'static,
    P: PasswordHasher + 'static,
    T: TokenService + 'static,
>(
    weather_by_coordinates: GetWeatherByCoordinates<U, W>,
    weather_by_city: GetWeatherByCity<U, W>,
    history: GetHistory<RW>,
    create_user: CreateUser<RU, U, P>,
    validate_credentials: ValidateCredentials<RU, P>,
    token_service: T,
) -> Router {
    let state = AppState {
        weather_by_coordinates: Arc::new(weather_by_coordinates),
        weather_by_city: Arc::new(weather_by_city),
        history: Arc::new(history),
        create_user: Arc::new(create_user),
        validate_credentials: Arc::new(validate_credentials),
        tokens: Arc::new(token_service),
    };

    let protected = Router::new()
        .route("/coordinates", get(by_coordinates::<U, W, RW, RU, P, T>))
        .route("/city", get(by_city::<U, W, RW, RU, P, T>))
        .route("/history", get(history_query::<U, W, RW, RU, P, T>))
        .route_layer(middleware::from_fn_with_state(
            state.tokens.clone(),
            require_auth::<T>,
        ));

    let public = Router::new()
        .route("/register", post(register::<U, W, RW, RU, P, T>))
        .route("/login", post(login::<U, W, RW, RU, P, T>));

    protected.merge(public).with_state(state)
}

pub struct AppState<
    U: UnitOfWork,
    W: WeatherProvider,
    RW: WeatherReadingRepository,
    RU: UserRepository,
    P: PasswordHasher,
    T: TokenService,
> {
    pub weather_by_coordinates: Arc<GetWeatherByCoordinates<U, W>>,
    pub weather_by_city: Arc<GetWeatherByCity<U, W>>,
    pub history: Arc<GetHistory<RW>>,
    pub create_user: Arc<CreateUser<RU, U, P>>,
    pub validate_credentials: Arc<ValidateCredentials<RU, P>>,
    pub tokens: Arc<T>,
}

// manual impl: the derive would demand Clone of every type parameter
impl<
    U: UnitOfWork,
    W: WeatherProvider,
    RW: WeatherReadingRepository,
    RU: UserRepository,
    P: PasswordHasher,
    T: TokenService,
> Clone for AppState<U, W, RW, RU, P, T>
{
    fn clone(&self) -> Self {
        Self {
            weather_by_coordinates: self.weather_by_coordinates.clone(),
            weather_by_city: self.weather_by_city.clone(),
            history: self.history.clone(),
            create_user: self.create_user.clone(),
            validate_credentials: self.validate_credentials.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// handler function

/// handler function for weather lookup by coordinates
async fn by_coordinates<
    U: UnitOfWork,
    W: WeatherProvider,
    RW: WeatherReadingRepository,
    RU: UserRepository,
    P: PasswordHasher,
    T: TokenService,
>(
    State(state): State<AppState<U, W, RW, RU, P, T>>,
    Query(query): Query<CoordinatesQuery>,
) -> Result<Json<WeatherResponse>, ApiError> {
    validation::validate_coordinates(query.latitude, query.longitude)
        .map_err(ApiError::Validation)?;

    let report = state
        .weather_by_coordinates
        .execute(query.latitude, query.longitude)
        .await?;

    Ok(Json(report.into()))
}

/// handler function for weather lookup by city name
async fn by_city<
    U: UnitOfWork,
    W: WeatherProvider,
    RW: WeatherReadingRepository,
    RU: UserRepository,
    P: PasswordHasher,
    T: TokenService,
>(
    State(state): State<AppState<U, W, RW, RU, P, T>>,
    Query(query): Query<CityQuery>,
) -> Result<Json<WeatherResponse>, ApiError> {
    validation::validate_city_name(&query.nome).map_err(ApiError::Validation)?;

    let report = state.weather_by_city.execute(query.nome.trim()).await?;

    Ok(Json(report.into()))
}

/// handler function for the reading history
async fn history_query<
    U: UnitOfWork,
    W: WeatherProvider,
    RW: WeatherReadingRepository,
    RU: UserRepository,
    P: PasswordHasher,
    T: TokenService,
>(
    State(state): State<AppState<U, W, RW, RU, P, T>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<WeatherResponse>>, ApiError> {
    let filter = validation::history_filter(
        query.latitude,
        query.longitude,
        query.nome_cidade.as_deref(),
    )
    .map_err(ApiError::Validation)?;

    let readings = state.history.execute(filter).await?;

    Ok(Json(readings.into_iter().map(Into::into).collect()))
}

/// handler function for register
async fn register<
    U: UnitOfWork,
    W: WeatherProvider,
    RW: WeatherReadingRepository,
    RU: UserRepository,
    P: PasswordHasher,
    T: TokenService,
>(
    State(state): State<AppState<U, W, RW, RU, P, T>>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    validation::validate_user(&payload.nome, &payload.senha).map_err(ApiError::Validation)?;

    let created = state
        .create_user
        .execute(payload.nome.trim(), &payload.senha)
        .await?;

    if !created {
        return Err(ApiError::Business("User name already taken.".to_string()));
    }

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            mensagem: "User created successfully.".to_string(),
        }),
    ))
}

/// handler function for login
async fn login<
    U: UnitOfWork,
    W: WeatherProvider,
    RW: WeatherReadingRepository,
    RU: UserRepository,
    P: PasswordHasher,
    T: TokenService,
>(
    State(state): State<AppState<U, W, RW, RU, P, T>>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<TokenResponse>, ApiError> {
    validation::validate_user(&payload.nome, &payload.senha).map_err(ApiError::Validation)?;

    let valid = state
        .validate_credentials
        .execute(payload.nome.trim(), &payload.senha)
        .await?;

    if !valid {
        return Err(ApiError::Unauthorized(
            "Invalid user name or password.".to_string(),
        ));
    }

    let token = state.tokens.issue(payload.nome.trim())?;

    Ok(Json(TokenResponse { token }))
}
