pub mod argon2_password_hasher;
pub mod jwt_token_service;
pub mod open_weather_client;
mod queries;
pub mod resilient_provider;
pub mod unit_of_work;
pub mod user_repository;
pub mod weather_repository;
