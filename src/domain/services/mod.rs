pub mod password_service;
pub mod token_service;
pub mod weather_provider;
