pub mod create_user;
pub mod get_history;
pub mod get_weather_by_city;
pub mod get_weather_by_coordinates;
pub mod recording;
pub mod validate_credentials;
