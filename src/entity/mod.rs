pub mod cities;
pub mod users;
pub mod weather_readings;
