pub mod weather_handler;
