pub mod city;
pub mod user;
pub mod weather_reading;
