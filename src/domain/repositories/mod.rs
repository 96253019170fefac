pub mod city_repository;
pub mod unit_of_work;
pub mod user_repository;
pub mod weather_reading_repository;
