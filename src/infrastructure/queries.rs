//! Query implementations shared by the connection-bound repositories and the
//! transaction scope. Everything is generic over [`ConnectionTrait`] so the
//! same code runs against a pooled connection or a live transaction.

use sea_orm::{
    ActiveValue::Set,
    ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, Func},
};

use crate::{
    domain::{
        error::RepositoryError,
        models::{
            city::City,
            user::{HashedPassword, User},
            weather_reading::{NewWeatherReading, WeatherReading},
        },
        repositories::weather_reading_repository::HISTORY_LIMIT,
    },
    entity::{cities, users, weather_readings},
};

fn db_err(err: sea_orm::DbErr) -> RepositoryError {
    RepositoryError::Database(err.to_string())
}

fn city_from_model(model: cities::Model) -> City {
    City::new(model.id, model.name, model.country)
}

fn reading_from_models(
    model: weather_readings::Model,
    city: Option<cities::Model>,
) -> WeatherReading {
    WeatherReading {
        id: model.id,
        latitude: model.latitude,
        longitude: model.longitude,
        temperature: model.temperature,
        temperature_min: model.temperature_min,
        temperature_max: model.temperature_max,
        condition: model.condition,
        recorded_at: model.recorded_at.and_utc(),
        city: city.map(city_from_model),
    }
}

pub(crate) async fn find_city<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<City>, RepositoryError> {
    let model = cities::Entity::find()
        .filter(cities::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(db_err)?;

    Ok(model.map(city_from_model))
}

pub(crate) async fn add_city<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    country: &str,
) -> Result<City, RepositoryError> {
    let model = cities::ActiveModel {
        name: Set(name.to_string()),
        country: Set(country.to_string()),
        ..Default::default()
    };

    let result = cities::Entity::insert(model)
        .exec(conn)
        .await
        .map_err(db_err)?;

    Ok(City::new(
        result.last_insert_id,
        name.to_string(),
        country.to_string(),
    ))
}

pub(crate) async fn add_reading<C: ConnectionTrait>(
    conn: &C,
    reading: &NewWeatherReading,
) -> Result<(), RepositoryError> {
    let model = weather_readings::ActiveModel {
        latitude: Set(reading.latitude),
        longitude: Set(reading.longitude),
        temperature: Set(reading.temperature),
        temperature_min: Set(reading.temperature_min),
        temperature_max: Set(reading.temperature_max),
        condition: Set(reading.condition.clone()),
        recorded_at: Set(reading.recorded_at.naive_utc()),
        city_id: Set(reading.city_id),
        ..Default::default()
    };

    weather_readings::Entity::insert(model)
        .exec(conn)
        .await
        .map_err(db_err)?;

    Ok(())
}

pub(crate) async fn history<C: ConnectionTrait>(
    conn: &C,
) -> Result<Vec<WeatherReading>, RepositoryError> {
    let rows = weather_readings::Entity::find()
        .find_also_related(cities::Entity)
        .order_by_desc(weather_readings::Column::RecordedAt)
        .limit(HISTORY_LIMIT)
        .all(conn)
        .await
        .map_err(db_err)?;

    Ok(rows
        .into_iter()
        .map(|(reading, city)| reading_from_models(reading, city))
        .collect())
}

pub(crate) async fn history_by_city<C: ConnectionTrait>(
    conn: &C,
    city_name: &str,
) -> Result<Vec<WeatherReading>, RepositoryError> {
    let rows = weather_readings::Entity::find()
        .find_also_related(cities::Entity)
        .filter(
            Expr::expr(Func::lower(Expr::col((
                cities::Entity,
                cities::Column::Name,
            ))))
            .eq(city_name.to_lowercase()),
        )
        .order_by_desc(weather_readings::Column::RecordedAt)
        .limit(HISTORY_LIMIT)
        .all(conn)
        .await
        .map_err(db_err)?;

    Ok(rows
        .into_iter()
        .map(|(reading, city)| reading_from_models(reading, city))
        .collect())
}

pub(crate) async fn history_by_coordinates<C: ConnectionTrait>(
    conn: &C,
    latitude: f64,
    longitude: f64,
) -> Result<Vec<WeatherReading>, RepositoryError> {
    let rows = weather_readings::Entity::find()
        .find_also_related(cities::Entity)
        .filter(weather_readings::Column::Latitude.eq(latitude))
        .filter(weather_readings::Column::Longitude.eq(longitude))
        .order_by_desc(weather_readings::Column::RecordedAt)
        .limit(HISTORY_LIMIT)
        .all(conn)
        .await
        .map_err(db_err)?;

    Ok(rows
        .into_iter()
        .map(|(reading, city)| reading_from_models(reading, city))
        .collect())
}

pub(crate) async fn find_user<C: ConnectionTrait>(
    conn: &C,
    name: &str,
) -> Result<Option<User>, RepositoryError> {
    let model = users::Entity::find()
        .filter(users::Column::Name.eq(name))
        .one(conn)
        .await
        .map_err(db_err)?;

    Ok(model.map(|m| User::new(m.id, m.name, HashedPassword::new(m.password_hash))))
}

pub(crate) async fn add_user<C: ConnectionTrait>(
    conn: &C,
    name: &str,
    password_hash: &HashedPassword,
) -> Result<User, RepositoryError> {
    let model = users::ActiveModel {
        name: Set(name.to_string()),
        password_hash: Set(password_hash.as_str().to_string()),
        ..Default::default()
    };

    let result = users::Entity::insert(model)
        .exec(conn)
        .await
        .map_err(db_err)?;

    Ok(User::new(
        result.last_insert_id,
        name.to_string(),
        password_hash.clone(),
    ))
}
