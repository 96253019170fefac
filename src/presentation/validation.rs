use crate::usecase::get_history::HistoryFilter;

const CITY_NAME_MIN: usize = 2;
const CITY_NAME_MAX: usize = 100;
const USER_NAME_MIN: usize = 3;
const USER_NAME_MAX: usize = 100;
const PASSWORD_MIN: usize = 6;
const PASSWORD_MAX: usize = 255;

pub fn validate_coordinates(latitude: f64, longitude: f64) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        errors.push("latitude must be between -90 and 90.".to_string());
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        errors.push("longitude must be between -180 and 180.".to_string());
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn city_name_errors(name: &str) -> Vec<String> {
    let mut errors = Vec::new();
    let trimmed = name.trim();
    let length = trimmed.chars().count();

    if length < CITY_NAME_MIN || length > CITY_NAME_MAX {
        errors.push(format!(
            "city name must be between {CITY_NAME_MIN} and {CITY_NAME_MAX} characters."
        ));
    }
    if !trimmed
        .chars()
        .all(|c| c.is_alphabetic() || c.is_whitespace())
    {
        errors.push("city name must contain only letters and spaces.".to_string());
    }

    errors
}

pub fn validate_city_name(name: &str) -> Result<(), Vec<String>> {
    let errors = city_name_errors(name);
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Builds the history filter from the raw query parameters. A city name and
/// a coordinate pair are mutually exclusive; a lone latitude or longitude is
/// rejected. A blank name counts as absent.
pub fn history_filter(
    latitude: Option<f64>,
    longitude: Option<f64>,
    city_name: Option<&str>,
) -> Result<HistoryFilter, Vec<String>> {
    let city_name = city_name.map(str::trim).filter(|name| !name.is_empty());

    match (latitude, longitude, city_name) {
        (None, None, None) => Ok(HistoryFilter::Unfiltered),
        (Some(latitude), Some(longitude), None) => {
            validate_coordinates(latitude, longitude)?;
            Ok(HistoryFilter::ByCoordinates {
                latitude,
                longitude,
            })
        }
        (None, None, Some(name)) => {
            validate_city_name(name)?;
            Ok(HistoryFilter::ByCity(name.to_string()))
        }
        (Some(_), None, None) | (None, Some(_), None) => Err(vec![
            "latitude and longitude must be provided together.".to_string(),
        ]),
        _ => Err(vec![
            "filter by either city name or coordinates, not both.".to_string(),
        ]),
    }
}

pub fn validate_user(name: &str, password: &str) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let name_length = name.trim().chars().count();
    let password_length = password.chars().count();

    if name_length < USER_NAME_MIN || name_length > USER_NAME_MAX {
        errors.push(format!(
            "name must be between {USER_NAME_MIN} and {USER_NAME_MAX} characters."
        ));
    }
    if password_length < PASSWORD_MIN || password_length > PASSWORD_MAX {
        errors.push(format!(
            "password must be between {PASSWORD_MIN} and {PASSWORD_MAX} characters."
        ));
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
