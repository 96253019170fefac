/// Placeholder used when the provider cannot resolve a location for a
/// coordinate pair. Readings taken there are stored without a city.
pub const UNKNOWN_LOCATION: &str = "Unknown Location";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    id: i32,
    name: String,
    country: String,
}

impl City {
    pub fn new(id: i32, name: String, country: String) -> Self {
        Self { id, name, country }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn country(&self) -> &str {
        &self.country
    }
}
