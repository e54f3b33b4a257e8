//! DTOs for maps_sea adapter.

/// DTO for creating a map.
#[derive(Debug, Clone)]
pub struct MapCreate {
    pub full_name: String,
    pub short_name: String,
}

impl MapCreate {
    pub fn new(full_name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            short_name: short_name.into(),
        }
    }
}
