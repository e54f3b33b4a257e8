//! DTOs for rotations_sea adapter.

/// DTO for creating a rotation.
#[derive(Debug, Clone)]
pub struct RotationCreate {
    pub name: String,
    pub is_random: bool,
}

impl RotationCreate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_random: false,
        }
    }

    pub fn with_random(mut self, is_random: bool) -> Self {
        self.is_random = is_random;
        self
    }
}

/// DTO for renaming a rotation under its claim.
#[derive(Debug, Clone)]
pub struct RotationRename {
    pub id: i64,
    pub current_lock_version: i32,
    pub name: String,
}

/// DTO for toggling random selection under the rotation's claim.
#[derive(Debug, Clone)]
pub struct RotationSetRandom {
    pub id: i64,
    pub current_lock_version: i32,
    pub is_random: bool,
}
