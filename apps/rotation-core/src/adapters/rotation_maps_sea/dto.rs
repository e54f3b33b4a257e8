//! DTOs for rotation_maps_sea adapter.

/// DTO for inserting a map into a rotation at an already-vacated ordinal.
#[derive(Debug, Clone)]
pub struct RotationMapCreate {
    pub rotation_id: i64,
    pub map_id: i64,
    pub ordinal: i32,
    pub is_next: bool,
}

/// A contiguous block of ordinals moved by `delta` in one statement pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrdinalShift {
    pub rotation_id: i64,
    pub from: i32,
    pub to: i32,
    pub delta: i32,
}
