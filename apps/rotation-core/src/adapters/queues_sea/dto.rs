//! DTOs for queues_sea adapter.

/// DTO for creating a queue.
#[derive(Debug, Clone)]
pub struct QueueCreate {
    pub name: String,
    pub size: i32,
    pub rotation_id: Option<i64>,
    pub vote_threshold: Option<i32>,
}
