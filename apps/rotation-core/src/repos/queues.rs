//! Queue repository functions for domain layer.

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::queues_sea as queues_adapter;
use crate::entities::queues;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};

/// Queue domain model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Queue {
    pub id: i64,
    pub name: String,
    pub size: i32,
    pub rotation_id: Option<i64>,
    pub vote_threshold: Option<i32>,
}

impl From<queues::Model> for Queue {
    fn from(model: queues::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            size: model.size,
            rotation_id: model.rotation_id,
            vote_threshold: model.vote_threshold,
        }
    }
}

impl Queue {
    /// The rotation behind this queue, or `NotFound` if none is assigned.
    pub fn require_rotation_id(&self) -> Result<i64, DomainError> {
        self.rotation_id.ok_or_else(|| {
            DomainError::not_found(
                NotFoundKind::Rotation,
                format!("Queue '{}' has no rotation", self.name),
            )
        })
    }
}

pub async fn find_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Option<Queue>, DomainError> {
    let queue = queues_adapter::find_by_name(conn, name).await?;
    Ok(queue.map(Queue::from))
}

pub async fn require_by_name<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
) -> Result<Queue, DomainError> {
    find_by_name(conn, name).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Queue,
            format!("No queue named '{}'", name.trim()),
        )
    })
}

pub async fn require_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    queue_id: i64,
) -> Result<Queue, DomainError> {
    queues_adapter::find_by_id(conn, queue_id)
        .await?
        .map(Queue::from)
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Queue, format!("Queue {queue_id} not found"))
        })
}

pub async fn find_by_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rotation_id: i64,
) -> Result<Vec<Queue>, DomainError> {
    let queues = queues_adapter::find_by_rotation(conn, rotation_id).await?;
    Ok(queues.into_iter().map(Queue::from).collect())
}

pub async fn create_queue<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    name: &str,
    size: i32,
    vote_threshold: i32,
) -> Result<Queue, DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidName,
            "Queue name must not be empty",
        ));
    }
    if size < 1 {
        return Err(DomainError::validation_other(format!(
            "Queue size must be at least 1 (got {size})"
        )));
    }
    let dto = queues_adapter::QueueCreate {
        name: name.to_string(),
        size,
        rotation_id: None,
        vote_threshold: Some(vote_threshold),
    };
    let queue = queues_adapter::create_queue(conn, dto).await?;
    Ok(Queue::from(queue))
}

pub async fn set_rotation<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    queue_id: i64,
    rotation_id: Option<i64>,
) -> Result<(), DomainError> {
    queues_adapter::set_rotation(conn, queue_id, rotation_id).await?;
    Ok(())
}

pub async fn set_vote_threshold<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    queue_id: i64,
    vote_threshold: i32,
) -> Result<(), DomainError> {
    if vote_threshold < 1 {
        return Err(DomainError::validation(
            ValidationKind::InvalidThreshold,
            format!("Vote threshold must be at least 1 (got {vote_threshold})"),
        ));
    }
    queues_adapter::set_vote_threshold(conn, queue_id, Some(vote_threshold)).await?;
    Ok(())
}
