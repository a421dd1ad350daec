//! Driving port for event reads.

use async_trait::async_trait;

use crate::domain::{Error, EventId, EventView, UserId};

/// Driving port for event read operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventQuery: Send + Sync {
    /// List public events and the caller's own private events.
    async fn list_events(&self, caller: &UserId) -> Result<Vec<EventView>, Error>;

    /// Fetch one event with its organizer projected.
    async fn get_event(&self, id: &EventId, caller: &UserId) -> Result<EventView, Error>;
}
