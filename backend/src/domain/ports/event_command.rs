//! Driving port for event mutations.
//!
//! Every operation receives the authenticated caller explicitly; the port
//! never reads identity from ambient state.

use async_trait::async_trait;

use crate::domain::{Error, Event, EventDetails, EventId, EventPatch, UserId};

/// Driving port for event write operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventCommand: Send + Sync {
    /// Create an event organized by `caller` with an empty attendee list.
    async fn create_event(&self, caller: &UserId, details: EventDetails) -> Result<Event, Error>;

    /// Apply an allow-listed patch to an event organized by `caller`.
    async fn update_event(
        &self,
        id: &EventId,
        caller: &UserId,
        patch: EventPatch,
    ) -> Result<Event, Error>;

    /// Permanently remove an event organized by `caller`.
    async fn delete_event(&self, id: &EventId, caller: &UserId) -> Result<(), Error>;

    /// Add `caller` to the event's attendee list.
    ///
    /// Fails with [`crate::domain::ErrorCode::AlreadyRegistered`] when the
    /// caller is already listed.
    async fn register_for_event(&self, id: &EventId, caller: &UserId) -> Result<Event, Error>;
}
