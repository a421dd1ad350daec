//! Driven port for event persistence.
//!
//! Ownership-guarded mutations take the organizer id and match on it in the
//! same statement, so a mutation never lands on an event the caller does not
//! own even if the row changed between the read and the write.

use async_trait::async_trait;

use crate::domain::{Event, EventDetails, EventId, EventView, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by event repository adapters.
    pub enum EventRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "event repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "event repository query failed: {message}",
        /// A stored row could not be turned back into a valid event.
        Validation { message: String } =>
            "event repository returned invalid data: {message}",
    }
}

/// Port for reading and writing events.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Persist a newly created event.
    async fn insert(&self, event: &Event) -> Result<(), EventRepositoryError>;

    /// Find an event by id.
    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError>;

    /// Find an event by id with its organizer projected.
    async fn find_view_by_id(
        &self,
        id: &EventId,
    ) -> Result<Option<EventView>, EventRepositoryError>;

    /// List public events plus every event organized by `caller`, oldest
    /// first.
    async fn list_visible_to(
        &self,
        caller: &UserId,
    ) -> Result<Vec<EventView>, EventRepositoryError>;

    /// Overwrite the editable fields of an event organized by `organizer`.
    ///
    /// Returns `None` when no event matched both the id and the organizer.
    async fn update_details(
        &self,
        id: &EventId,
        organizer: &UserId,
        details: &EventDetails,
    ) -> Result<Option<Event>, EventRepositoryError>;

    /// Remove an event organized by `organizer`.
    ///
    /// Returns `false` when nothing was deleted.
    async fn delete(&self, id: &EventId, organizer: &UserId) -> Result<bool, EventRepositoryError>;

    /// Append `attendee` to the event unless already present, atomically.
    ///
    /// Returns `None` when the event is missing or already lists `attendee`.
    async fn add_attendee(
        &self,
        id: &EventId,
        attendee: &UserId,
    ) -> Result<Option<Event>, EventRepositoryError>;
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(EventRepositoryError::connection("pool closed"), "connection failed: pool closed")]
    #[case(EventRepositoryError::query("syntax error"), "query failed: syntax error")]
    #[case(EventRepositoryError::validation("blank title"), "invalid data: blank title")]
    fn errors_format_messages(#[case] err: EventRepositoryError, #[case] expected: &str) {
        assert!(err.to_string().ends_with(expected), "{err}");
    }
}
