//! Event domain service.
//!
//! Implements the event driving ports on top of an [`EventRepository`]. The
//! ownership checks live here; the repository re-applies them in the write
//! statement so a concurrent change cannot slip past.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{EventCommand, EventQuery, EventRepository, EventRepositoryError};
use crate::domain::{
    Error, Event, EventDetails, EventDraft, EventId, EventPatch, EventValidationError, EventView,
    Privacy, UserId,
};

const EVENT_NOT_FOUND: &str = "Event not found";
const NOT_ORGANIZER: &str = "Unauthorized";
const ALREADY_REGISTERED: &str = "Already registered";

fn map_repository_error(error: EventRepositoryError) -> Error {
    debug!(%error, "event repository failure");
    Error::server_error(error)
}

fn map_validation_error(error: EventValidationError) -> Error {
    Error::server_error(format!("Event validation failed: {error}"))
}

/// Event service implementing [`EventCommand`] and [`EventQuery`].
#[derive(Clone)]
pub struct EventService<R> {
    event_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> EventService<R> {
    /// Create a new service over the event repository.
    pub fn new(event_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { event_repo, clock }
    }
}

impl<R> EventService<R>
where
    R: EventRepository,
{
    /// Load an event and check `caller` organizes it.
    async fn load_owned(&self, id: &EventId, caller: &UserId) -> Result<Event, Error> {
        let event = self
            .event_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(EVENT_NOT_FOUND))?;
        if !event.is_organized_by(caller) {
            return Err(Error::forbidden(NOT_ORGANIZER));
        }
        Ok(event)
    }
}

#[async_trait]
impl<R> EventCommand for EventService<R>
where
    R: EventRepository,
{
    async fn create_event(&self, caller: &UserId, details: EventDetails) -> Result<Event, Error> {
        let event = Event::new(EventDraft {
            id: EventId::random(),
            organizer: *caller,
            details,
            attendees: Vec::new(),
            created_at: self.clock.utc(),
        })
        .map_err(map_validation_error)?;

        self.event_repo
            .insert(&event)
            .await
            .map_err(map_repository_error)?;
        debug!(event_id = %event.id(), organizer = %caller, "event created");
        Ok(event)
    }

    async fn update_event(
        &self,
        id: &EventId,
        caller: &UserId,
        patch: EventPatch,
    ) -> Result<Event, Error> {
        let event = self.load_owned(id, caller).await?;
        let patched = event.with_patch(patch).map_err(map_validation_error)?;

        self.event_repo
            .update_details(id, caller, patched.details())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(EVENT_NOT_FOUND))
    }

    async fn delete_event(&self, id: &EventId, caller: &UserId) -> Result<(), Error> {
        self.load_owned(id, caller).await?;

        let deleted = self
            .event_repo
            .delete(id, caller)
            .await
            .map_err(map_repository_error)?;
        if !deleted {
            return Err(Error::not_found(EVENT_NOT_FOUND));
        }
        debug!(event_id = %id, "event removed");
        Ok(())
    }

    async fn register_for_event(&self, id: &EventId, caller: &UserId) -> Result<Event, Error> {
        let event = self
            .event_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(EVENT_NOT_FOUND))?;
        if event.has_attendee(caller) {
            return Err(Error::already_registered(ALREADY_REGISTERED));
        }

        if let Some(registered) = self
            .event_repo
            .add_attendee(id, caller)
            .await
            .map_err(map_repository_error)?
        {
            return Ok(registered);
        }

        // No row changed: either the event is gone or a concurrent request
        // appended the caller first.
        match self
            .event_repo
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
        {
            Some(_) => Err(Error::already_registered(ALREADY_REGISTERED)),
            None => Err(Error::not_found(EVENT_NOT_FOUND)),
        }
    }
}

#[async_trait]
impl<R> EventQuery for EventService<R>
where
    R: EventRepository,
{
    async fn list_events(&self, caller: &UserId) -> Result<Vec<EventView>, Error> {
        self.event_repo
            .list_visible_to(caller)
            .await
            .map_err(map_repository_error)
    }

    async fn get_event(&self, id: &EventId, caller: &UserId) -> Result<EventView, Error> {
        let view = self
            .event_repo
            .find_view_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found(EVENT_NOT_FOUND))?;
        if view.details().privacy == Privacy::Private && !view.is_organized_by(caller) {
            debug!(event_id = %id, caller = %caller, "private event read by non-organizer");
        }
        Ok(view)
    }
}

#[cfg(test)]
#[path = "event_service_tests.rs"]
mod tests;
