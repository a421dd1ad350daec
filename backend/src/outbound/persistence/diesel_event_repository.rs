//! PostgreSQL-backed `EventRepository` implementation using Diesel ORM.
//!
//! Rows are turned back into domain events through the validating
//! constructors, so a corrupt row surfaces as a repository error instead of
//! an invalid event.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_types::{Array, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{EventRepository, EventRepositoryError};
use crate::domain::{
    Event, EventDetails, EventDraft, EventId, EventView, OrganizerProfile, Privacy, UserId,
};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{EventDetailsUpdate, EventRow, NewEventRow, OrganizerRow};
use super::pool::{DbPool, PoolError};
use super::schema::{events, users};

diesel::define_sql_function! {
    /// PostgreSQL `array_append`.
    fn array_append(array: Array<SqlUuid>, element: SqlUuid) -> Array<SqlUuid>;
}

/// Diesel-backed implementation of the event repository port.
#[derive(Clone)]
pub struct DieselEventRepository {
    pool: DbPool,
}

impl DieselEventRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> EventRepositoryError {
    map_basic_pool_error(error, EventRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> EventRepositoryError {
    map_basic_diesel_error(
        error,
        EventRepositoryError::query,
        EventRepositoryError::connection,
    )
}

fn row_to_event(row: EventRow) -> Result<Event, EventRepositoryError> {
    let EventRow {
        id,
        title,
        description,
        date,
        time,
        location,
        ticket_price,
        privacy,
        organizer_id,
        attendees,
        created_at,
    } = row;

    let privacy = privacy
        .parse::<Privacy>()
        .map_err(|err| EventRepositoryError::validation(err.to_string()))?;

    Event::new(EventDraft {
        id: EventId::from_uuid(id),
        organizer: UserId::from_uuid(organizer_id),
        details: EventDetails {
            title,
            description,
            date,
            time,
            location,
            ticket_price,
            privacy,
        },
        attendees: attendees.into_iter().map(UserId::from_uuid).collect(),
        created_at,
    })
    .map_err(|err| EventRepositoryError::validation(err.to_string()))
}

fn rows_to_view(
    (event, organizer): (EventRow, OrganizerRow),
) -> Result<EventView, EventRepositoryError> {
    let event = row_to_event(event)?;
    Ok(EventView::new(
        event,
        OrganizerProfile {
            id: UserId::from_uuid(organizer.id),
            name: organizer.name,
            email: organizer.email,
        },
    ))
}

fn details_changeset(details: &EventDetails) -> EventDetailsUpdate<'_> {
    EventDetailsUpdate {
        title: &details.title,
        description: &details.description,
        date: details.date,
        time: &details.time,
        location: &details.location,
        ticket_price: details.ticket_price,
        privacy: details.privacy.as_str(),
    }
}

#[async_trait]
impl EventRepository for DieselEventRepository {
    async fn insert(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let details = event.details();
        let attendees: Vec<Uuid> = event.attendees().iter().map(|id| *id.as_uuid()).collect();

        let new_row = NewEventRow {
            id: *event.id().as_uuid(),
            title: &details.title,
            description: &details.description,
            date: details.date,
            time: &details.time,
            location: &details.location,
            ticket_price: details.ticket_price,
            privacy: details.privacy.as_str(),
            organizer_id: *event.organizer().as_uuid(),
            attendees: &attendees,
            created_at: event.created_at(),
        };

        diesel::insert_into(events::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = events::table
            .filter(events::id.eq(id.as_uuid()))
            .select(EventRow::as_select())
            .first::<EventRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_event).transpose()
    }

    async fn find_view_by_id(
        &self,
        id: &EventId,
    ) -> Result<Option<EventView>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = events::table
            .inner_join(users::table)
            .filter(events::id.eq(id.as_uuid()))
            .select((EventRow::as_select(), OrganizerRow::as_select()))
            .first::<(EventRow, OrganizerRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(rows_to_view).transpose()
    }

    async fn list_visible_to(
        &self,
        caller: &UserId,
    ) -> Result<Vec<EventView>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(EventRow, OrganizerRow)> = events::table
            .inner_join(users::table)
            .filter(
                events::privacy
                    .eq(Privacy::Public.as_str())
                    .or(events::organizer_id.eq(caller.as_uuid())),
            )
            .order((events::created_at.asc(), events::id.asc()))
            .select((EventRow::as_select(), OrganizerRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(rows_to_view).collect()
    }

    async fn update_details(
        &self,
        id: &EventId,
        organizer: &UserId,
        details: &EventDetails,
    ) -> Result<Option<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(
            events::table
                .filter(events::id.eq(id.as_uuid()))
                .filter(events::organizer_id.eq(organizer.as_uuid())),
        )
        .set(&details_changeset(details))
        .returning(EventRow::as_returning())
        .get_result::<EventRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_event).transpose()
    }

    async fn delete(&self, id: &EventId, organizer: &UserId) -> Result<bool, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            events::table
                .filter(events::id.eq(id.as_uuid()))
                .filter(events::organizer_id.eq(organizer.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn add_attendee(
        &self,
        id: &EventId,
        attendee: &UserId,
    ) -> Result<Option<Event>, EventRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let attendee = *attendee.as_uuid();

        // Single statement: the membership check and the append cannot
        // interleave with a concurrent registration.
        let row = diesel::update(
            events::table
                .filter(events::id.eq(id.as_uuid()))
                .filter(diesel::dsl::not(events::attendees.contains(vec![attendee]))),
        )
        .set(events::attendees.eq(array_append(events::attendees, attendee)))
        .returning(EventRow::as_returning())
        .get_result::<EventRow>(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        row.map(row_to_event).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion coverage; query behaviour is exercised against a live
    //! database outside the unit suite.
    use chrono::{NaiveDate, Utc};
    use rstest::{fixture, rstest};

    use super::*;

    #[fixture]
    fn row() -> EventRow {
        EventRow {
            id: Uuid::new_v4(),
            title: "Rust meetup".into(),
            description: "Talks and pizza".into(),
            date: NaiveDate::from_ymd_opt(2026, 11, 20).expect("valid date"),
            time: "18:30".into(),
            location: "Community hall".into(),
            ticket_price: 15.0,
            privacy: "private".into(),
            organizer_id: Uuid::new_v4(),
            attendees: vec![Uuid::new_v4()],
            created_at: Utc::now(),
        }
    }

    #[rstest]
    fn row_converts_to_event(row: EventRow) {
        let organizer = row.organizer_id;
        let event = row_to_event(row).expect("valid row");
        assert_eq!(event.organizer().as_uuid(), &organizer);
        assert_eq!(event.details().privacy, Privacy::Private);
        assert_eq!(event.attendees().len(), 1);
    }

    #[rstest]
    fn unknown_privacy_is_a_validation_error(row: EventRow) {
        let row = EventRow {
            privacy: "friends".into(),
            ..row
        };
        let err = row_to_event(row).expect_err("invalid privacy");
        assert!(matches!(err, EventRepositoryError::Validation { .. }));
    }

    #[rstest]
    fn duplicate_attendees_are_a_validation_error(row: EventRow) {
        let attendee = Uuid::new_v4();
        let row = EventRow {
            attendees: vec![attendee, attendee],
            ..row
        };
        let err = row_to_event(row).expect_err("duplicate attendees");
        assert!(matches!(err, EventRepositoryError::Validation { .. }));
    }

    #[rstest]
    fn view_takes_organizer_from_join(row: EventRow) {
        let organizer = OrganizerRow {
            id: row.organizer_id,
            name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
        };
        let view = rows_to_view((row, organizer)).expect("valid rows");
        assert_eq!(view.organizer().name, "Grace Hopper");
    }
}
