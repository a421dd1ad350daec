//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{events, users};

/// Organizer projection read from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct OrganizerRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Row struct for reading from the events table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EventRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub ticket_price: f64,
    pub privacy: String,
    pub organizer_id: Uuid,
    pub attendees: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new event records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub(crate) struct NewEventRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub date: NaiveDate,
    pub time: &'a str,
    pub location: &'a str,
    pub ticket_price: f64,
    pub privacy: &'a str,
    pub organizer_id: Uuid,
    pub attendees: &'a [Uuid],
    pub created_at: DateTime<Utc>,
}

/// Changeset limited to the organizer-editable columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = events)]
pub(crate) struct EventDetailsUpdate<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub date: NaiveDate,
    pub time: &'a str,
    pub location: &'a str,
    pub ticket_price: f64,
    pub privacy: &'a str,
}
