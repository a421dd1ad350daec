//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` when the migrations change.

diesel::table! {
    /// Accounts that can organize and attend events.
    users (id) {
        id -> Uuid,
        name -> Varchar,
        email -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Scheduled events.
    events (id) {
        id -> Uuid,
        title -> Text,
        description -> Text,
        date -> Date,
        time -> Text,
        location -> Text,
        ticket_price -> Float8,
        /// `public` or `private`.
        privacy -> Varchar,
        organizer_id -> Uuid,
        /// Registered user ids in registration order.
        attendees -> Array<Uuid>,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(events -> users (organizer_id));

diesel::allow_tables_to_appear_in_same_query!(events, users);
