//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed event model used by the API and
//! persistence layers, plus the services implementing the driving ports.
//! Types document their invariants and serialisation contracts in Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: API error payload and stable error identifier.
//! - Event, EventView, EventDetails, EventPatch: the event aggregate, its read
//!   projection, and the organizer-editable fields.
//! - UserId, OrganizerProfile: caller identity and the public organizer view.
//! - EventService: implementation of the event driving ports.

pub mod auth;
pub mod error;
pub mod event;
pub mod event_service;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::event::{
    Event, EventDetails, EventDraft, EventId, EventPatch, EventValidationError, EventView,
    ParsePrivacyError, Privacy,
};
pub use self::event_service::EventService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{OrganizerProfile, UserId, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use events_backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Unauthorized"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
