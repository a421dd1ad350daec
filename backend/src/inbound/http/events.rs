//! Event HTTP handlers.
//!
//! ```text
//! POST   /api/v1/events
//! GET    /api/v1/events
//! GET    /api/v1/events/{id}
//! PUT    /api/v1/events/{id}
//! DELETE /api/v1/events/{id}
//! POST   /api/v1/events/{id}/register
//! ```
//!
//! Every handler resolves the caller from the session before calling a port.
//! Required-field and format failures on event payloads are reported as
//! server errors, the same way the store reports rejected documents.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Error, Event, EventDetails, EventId, EventPatch, EventValidationError, EventView, Privacy,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Request payload for `POST /api/v1/events`.
///
/// Fields are optional at the wire level so a missing field is reported the
/// same way as a blank one. Unknown fields such as `organizer` are ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequestBody {
    #[schema(example = "Rust meetup")]
    pub title: Option<String>,
    #[schema(example = "Talks and pizza")]
    pub description: Option<String>,
    /// `YYYY-MM-DD` or an RFC 3339 timestamp.
    #[schema(example = "2026-11-20")]
    pub date: Option<String>,
    #[schema(example = "18:30")]
    pub time: Option<String>,
    #[schema(example = "Community hall")]
    pub location: Option<String>,
    #[schema(example = 15.0)]
    pub ticket_price: Option<f64>,
    /// `public` (default) or `private`.
    pub privacy: Option<String>,
}

/// Request payload for `PUT /api/v1/events/{id}`.
///
/// Only these fields can change; anything else in the body is ignored.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequestBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub ticket_price: Option<f64>,
    pub privacy: Option<String>,
}

/// Confirmation payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Event removed")]
    pub message: String,
}

/// Payload returned by a successful registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegistrationResponse {
    #[schema(example = "Successfully registered")]
    pub message: String,
    pub event: Event,
}

fn validation_failure(message: impl std::fmt::Display) -> Error {
    Error::server_error(format!("Event validation failed: {message}"))
}

fn required<T>(value: Option<T>, field: &'static str) -> Result<T, Error> {
    value.ok_or_else(|| validation_failure(EventValidationError::BlankField { field }))
}

fn parse_date(raw: &str) -> Result<NaiveDate, Error> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|ts| ts.date_naive()))
        .map_err(|_| validation_failure(format!("Cast to date failed for value \"{raw}\"")))
}

fn parse_privacy(raw: &str) -> Result<Privacy, Error> {
    raw.parse::<Privacy>().map_err(validation_failure)
}

fn parse_event_id(raw: &str) -> Result<EventId, Error> {
    EventId::new(raw).map_err(|err| Error::server_error(format!("{err}: \"{raw}\"")))
}

impl TryFrom<CreateEventRequestBody> for EventDetails {
    type Error = Error;

    fn try_from(body: CreateEventRequestBody) -> Result<Self, Self::Error> {
        Ok(Self {
            title: body.title.unwrap_or_default(),
            description: body.description.unwrap_or_default(),
            date: parse_date(&required(body.date, "date")?)?,
            time: body.time.unwrap_or_default(),
            location: body.location.unwrap_or_default(),
            ticket_price: required(body.ticket_price, "ticketPrice")?,
            privacy: body
                .privacy
                .as_deref()
                .map(parse_privacy)
                .transpose()?
                .unwrap_or_default(),
        })
    }
}

impl TryFrom<UpdateEventRequestBody> for EventPatch {
    type Error = Error;

    fn try_from(body: UpdateEventRequestBody) -> Result<Self, Self::Error> {
        Ok(Self {
            title: body.title,
            description: body.description,
            date: body.date.as_deref().map(parse_date).transpose()?,
            time: body.time,
            location: body.location,
            ticket_price: body.ticket_price,
            privacy: body.privacy.as_deref().map(parse_privacy).transpose()?,
        })
    }
}

/// Create an event organized by the caller.
#[utoipa::path(
    post,
    path = "/api/v1/events",
    request_body = CreateEventRequestBody,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Malformed request body", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Validation or server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "createEvent",
    security(("SessionCookie" = []))
)]
#[post("/events")]
pub async fn create_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateEventRequestBody>,
) -> ApiResult<HttpResponse> {
    let caller = session.require_user_id()?;
    let details = EventDetails::try_from(payload.into_inner())?;
    let event = state.events.create_event(&caller, details).await?;
    Ok(HttpResponse::Created().json(event))
}

/// List public events plus the caller's private ones.
#[utoipa::path(
    get,
    path = "/api/v1/events",
    responses(
        (status = 200, description = "Visible events", body = [EventView]),
        (status = 401, description = "Login required", body = Error),
        (status = 500, description = "Server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "listEvents",
    security(("SessionCookie" = []))
)]
#[get("/events")]
pub async fn list_events(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<Vec<EventView>>> {
    let caller = session.require_user_id()?;
    let events = state.events_query.list_events(&caller).await?;
    Ok(web::Json(events))
}

/// Fetch one event with its organizer projected.
#[utoipa::path(
    get,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Event", body = EventView),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Event not found", body = Error),
        (status = 500, description = "Server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "getEvent",
    security(("SessionCookie" = []))
)]
#[get("/events/{id}")]
pub async fn get_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<EventView>> {
    let caller = session.require_user_id()?;
    let id = parse_event_id(&path)?;
    let event = state.events_query.get_event(&id, &caller).await?;
    Ok(web::Json(event))
}

/// Update the editable fields of an event the caller organizes.
#[utoipa::path(
    put,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    request_body = UpdateEventRequestBody,
    responses(
        (status = 200, description = "Updated event", body = Event),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not the organizer", body = Error),
        (status = 404, description = "Event not found", body = Error),
        (status = 500, description = "Validation or server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "updateEvent",
    security(("SessionCookie" = []))
)]
#[put("/events/{id}")]
pub async fn update_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<UpdateEventRequestBody>,
) -> ApiResult<web::Json<Event>> {
    let caller = session.require_user_id()?;
    let id = parse_event_id(&path)?;
    let patch = EventPatch::try_from(payload.into_inner())?;
    let event = state.events.update_event(&id, &caller, patch).await?;
    Ok(web::Json(event))
}

/// Delete an event the caller organizes.
#[utoipa::path(
    delete,
    path = "/api/v1/events/{id}",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Event removed", body = MessageResponse),
        (status = 401, description = "Login required", body = Error),
        (status = 403, description = "Caller is not the organizer", body = Error),
        (status = 404, description = "Event not found", body = Error),
        (status = 500, description = "Server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "deleteEvent",
    security(("SessionCookie" = []))
)]
#[delete("/events/{id}")]
pub async fn delete_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_event_id(&path)?;
    state.events.delete_event(&id, &caller).await?;
    Ok(web::Json(MessageResponse {
        message: "Event removed".to_owned(),
    }))
}

/// Register the caller as an attendee.
#[utoipa::path(
    post,
    path = "/api/v1/events/{id}/register",
    params(("id" = String, Path, description = "Event identifier")),
    responses(
        (status = 200, description = "Registered", body = RegistrationResponse),
        (status = 400, description = "Already registered", body = Error),
        (status = 401, description = "Login required", body = Error),
        (status = 404, description = "Event not found", body = Error),
        (status = 500, description = "Server error", body = Error)
    ),
    tags = ["events"],
    operation_id = "registerForEvent",
    security(("SessionCookie" = []))
)]
#[post("/events/{id}/register")]
pub async fn register_for_event(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<web::Json<RegistrationResponse>> {
    let caller = session.require_user_id()?;
    let id = parse_event_id(&path)?;
    let event = state.events.register_for_event(&id, &caller).await?;
    Ok(web::Json(RegistrationResponse {
        message: "Successfully registered".to_owned(),
        event,
    }))
}

/// Mount every event route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_event)
        .service(list_events)
        .service(get_event)
        .service(update_event)
        .service(delete_event)
        .service(register_for_event);
}

#[cfg(test)]
#[path = "events_tests.rs"]
mod tests;
