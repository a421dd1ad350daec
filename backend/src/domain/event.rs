//! Event aggregate and its read projection.
//!
//! An [`Event`] has exactly one organizer, fixed when the event is created.
//! The mutable surface is limited to [`EventDetails`]; updates arrive as an
//! [`EventPatch`] whose fields are an explicit allow-list, so the organizer,
//! attendee list, identifier, and creation timestamp can never be overwritten
//! through an update.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::{OrganizerProfile, UserId};

/// Validation failures raised while building or updating an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// A required text field was empty once trimmed.
    BlankField { field: &'static str },
    /// `ticketPrice` was NaN or infinite.
    NonFiniteTicketPrice,
    /// The attendee list contained the same user twice.
    DuplicateAttendee { attendee: UserId },
    /// The identifier was not a UUID.
    InvalidId,
}

impl fmt::Display for EventValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankField { field } => write!(f, "Path `{field}` is required."),
            Self::NonFiniteTicketPrice => write!(f, "ticketPrice must be a finite number"),
            Self::DuplicateAttendee { attendee } => {
                write!(f, "attendee {attendee} is listed more than once")
            }
            Self::InvalidId => write!(f, "event id must be a valid UUID"),
        }
    }
}

impl std::error::Error for EventValidationError {}

/// Stable event identifier.
///
/// # Examples
/// ```
/// use events_backend::domain::EventId;
///
/// let id = EventId::new("9b2c7a52-6a0e-4f0e-9d36-4b8f0a3d2c11").unwrap();
/// assert_eq!(id.to_string(), "9b2c7a52-6a0e-4f0e-9d36-4b8f0a3d2c11");
/// assert!(EventId::new("42").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventId(Uuid);

impl EventId {
    /// Parse an identifier from its string form.
    pub fn new(id: impl AsRef<str>) -> Result<Self, EventValidationError> {
        Uuid::parse_str(id.as_ref())
            .map(Self)
            .map_err(|_| EventValidationError::InvalidId)
    }

    /// Generate a fresh identifier for a new event.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a UUID read from storage.
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<EventId> for String {
    fn from(value: EventId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for EventId {
    type Error = EventValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Event visibility flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Privacy {
    /// Listed for every authenticated caller.
    #[default]
    Public,
    /// Listed for the organizer only.
    Private,
}

impl Privacy {
    /// Storage and wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
        }
    }
}

impl fmt::Display for Privacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown privacy value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePrivacyError(pub String);

impl fmt::Display for ParsePrivacyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid enum value for path `privacy`.", self.0)
    }
}

impl std::error::Error for ParsePrivacyError {}

impl FromStr for Privacy {
    type Err = ParsePrivacyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Self::Public),
            "private" => Ok(Self::Private),
            other => Err(ParsePrivacyError(other.to_owned())),
        }
    }
}

/// Organizer-editable fields of an event.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventDetails {
    #[schema(example = "Rust meetup")]
    pub title: String,
    #[schema(example = "Talks and pizza")]
    pub description: String,
    #[schema(value_type = String, format = Date, example = "2026-11-20")]
    pub date: NaiveDate,
    #[schema(example = "18:30")]
    pub time: String,
    #[schema(example = "Community hall")]
    pub location: String,
    #[schema(example = 15.0)]
    pub ticket_price: f64,
    pub privacy: Privacy,
}

impl EventDetails {
    /// Check required-field constraints.
    ///
    /// # Examples
    /// ```
    /// use chrono::NaiveDate;
    /// use events_backend::domain::{EventDetails, EventValidationError, Privacy};
    ///
    /// let details = EventDetails {
    ///     title: "  ".into(),
    ///     description: "Talks".into(),
    ///     date: NaiveDate::from_ymd_opt(2026, 11, 20).unwrap(),
    ///     time: "18:30".into(),
    ///     location: "Hall".into(),
    ///     ticket_price: 0.0,
    ///     privacy: Privacy::Public,
    /// };
    /// assert_eq!(
    ///     details.validate(),
    ///     Err(EventValidationError::BlankField { field: "title" })
    /// );
    /// ```
    pub fn validate(&self) -> Result<(), EventValidationError> {
        let required = [
            ("title", self.title.as_str()),
            ("description", self.description.as_str()),
            ("time", self.time.as_str()),
            ("location", self.location.as_str()),
        ];
        if let Some((field, _)) = required
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
        {
            return Err(EventValidationError::BlankField { field });
        }
        if !self.ticket_price.is_finite() {
            return Err(EventValidationError::NonFiniteTicketPrice);
        }
        Ok(())
    }

    /// Overwrite the fields present in `patch` and return the result.
    ///
    /// The result is not validated; callers re-run [`EventDetails::validate`].
    #[must_use]
    pub fn patched(self, patch: EventPatch) -> Self {
        let EventPatch {
            title,
            description,
            date,
            time,
            location,
            ticket_price,
            privacy,
        } = patch;
        Self {
            title: title.unwrap_or(self.title),
            description: description.unwrap_or(self.description),
            date: date.unwrap_or(self.date),
            time: time.unwrap_or(self.time),
            location: location.unwrap_or(self.location),
            ticket_price: ticket_price.unwrap_or(self.ticket_price),
            privacy: privacy.unwrap_or(self.privacy),
        }
    }
}

/// Partial update restricted to the organizer-editable fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub ticket_price: Option<f64>,
    pub privacy: Option<Privacy>,
}

/// Input for [`Event::new`].
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub id: EventId,
    pub organizer: UserId,
    pub details: EventDetails,
    pub attendees: Vec<UserId>,
    pub created_at: DateTime<Utc>,
}

/// A scheduled gathering.
///
/// ## Invariants
/// - Required text fields are non-blank and `ticket_price` is finite.
/// - `attendees` holds no duplicates.
/// - `organizer` never changes after construction.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[schema(value_type = String, format = Uuid)]
    id: EventId,
    #[serde(flatten)]
    details: EventDetails,
    #[schema(value_type = String, format = Uuid)]
    organizer: UserId,
    #[schema(value_type = Vec<String>)]
    attendees: Vec<UserId>,
    #[schema(value_type = String, format = DateTime)]
    created_at: DateTime<Utc>,
}

impl Event {
    /// Build a validated event.
    pub fn new(draft: EventDraft) -> Result<Self, EventValidationError> {
        let EventDraft {
            id,
            organizer,
            details,
            attendees,
            created_at,
        } = draft;
        details.validate()?;
        for (index, attendee) in attendees.iter().enumerate() {
            if attendees[..index].contains(attendee) {
                return Err(EventValidationError::DuplicateAttendee {
                    attendee: *attendee,
                });
            }
        }
        Ok(Self {
            id,
            details,
            organizer,
            attendees,
            created_at,
        })
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn organizer(&self) -> &UserId {
        &self.organizer
    }

    pub fn details(&self) -> &EventDetails {
        &self.details
    }

    pub fn attendees(&self) -> &[UserId] {
        &self.attendees
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether `user` created this event.
    pub fn is_organized_by(&self, user: &UserId) -> bool {
        self.organizer == *user
    }

    /// List visibility: public events, or any event the caller organizes.
    pub fn is_visible_to(&self, user: &UserId) -> bool {
        self.details.privacy == Privacy::Public || self.is_organized_by(user)
    }

    pub fn has_attendee(&self, user: &UserId) -> bool {
        self.attendees.contains(user)
    }

    /// Apply an allow-listed patch, re-validating the result.
    pub fn with_patch(&self, patch: EventPatch) -> Result<Self, EventValidationError> {
        let details = self.details.clone().patched(patch);
        details.validate()?;
        Ok(Self {
            details,
            ..self.clone()
        })
    }

    /// Append `user` to the attendee list unless already present.
    ///
    /// Returns `false` when the user was already registered.
    pub fn add_attendee(&mut self, user: UserId) -> bool {
        if self.has_attendee(&user) {
            return false;
        }
        self.attendees.push(user);
        true
    }
}

/// Event as returned by read operations, with the organizer projected.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    #[schema(value_type = String, format = Uuid)]
    id: EventId,
    #[serde(flatten)]
    details: EventDetails,
    organizer: OrganizerProfile,
    #[schema(value_type = Vec<String>)]
    attendees: Vec<UserId>,
    #[schema(value_type = String, format = DateTime)]
    created_at: DateTime<Utc>,
}

impl EventView {
    /// Pair an event with its organizer's public profile.
    ///
    /// The profile id is always overwritten with the event's organizer id.
    pub fn new(event: Event, organizer: OrganizerProfile) -> Self {
        let Event {
            id,
            details,
            organizer: organizer_id,
            attendees,
            created_at,
        } = event;
        let organizer = OrganizerProfile {
            id: organizer_id,
            ..organizer
        };
        Self {
            id,
            details,
            organizer,
            attendees,
            created_at,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn details(&self) -> &EventDetails {
        &self.details
    }

    pub fn organizer(&self) -> &OrganizerProfile {
        &self.organizer
    }

    pub fn attendees(&self) -> &[UserId] {
        &self.attendees
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the viewing caller organizes this event.
    pub fn is_organized_by(&self, user: &UserId) -> bool {
        self.organizer.id == *user
    }
}
