//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod event_command;
mod event_query;
mod event_repository;
mod login_service;

#[cfg(test)]
pub use event_command::MockEventCommand;
pub use event_command::EventCommand;
#[cfg(test)]
pub use event_query::MockEventQuery;
pub use event_query::EventQuery;
#[cfg(test)]
pub use event_repository::MockEventRepository;
pub use event_repository::{EventRepository, EventRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{
    FIXTURE_PASSWORD, FIXTURE_USERS, FixtureLoginService, FixtureUser, LoginService,
};
