//! Builders for the HTTP state bundle.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::warn;

use events_backend::domain::EventService;
use events_backend::domain::ports::{
    EventCommand, EventQuery, EventRepository, FixtureLoginService,
};
use events_backend::inbound::http::state::HttpState;
use events_backend::outbound::memory::InMemoryEventRepository;
use events_backend::outbound::persistence::DieselEventRepository;

use super::ServerConfig;

/// Wrap one event service in both driving ports.
fn event_ports<R>(repo: R) -> (Arc<dyn EventCommand>, Arc<dyn EventQuery>)
where
    R: EventRepository + 'static,
{
    let service = Arc::new(EventService::new(Arc::new(repo), Arc::new(DefaultClock)));
    let command: Arc<dyn EventCommand> = service.clone();
    (command, service)
}

/// Build the HTTP state, backed by PostgreSQL when a pool is configured.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let (events, events_query) = match &config.db_pool {
        Some(pool) => event_ports(DieselEventRepository::new(pool.clone())),
        None => {
            warn!("no database configured; events are kept in memory and lost on restart");
            event_ports(InMemoryEventRepository::with_fixture_users())
        }
    };
    web::Data::new(HttpState::new(
        Arc::new(FixtureLoginService),
        events,
        events_query,
    ))
}
