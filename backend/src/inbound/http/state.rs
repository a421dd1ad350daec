//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{EventCommand, EventQuery, LoginService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub events: Arc<dyn EventCommand>,
    pub events_query: Arc<dyn EventQuery>,
}

impl HttpState {
    /// Bundle the ports handlers depend on.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use events_backend::domain::EventService;
    /// use events_backend::domain::ports::FixtureLoginService;
    /// use events_backend::inbound::http::state::HttpState;
    /// use events_backend::outbound::memory::InMemoryEventRepository;
    /// use mockable::DefaultClock;
    ///
    /// let service = Arc::new(EventService::new(
    ///     Arc::new(InMemoryEventRepository::with_fixture_users()),
    ///     Arc::new(DefaultClock),
    /// ));
    /// let state = HttpState::new(Arc::new(FixtureLoginService), service.clone(), service);
    /// let _ = state.events_query.clone();
    /// ```
    pub fn new(
        login: Arc<dyn LoginService>,
        events: Arc<dyn EventCommand>,
        events_query: Arc<dyn EventQuery>,
    ) -> Self {
        Self {
            login,
            events,
            events_query,
        }
    }
}
