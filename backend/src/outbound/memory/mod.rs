//! Process-local event store.
//!
//! Used when no database is configured and by the HTTP integration suite.
//! It mirrors the PostgreSQL adapter's semantics: events whose organizer is
//! unknown to the directory are hidden from projected reads, and the
//! attendee append is checked and applied under one write lock.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{EventRepository, EventRepositoryError, FIXTURE_USERS};
use crate::domain::{Event, EventDetails, EventId, EventPatch, EventView, OrganizerProfile, UserId};

#[derive(Debug, Default)]
struct Store {
    events: Vec<Event>,
}

/// In-memory implementation of [`EventRepository`].
#[derive(Debug)]
pub struct InMemoryEventRepository {
    directory: HashMap<UserId, OrganizerProfile>,
    store: RwLock<Store>,
}

impl InMemoryEventRepository {
    /// Create an empty store whose organizer directory holds `profiles`.
    pub fn new(profiles: impl IntoIterator<Item = OrganizerProfile>) -> Self {
        Self {
            directory: profiles
                .into_iter()
                .map(|profile| (profile.id, profile))
                .collect(),
            store: RwLock::new(Store::default()),
        }
    }

    /// Create an empty store that knows the demo accounts.
    pub fn with_fixture_users() -> Self {
        Self::new(FIXTURE_USERS.iter().map(|user| user.profile()))
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, EventRepositoryError> {
        self.store
            .read()
            .map_err(|_| EventRepositoryError::connection("event store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, EventRepositoryError> {
        self.store
            .write()
            .map_err(|_| EventRepositoryError::connection("event store lock poisoned"))
    }

    fn project(&self, event: &Event) -> Option<EventView> {
        self.directory
            .get(event.organizer())
            .map(|profile| EventView::new(event.clone(), profile.clone()))
    }
}

impl Default for InMemoryEventRepository {
    fn default() -> Self {
        Self::with_fixture_users()
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn insert(&self, event: &Event) -> Result<(), EventRepositoryError> {
        let mut store = self.write()?;
        if store.events.iter().any(|stored| stored.id() == event.id()) {
            return Err(EventRepositoryError::query(format!(
                "duplicate event id {}",
                event.id()
            )));
        }
        store.events.push(event.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &EventId) -> Result<Option<Event>, EventRepositoryError> {
        let store = self.read()?;
        Ok(store.events.iter().find(|event| event.id() == *id).cloned())
    }

    async fn find_view_by_id(
        &self,
        id: &EventId,
    ) -> Result<Option<EventView>, EventRepositoryError> {
        let store = self.read()?;
        Ok(store
            .events
            .iter()
            .find(|event| event.id() == *id)
            .and_then(|event| self.project(event)))
    }

    async fn list_visible_to(
        &self,
        caller: &UserId,
    ) -> Result<Vec<EventView>, EventRepositoryError> {
        let store = self.read()?;
        let mut visible: Vec<&Event> = store
            .events
            .iter()
            .filter(|event| event.is_visible_to(caller))
            .collect();
        visible.sort_by_key(|event| event.created_at());
        Ok(visible
            .into_iter()
            .filter_map(|event| self.project(event))
            .collect())
    }

    async fn update_details(
        &self,
        id: &EventId,
        organizer: &UserId,
        details: &EventDetails,
    ) -> Result<Option<Event>, EventRepositoryError> {
        let mut store = self.write()?;
        let Some(slot) = store
            .events
            .iter_mut()
            .find(|event| event.id() == *id && event.is_organized_by(organizer))
        else {
            return Ok(None);
        };
        let patch = EventPatch {
            title: Some(details.title.clone()),
            description: Some(details.description.clone()),
            date: Some(details.date),
            time: Some(details.time.clone()),
            location: Some(details.location.clone()),
            ticket_price: Some(details.ticket_price),
            privacy: Some(details.privacy),
        };
        let updated = slot
            .with_patch(patch)
            .map_err(|err| EventRepositoryError::validation(err.to_string()))?;
        *slot = updated.clone();
        Ok(Some(updated))
    }

    async fn delete(&self, id: &EventId, organizer: &UserId) -> Result<bool, EventRepositoryError> {
        let mut store = self.write()?;
        let before = store.events.len();
        store
            .events
            .retain(|event| !(event.id() == *id && event.is_organized_by(organizer)));
        Ok(store.events.len() < before)
    }

    async fn add_attendee(
        &self,
        id: &EventId,
        attendee: &UserId,
    ) -> Result<Option<Event>, EventRepositoryError> {
        let mut store = self.write()?;
        let Some(event) = store.events.iter_mut().find(|event| event.id() == *id) else {
            return Ok(None);
        };
        if !event.add_attendee(*attendee) {
            return Ok(None);
        }
        Ok(Some(event.clone()))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use chrono::{Duration, NaiveDate, Utc};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::{EventDraft, Privacy};

    #[fixture]
    fn repo() -> InMemoryEventRepository {
        InMemoryEventRepository::with_fixture_users()
    }

    fn ada() -> UserId {
        FIXTURE_USERS[0].user_id()
    }

    fn grace() -> UserId {
        FIXTURE_USERS[1].user_id()
    }

    fn event(organizer: UserId, privacy: Privacy, minutes_ago: i64) -> Event {
        Event::new(EventDraft {
            id: EventId::random(),
            organizer,
            details: EventDetails {
                title: "Rust meetup".into(),
                description: "Talks and pizza".into(),
                date: NaiveDate::from_ymd_opt(2026, 11, 20).expect("valid date"),
                time: "18:30".into(),
                location: "Community hall".into(),
                ticket_price: 15.0,
                privacy,
            },
            attendees: Vec::new(),
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        })
        .expect("valid event")
    }

    #[rstest]
    #[tokio::test]
    async fn list_filters_private_events_of_others(repo: InMemoryEventRepository) {
        let public = event(ada(), Privacy::Public, 3);
        let own_private = event(grace(), Privacy::Private, 2);
        let other_private = event(ada(), Privacy::Private, 1);
        for e in [&public, &own_private, &other_private] {
            repo.insert(e).await.expect("insert");
        }

        let listed = repo.list_visible_to(&grace()).await.expect("list");
        let ids: Vec<EventId> = listed.iter().map(EventView::id).collect();

        assert_eq!(ids, vec![public.id(), own_private.id()]);
        assert_eq!(listed[0].organizer().name, "Ada Lovelace");
    }

    #[rstest]
    #[tokio::test]
    async fn add_attendee_appends_once(repo: InMemoryEventRepository) {
        let stored = event(ada(), Privacy::Public, 0);
        repo.insert(&stored).await.expect("insert");

        let first = repo
            .add_attendee(&stored.id(), &grace())
            .await
            .expect("append");
        let second = repo
            .add_attendee(&stored.id(), &grace())
            .await
            .expect("append");

        assert_eq!(first.map(|e| e.attendees().to_vec()), Some(vec![grace()]));
        assert!(second.is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn guarded_mutations_ignore_other_organizers(repo: InMemoryEventRepository) {
        let stored = event(ada(), Privacy::Public, 0);
        repo.insert(&stored).await.expect("insert");

        let updated = repo
            .update_details(&stored.id(), &grace(), stored.details())
            .await
            .expect("update");
        let deleted = repo.delete(&stored.id(), &grace()).await.expect("delete");

        assert!(updated.is_none());
        assert!(!deleted);
        assert!(repo.delete(&stored.id(), &ada()).await.expect("delete"));
        assert!(!repo.delete(&stored.id(), &ada()).await.expect("delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_organizer_is_hidden_from_views(repo: InMemoryEventRepository) {
        let stored = event(UserId::random(), Privacy::Public, 0);
        repo.insert(&stored).await.expect("insert");

        assert!(
            repo.find_view_by_id(&stored.id())
                .await
                .expect("lookup")
                .is_none()
        );
        assert!(repo.find_by_id(&stored.id()).await.expect("lookup").is_some());
    }
}
