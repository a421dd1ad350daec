//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing infrastructure, so handler tests can substitute a double.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Error, LoginCredentials, OrganizerProfile, UserId};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated user id.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error>;
}

/// Demo account known to [`FixtureLoginService`].
///
/// The same accounts are seeded into the `users` table by the initial
/// migration so organizer projections resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureUser {
    pub username: &'static str,
    pub id: Uuid,
    pub name: &'static str,
    pub email: &'static str,
}

impl FixtureUser {
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.id)
    }

    /// Public projection of this account.
    pub fn profile(&self) -> OrganizerProfile {
        OrganizerProfile {
            id: self.user_id(),
            name: self.name.to_owned(),
            email: self.email.to_owned(),
        }
    }
}

/// Password shared by every fixture account.
pub const FIXTURE_PASSWORD: &str = "password";

/// Demo accounts accepted by [`FixtureLoginService`].
pub const FIXTURE_USERS: [FixtureUser; 3] = [
    FixtureUser {
        username: "ada",
        id: Uuid::from_u128(0x5b7d2a3e_1c4f_4e8a_9b6d_0f2e3c4d5a61),
        name: "Ada Lovelace",
        email: "ada@example.com",
    },
    FixtureUser {
        username: "grace",
        id: Uuid::from_u128(0x8c1e4f7a_2b3d_4c5e_8f9a_1b2c3d4e5f62),
        name: "Grace Hopper",
        email: "grace@example.com",
    },
    FixtureUser {
        username: "alan",
        id: Uuid::from_u128(0x0a9b8c7d_6e5f_4a3b_9c2d_1e0f9a8b7c63),
        name: "Alan Turing",
        email: "alan@example.com",
    },
];

/// In-memory authenticator over [`FIXTURE_USERS`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoginService;

#[async_trait]
impl LoginService for FixtureLoginService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<UserId, Error> {
        FIXTURE_USERS
            .iter()
            .find(|user| {
                user.username == credentials.username()
                    && credentials.password() == FIXTURE_PASSWORD
            })
            .map(FixtureUser::user_id)
            .ok_or_else(|| Error::unauthorized("invalid credentials"))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("ada", "password", Some(FIXTURE_USERS[0].id))]
    #[case("grace", "password", Some(FIXTURE_USERS[1].id))]
    #[case("alan", "password", Some(FIXTURE_USERS[2].id))]
    #[case("ada", "wrong", None)]
    #[case("admin", "password", None)]
    #[tokio::test]
    async fn fixture_login_service_accepts_demo_accounts(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: Option<Uuid>,
    ) {
        let creds =
            LoginCredentials::try_from_parts(username, password).expect("credentials shape");
        let result = FixtureLoginService.authenticate(&creds).await;
        match (expected, result) {
            (Some(id), Ok(user_id)) => assert_eq!(user_id.as_uuid(), &id),
            (None, Err(err)) => assert_eq!(err.code(), ErrorCode::Unauthorized),
            (Some(_), Err(err)) => panic!("expected success, got error: {err:?}"),
            (None, Ok(id)) => panic!("expected failure, got success: {id}"),
        }
    }

    #[rstest]
    fn fixture_ids_are_distinct() {
        let [a, b, c] = FIXTURE_USERS.map(|user| user.id);
        assert!(a != b && b != c && a != c);
    }
}
