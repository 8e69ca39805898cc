//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch user-visible data
//! without importing outbound persistence concerns. The viewer is passed in
//! explicitly so the `is_subscribed` flag can be computed.

use async_trait::async_trait;

use crate::domain::{Error, Page, PageRequest, User, UserDraft, UserId, UserProfile};

/// Domain use-case port for reading users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Users ordered by username.
    async fn list_users(
        &self,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<Page<UserProfile>, Error>;

    /// One user, or `not_found`.
    async fn get_user(
        &self,
        viewer: Option<UserId>,
        user_id: UserId,
    ) -> Result<UserProfile, Error>;

    /// The authenticated user's own profile.
    async fn current_user(&self, viewer: UserId) -> Result<UserProfile, Error>;
}

/// Temporary fixture users query used until persistence is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUsersQuery;

impl FixtureUsersQuery {
    fn fixture_user(id: UserId) -> Result<UserProfile, Error> {
        const FIXTURE_USERNAME: &str = "ada";

        // Constant data; surface regressions as internal errors.
        let user = User::new(UserDraft {
            id,
            email: "ada@example.com".to_owned(),
            username: FIXTURE_USERNAME.to_owned(),
            first_name: "Ada".to_owned(),
            last_name: "Lovelace".to_owned(),
            is_admin: false,
        })
        .map_err(|err| Error::internal(format!("invalid fixture user: {err}")))?;
        Ok(UserProfile {
            user,
            is_subscribed: false,
        })
    }

    fn fixture_id() -> Result<UserId, Error> {
        UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6")
            .map_err(|err| Error::internal(format!("invalid fixture user id: {err}")))
    }
}

#[async_trait]
impl UsersQuery for FixtureUsersQuery {
    async fn list_users(
        &self,
        _viewer: Option<UserId>,
        _page: PageRequest,
    ) -> Result<Page<UserProfile>, Error> {
        Ok(Page {
            items: vec![Self::fixture_user(Self::fixture_id()?)?],
            total: 1,
        })
    }

    async fn get_user(
        &self,
        _viewer: Option<UserId>,
        user_id: UserId,
    ) -> Result<UserProfile, Error> {
        if user_id == Self::fixture_id()? {
            Self::fixture_user(user_id)
        } else {
            Err(Error::not_found(format!("user {user_id} not found")))
        }
    }

    async fn current_user(&self, viewer: UserId) -> Result<UserProfile, Error> {
        Self::fixture_user(viewer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn fixture_users_query_returns_expected_user() {
        let page = FixtureUsersQuery
            .list_users(None, PageRequest::default())
            .await
            .expect("users list");
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].user.username().as_ref(), "ada");
        assert!(!page.items[0].is_subscribed);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_current_user_echoes_viewer() {
        let viewer = UserId::random();
        let profile = FixtureUsersQuery
            .current_user(viewer.clone())
            .await
            .expect("current user");
        assert_eq!(profile.user.id(), &viewer);
    }
}
