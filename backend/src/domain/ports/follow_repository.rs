//! Port for follower/author relations.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::{Page, PageRequest, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by follow repository adapters.
    pub enum FollowRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "follow repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "follow repository query failed: {message}",
        /// The follower already follows the author.
        AlreadyFollowing { author_id: String } =>
            "already subscribed to {author_id}",
        /// The author does not exist.
        AuthorNotFound { author_id: String } =>
            "user {author_id} does not exist",
    }
}

/// Port over the `(follower, author)` relation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FollowRepository: Send + Sync {
    /// Record that `follower` follows `author`.
    async fn follow(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<(), FollowRepositoryError>;

    /// Remove the relation. Returns `false` when it was absent.
    async fn unfollow(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, FollowRepositoryError>;

    /// Which of `authors` the follower follows, in one query.
    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<HashSet<UserId>, FollowRepositoryError>;

    /// Authors the follower follows, ordered by username.
    async fn followed_authors(
        &self,
        follower: &UserId,
        page: PageRequest,
    ) -> Result<Page<User>, FollowRepositoryError>;
}

/// Fixture implementation holding no relations.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureFollowRepository;

#[async_trait]
impl FollowRepository for FixtureFollowRepository {
    async fn follow(
        &self,
        _follower: &UserId,
        author: &UserId,
    ) -> Result<(), FollowRepositoryError> {
        Err(FollowRepositoryError::author_not_found(author.as_ref()))
    }

    async fn unfollow(
        &self,
        _follower: &UserId,
        _author: &UserId,
    ) -> Result<bool, FollowRepositoryError> {
        Ok(false)
    }

    async fn followed_among(
        &self,
        _follower: &UserId,
        _authors: &[UserId],
    ) -> Result<HashSet<UserId>, FollowRepositoryError> {
        Ok(HashSet::new())
    }

    async fn followed_authors(
        &self,
        _follower: &UserId,
        _page: PageRequest,
    ) -> Result<Page<User>, FollowRepositoryError> {
        Ok(Page::empty())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[tokio::test]
    async fn fixture_follows_nobody() {
        let repo = FixtureFollowRepository;
        let follower = UserId::random();
        let author = UserId::random();

        let followed = repo
            .followed_among(&follower, std::slice::from_ref(&author))
            .await
            .expect("fixture lookup");
        assert!(followed.is_empty());

        let err = repo
            .follow(&follower, &author)
            .await
            .expect_err("unknown author");
        assert_eq!(err, FollowRepositoryError::author_not_found(author.as_ref()));
    }
}
