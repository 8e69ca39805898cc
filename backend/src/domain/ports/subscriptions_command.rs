//! Driving port for following and unfollowing authors.

use async_trait::async_trait;

use crate::domain::{Error, Subscription, UserId};

/// Write-side follow use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsCommand: Send + Sync {
    /// Follow `author`.
    ///
    /// Following yourself or an author you already follow is
    /// `invalid_request`; an unknown author is `not_found`. The returned
    /// subscription embeds at most `recipes_limit` recipes.
    async fn subscribe(
        &self,
        follower: UserId,
        author: UserId,
        recipes_limit: Option<u32>,
    ) -> Result<Subscription, Error>;

    /// Stop following `author`; an absent relation is `not_found`.
    async fn unsubscribe(&self, follower: UserId, author: UserId) -> Result<(), Error>;
}

/// Fixture command used when no storage is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionsCommand;

#[async_trait]
impl SubscriptionsCommand for FixtureSubscriptionsCommand {
    async fn subscribe(
        &self,
        _follower: UserId,
        author: UserId,
        _recipes_limit: Option<u32>,
    ) -> Result<Subscription, Error> {
        Err(Error::not_found(format!("user {author} not found")))
    }

    async fn unsubscribe(&self, _follower: UserId, author: UserId) -> Result<(), Error> {
        Err(Error::not_found(format!("not subscribed to {author}")))
    }
}
