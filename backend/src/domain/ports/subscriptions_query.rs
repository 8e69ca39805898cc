//! Driving port for listing followed authors.

use async_trait::async_trait;

use crate::domain::{Error, Page, PageRequest, Subscription, UserId};

/// Read-side follow use cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionsQuery: Send + Sync {
    /// Authors `follower` follows, each with up to `recipes_limit` recipes.
    async fn list_subscriptions(
        &self,
        follower: UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<Page<Subscription>, Error>;
}

/// Fixture query with no subscriptions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSubscriptionsQuery;

#[async_trait]
impl SubscriptionsQuery for FixtureSubscriptionsQuery {
    async fn list_subscriptions(
        &self,
        _follower: UserId,
        _page: PageRequest,
        _recipes_limit: Option<u32>,
    ) -> Result<Page<Subscription>, Error> {
        Ok(Page::empty())
    }
}
