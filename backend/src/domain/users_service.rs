//! User profiles and subscriptions service.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use super::recipes_service::{map_recipe_error, map_user_error};
use crate::domain::ports::{
    FollowRepository, FollowRepositoryError, RecipeRepository, SubscriptionsCommand,
    SubscriptionsQuery, UserRepository, UsersQuery,
};
use crate::domain::{
    DEFAULT_SUBSCRIPTION_RECIPES, Error, Page, PageRequest, Subscription, User, UserId,
    UserProfile,
};

/// Implements [`UsersQuery`], [`SubscriptionsCommand`] and
/// [`SubscriptionsQuery`].
#[derive(Clone)]
pub struct UsersService<U, F, R> {
    user_repo: Arc<U>,
    follow_repo: Arc<F>,
    recipe_repo: Arc<R>,
}

impl<U, F, R> UsersService<U, F, R> {
    /// Create a new service with the given repositories.
    pub fn new(user_repo: Arc<U>, follow_repo: Arc<F>, recipe_repo: Arc<R>) -> Self {
        Self {
            user_repo,
            follow_repo,
            recipe_repo,
        }
    }
}

fn map_follow_error(error: FollowRepositoryError) -> Error {
    match error {
        FollowRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("follow repository unavailable: {message}"))
        }
        FollowRepositoryError::Query { message } => {
            Error::internal(format!("follow repository error: {message}"))
        }
        FollowRepositoryError::AlreadyFollowing { author_id } => {
            Error::invalid_request("already subscribed to this user").with_details(json!({
                "authorId": author_id,
                "code": "already_subscribed",
            }))
        }
        FollowRepositoryError::AuthorNotFound { author_id } => user_not_found(&author_id),
    }
}

fn user_not_found(user_id: &str) -> Error {
    Error::not_found(format!("user {user_id} not found"))
}

impl<U, F, R> UsersService<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    async fn require_user(&self, user_id: &UserId) -> Result<User, Error> {
        self.user_repo
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(user_id.as_ref()))
    }

    async fn followed_among(&self, viewer: Option<&UserId>, users: &[User]) -> HashSet<UserId> {
        let Some(viewer) = viewer else {
            return HashSet::new();
        };
        let ids: Vec<UserId> = users.iter().map(|user| user.id().clone()).collect();
        if ids.is_empty() {
            return HashSet::new();
        }
        match self.follow_repo.followed_among(viewer, &ids).await {
            Ok(followed) => followed,
            Err(error) => {
                warn!(%error, viewer = %viewer, "subscription lookup failed; flags cleared");
                HashSet::new()
            }
        }
    }

    /// Attach recipe previews to `authors` with one repository call.
    async fn subscriptions_for(
        &self,
        authors: Vec<User>,
        recipes_limit: Option<u32>,
    ) -> Result<Vec<Subscription>, Error> {
        if authors.is_empty() {
            return Ok(Vec::new());
        }
        let per_author = PageRequest::new(
            Some(recipes_limit.unwrap_or(DEFAULT_SUBSCRIPTION_RECIPES)),
            None,
        )
        .limit();
        let ids: Vec<UserId> = authors.iter().map(|author| author.id().clone()).collect();
        let mut previews = self
            .recipe_repo
            .latest_by_authors(&ids, per_author)
            .await
            .map_err(map_recipe_error)?;
        Ok(authors
            .into_iter()
            .map(|author| {
                let page = previews.remove(author.id()).unwrap_or_else(Page::empty);
                Subscription {
                    author,
                    recipes: page.items,
                    recipes_count: page.total,
                }
            })
            .collect())
    }
}

#[async_trait]
impl<U, F, R> UsersQuery for UsersService<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    async fn list_users(
        &self,
        viewer: Option<UserId>,
        page: PageRequest,
    ) -> Result<Page<UserProfile>, Error> {
        let users = self.user_repo.list(page).await.map_err(map_user_error)?;
        let followed = self.followed_among(viewer.as_ref(), &users.items).await;
        Ok(users.map(|user| UserProfile {
            is_subscribed: followed.contains(user.id()),
            user,
        }))
    }

    async fn get_user(
        &self,
        viewer: Option<UserId>,
        user_id: UserId,
    ) -> Result<UserProfile, Error> {
        let user = self.require_user(&user_id).await?;
        let followed = self
            .followed_among(viewer.as_ref(), std::slice::from_ref(&user))
            .await;
        Ok(UserProfile {
            is_subscribed: followed.contains(user.id()),
            user,
        })
    }

    async fn current_user(&self, viewer: UserId) -> Result<UserProfile, Error> {
        let user = self
            .user_repo
            .find_by_id(&viewer)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized(format!("user {viewer} is not known")))?;
        Ok(UserProfile {
            user,
            is_subscribed: false,
        })
    }
}

#[async_trait]
impl<U, F, R> SubscriptionsCommand for UsersService<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    async fn subscribe(
        &self,
        follower: UserId,
        author: UserId,
        recipes_limit: Option<u32>,
    ) -> Result<Subscription, Error> {
        if follower == author {
            return Err(
                Error::invalid_request("cannot subscribe to yourself").with_details(json!({
                    "authorId": author,
                    "code": "self_subscription",
                })),
            );
        }
        let author_user = self.require_user(&author).await?;
        self.follow_repo
            .follow(&follower, &author)
            .await
            .map_err(map_follow_error)?;
        self.subscriptions_for(vec![author_user], recipes_limit)
            .await?
            .pop()
            .ok_or_else(|| Error::internal("subscription preview missing"))
    }

    async fn unsubscribe(&self, follower: UserId, author: UserId) -> Result<(), Error> {
        let removed = self
            .follow_repo
            .unfollow(&follower, &author)
            .await
            .map_err(map_follow_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::not_found(format!("not subscribed to {author}")))
        }
    }
}

#[async_trait]
impl<U, F, R> SubscriptionsQuery for UsersService<U, F, R>
where
    U: UserRepository,
    F: FollowRepository,
    R: RecipeRepository,
{
    async fn list_subscriptions(
        &self,
        follower: UserId,
        page: PageRequest,
        recipes_limit: Option<u32>,
    ) -> Result<Page<Subscription>, Error> {
        let authors = self
            .follow_repo
            .followed_authors(&follower, page)
            .await
            .map_err(map_follow_error)?;
        Ok(Page {
            items: self.subscriptions_for(authors.items, recipes_limit).await?,
            total: authors.total,
        })
    }
}

#[cfg(test)]
#[path = "users_service_tests.rs"]
mod tests;
