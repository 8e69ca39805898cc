//! PostgreSQL-backed follower to author relation.

use std::collections::HashSet;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{FollowRepository, FollowRepositoryError};
use crate::domain::{Page, PageRequest, User, UserId};

use super::diesel_helpers::{
    Violation, constraint_violation, count_to_total, limit_offset, map_basic_diesel_error,
    map_basic_pool_error,
};
use super::diesel_user_repository::rows_to_users;
use super::models::{NewFollowRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{follows, users};

/// Diesel-backed implementation of [`FollowRepository`].
#[derive(Clone)]
pub struct DieselFollowRepository {
    pool: DbPool,
}

impl DieselFollowRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FollowRepositoryError {
    map_basic_pool_error(error, FollowRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FollowRepositoryError {
    map_basic_diesel_error(
        error,
        FollowRepositoryError::query,
        FollowRepositoryError::connection,
    )
}

fn map_follow_insert_error(error: diesel::result::Error, author: &UserId) -> FollowRepositoryError {
    match constraint_violation(&error) {
        Some(Violation::Unique { .. }) => FollowRepositoryError::already_following(author.as_ref()),
        Some(violation @ Violation::ForeignKey { .. }) if violation.mentions("author_id") => {
            FollowRepositoryError::author_not_found(author.as_ref())
        }
        _ => map_diesel_error(error),
    }
}

#[async_trait]
impl FollowRepository for DieselFollowRepository {
    async fn follow(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<(), FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::insert_into(follows::table)
            .values(&NewFollowRow {
                follower_id: *follower.as_uuid(),
                author_id: *author.as_uuid(),
            })
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_follow_insert_error(err, author))
    }

    async fn unfollow(
        &self,
        follower: &UserId,
        author: &UserId,
    ) -> Result<bool, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let deleted = diesel::delete(
            follows::table
                .filter(follows::follower_id.eq(follower.as_uuid()))
                .filter(follows::author_id.eq(author.as_uuid())),
        )
        .execute(&mut conn)
        .await
        .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }

    async fn followed_among(
        &self,
        follower: &UserId,
        authors: &[UserId],
    ) -> Result<HashSet<UserId>, FollowRepositoryError> {
        if authors.is_empty() {
            return Ok(HashSet::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let author_ids: Vec<Uuid> = authors.iter().map(|id| *id.as_uuid()).collect();

        let followed: Vec<Uuid> = follows::table
            .filter(follows::follower_id.eq(follower.as_uuid()))
            .filter(follows::author_id.eq_any(&author_ids))
            .select(follows::author_id)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(followed.into_iter().map(UserId::from_uuid).collect())
    }

    async fn followed_authors(
        &self,
        follower: &UserId,
        page: PageRequest,
    ) -> Result<Page<User>, FollowRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = limit_offset(page);

        let total: i64 = follows::table
            .filter(follows::follower_id.eq(follower.as_uuid()))
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let followed = follows::table
            .filter(follows::follower_id.eq(follower.as_uuid()))
            .select(follows::author_id);
        let rows: Vec<UserRow> = users::table
            .filter(users::id.eq_any(followed))
            .select(UserRow::as_select())
            .order((users::username.asc(), users::id.asc()))
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Page {
            items: rows_to_users(rows).map_err(FollowRepositoryError::query)?,
            total: count_to_total(total),
        })
    }
}
