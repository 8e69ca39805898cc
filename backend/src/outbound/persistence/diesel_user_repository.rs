//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Page, PageRequest, User, UserDraft, UserId};

use super::diesel_helpers::{
    count_to_total, limit_offset, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::UserRow;
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Convert a database row into a validated [`User`].
pub(super) fn row_to_user(row: UserRow) -> Result<User, String> {
    User::new(UserDraft {
        id: UserId::from_uuid(row.id),
        email: row.email,
        username: row.username,
        first_name: row.first_name,
        last_name: row.last_name,
        is_admin: row.is_admin,
    })
    .map_err(|err| format!("invalid user row {}: {err}", row.id))
}

pub(super) fn rows_to_users(rows: Vec<UserRow>) -> Result<Vec<User>, String> {
    rows.into_iter().map(row_to_user).collect()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user)
            .transpose()
            .map_err(UserPersistenceError::query)
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (limit, offset) = limit_offset(page);

        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<UserRow> = users::table
            .select(UserRow::as_select())
            .order((users::username.asc(), users::id.asc()))
            .limit(limit)
            .offset(offset)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Page {
            items: rows_to_users(rows).map_err(UserPersistenceError::query)?,
            total: count_to_total(total),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    fn row(username: &str) -> UserRow {
        UserRow {
            id: Uuid::new_v4(),
            email: format!("{username}@example.com"),
            username: username.to_owned(),
            first_name: "Ada".into(),
            last_name: "Byron".into(),
            is_admin: false,
        }
    }

    #[rstest]
    fn row_keeps_identifier_and_role() {
        let source = UserRow {
            is_admin: true,
            ..row("chef")
        };
        let id = source.id;
        let user = row_to_user(source).expect("valid row");
        assert_eq!(user.id().as_uuid(), &id);
        assert!(user.is_admin());
    }

    #[rstest]
    fn blank_username_row_is_rejected() {
        let err = rows_to_users(vec![row("chef"), row(" ")]).expect_err("blank username");
        assert!(err.starts_with("invalid user row"));
    }
}
