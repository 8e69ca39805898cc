//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{Page, PageRequest, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// List users ordered by username.
    async fn list(&self, page: PageRequest) -> Result<Page<User>, UserPersistenceError>;
}

/// Fixture repository with no users.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn find_by_id(&self, _id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(None)
    }

    async fn list(&self, _page: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        Ok(Page::empty())
    }
}
