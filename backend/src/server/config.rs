//! Runtime configuration handed to [`super::create_server`].

use std::net::SocketAddr;

use recipe_book::inbound::http::session_config::SessionSettings;
use recipe_book::outbound::persistence::DbPool;

/// Resolved session, socket and persistence settings.
pub struct ServerConfig {
    pub(crate) session: SessionSettings,
    pub(crate) bind_addr: SocketAddr,
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Serve fixture data on `bind_addr`.
    #[must_use]
    pub fn new(session: SessionSettings, bind_addr: SocketAddr) -> Self {
        Self {
            session,
            bind_addr,
            db_pool: None,
        }
    }

    /// Serve PostgreSQL-backed data through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }

    /// Name of the persistence backend, for startup logs.
    pub(crate) fn persistence(&self) -> &'static str {
        if self.db_pool.is_some() {
            "postgres"
        } else {
            "fixtures"
        }
    }
}
