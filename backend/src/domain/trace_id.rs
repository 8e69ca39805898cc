//! Correlation identifier for one API request.
//!
//! The `Trace` middleware puts a [`TraceId`] into task-local storage for the
//! duration of a handler. [`crate::domain::Error`] constructors read it from
//! there, so services never pass it around by hand. Work spawned onto other
//! tasks must be wrapped in [`TraceId::scope`] to keep the identifier.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

task_local! {
    static CURRENT: TraceId;
}

/// Header used both to accept an upstream identifier and to echo ours.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Per-request trace identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Adopt an upstream identifier when it parses as a UUID, otherwise
    /// generate a new one.
    ///
    /// ```
    /// use recipe_book::domain::TraceId;
    ///
    /// let upstream = "7d444840-9dc0-11d1-b245-5ffdce74fad2";
    /// assert_eq!(TraceId::inherit_or_generate(Some(upstream)).to_string(), upstream);
    /// assert_ne!(TraceId::inherit_or_generate(Some("not-a-uuid")).to_string(), "not-a-uuid");
    /// ```
    #[must_use]
    pub fn inherit_or_generate(upstream: Option<&str>) -> Self {
        upstream
            .and_then(|raw| raw.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Run `fut` with `trace_id` as the current identifier.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
