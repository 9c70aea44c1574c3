//! Request-scoped trace identifiers.
//!
//! The HTTP middleware generates one [`TraceId`] per request and runs the
//! handler inside [`TraceId::scope`]. Anything executing within that scope can
//! read the identifier through [`TraceId::current`], which is how domain
//! errors pick up their correlation id without handlers threading it through.
//!
//! Task-local values do not follow `tokio::spawn`; wrap spawned work in
//! [`TraceId::scope`] to keep the correlation.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request correlation identifier.
///
/// # Examples
/// ```
/// use catalog::domain::TraceId;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let id = TraceId::generate();
/// let seen = TraceId::scope(id, async { TraceId::current() }).await;
/// assert_eq!(seen, Some(id));
/// # });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Identifier of the request currently in scope, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` in scope.
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }

    /// Underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn current_is_none_outside_a_scope() {
        assert!(TraceId::current().is_none());
    }

    #[tokio::test]
    async fn nested_scopes_shadow_the_outer_id() {
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let (seen_outer, seen_inner) = TraceId::scope(outer, async move {
            let seen_inner = TraceId::scope(inner, async { TraceId::current() }).await;
            (TraceId::current(), seen_inner)
        })
        .await;
        assert_eq!(seen_outer, Some(outer));
        assert_eq!(seen_inner, Some(inner));
    }

    #[test]
    fn parses_its_own_display_output() {
        let id = TraceId::generate();
        let parsed: TraceId = id.to_string().parse().expect("valid uuid");
        assert_eq!(parsed, id);
    }

    #[test]
    fn rejects_non_uuid_text() {
        assert!("not-a-trace".parse::<TraceId>().is_err());
    }
}
