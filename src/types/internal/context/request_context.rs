use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;

use crate::errors::InternalError;

use super::{request_id::RequestId, request_source::RequestSource};

/// Request context that flows through all layers
///
/// Carried from the API through the item service into the repository. The
/// deadline is opaque to the service: only repositories act on it, by
/// bounding their I/O with [`RequestContext::within_deadline`].
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    /// Unique identifier for this request (for tracing across layers)
    pub request_id: RequestId,

    /// Source of the request (API or System)
    pub source: RequestSource,

    /// Point in time after which persistence calls give up
    pub deadline: Option<Instant>,
}

impl RequestContext {
    /// Create a context with no deadline
    pub fn new() -> Self {
        Self {
            request_id: RequestId::new(),
            source: RequestSource::System,
            deadline: None,
        }
    }

    /// Create a RequestContext for an API request
    ///
    /// # Arguments
    /// * `timeout` - Budget for the whole request; `None` means unbounded
    pub fn for_api(timeout: Option<Duration>) -> Self {
        let ctx = Self {
            source: RequestSource::API,
            ..Self::new()
        };
        match timeout {
            Some(timeout) => ctx.with_timeout(timeout),
            None => ctx,
        }
    }

    /// Create a RequestContext for system operations
    pub fn for_system(operation_name: &str) -> Self {
        let ctx = Self::new();
        tracing::debug!(request_id = %ctx.request_id, "System context for {}", operation_name);
        ctx
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Run a persistence future, failing with a timeout if the deadline passes first
    pub async fn within_deadline<F, T>(&self, operation: &str, fut: F) -> Result<T, InternalError>
    where
        F: Future<Output = Result<T, InternalError>>,
    {
        match self.deadline {
            Some(deadline) => tokio::time::timeout_at(deadline, fut)
                .await
                .map_err(|_| {
                    tracing::warn!(request_id = %self.request_id, "{} exceeded request deadline", operation);
                    InternalError::timeout(operation)
                })?,
            None => fut.await,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    #[test]
    fn test_new_context_has_no_deadline() {
        let ctx = RequestContext::new();

        assert!(ctx.deadline.is_none());
        assert_eq!(ctx.source, RequestSource::System);
    }

    #[tokio::test]
    async fn test_for_api_sets_deadline_from_timeout() {
        let ctx = RequestContext::for_api(Some(Duration::from_secs(5)));

        assert_eq!(ctx.source, RequestSource::API);
        assert!(ctx.deadline.is_some());
        assert!(RequestContext::for_api(None).deadline.is_none());
    }

    #[test]
    fn test_each_context_gets_a_fresh_request_id() {
        assert_ne!(RequestContext::new().request_id, RequestContext::new().request_id);
    }

    #[tokio::test]
    async fn test_within_deadline_passes_result_through() {
        let ctx = RequestContext::new().with_timeout(Duration::from_secs(5));

        let value = ctx.within_deadline("noop", async { Ok::<_, InternalError>(7) }).await;

        assert_eq!(value.unwrap(), 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_within_deadline_times_out() {
        let ctx = RequestContext::new().with_timeout(Duration::from_millis(10));

        let result = ctx
            .within_deadline("slow_query", async {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok::<_, InternalError>(())
            })
            .await;

        let err = result.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Database);
        assert!(err.to_string().contains("slow_query"));
    }
}
