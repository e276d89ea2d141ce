//! Request pipeline - ordered request and response stages around a transport.
//!
//! Every call goes through the same sequence:
//!
//! 1. request stages, in order, each returning the (possibly modified) request;
//! 2. the transport; a non-2xx status becomes [`Failure::Status`];
//! 3. response stages, in order, each mapping the outcome.
//!
//! Response stages receive the pipeline itself so they can issue further
//! calls (a token refresh) or resend the original request.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::BoxFuture;

use crate::error::Failure;
use crate::ports::{ApiRequest, ApiResponse, HttpTransport};

/// Result of one pass through the pipeline.
pub type Outcome = Result<ApiResponse, Failure>;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A request in flight together with its retry marker.
///
/// Once `retried` is set the request is never refreshed-and-resent again.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub request: ApiRequest,
    pub retried: bool,
}

impl PendingRequest {
    pub fn new(request: ApiRequest) -> Self {
        Self {
            request,
            retried: false,
        }
    }

    /// A request that must not trigger a refresh on 401.
    pub fn without_refresh(request: ApiRequest) -> Self {
        Self {
            request,
            retried: true,
        }
    }
}

/// Transform applied to every outbound request.
#[async_trait]
pub trait RequestStage: Send + Sync {
    fn name(&self) -> &'static str;

    async fn apply(&self, request: ApiRequest) -> ApiRequest;
}

/// Transform applied to every outcome.
#[async_trait]
pub trait ResponseStage: Send + Sync {
    fn name(&self) -> &'static str;

    async fn apply(
        &self,
        pipeline: &Pipeline,
        pending: &mut PendingRequest,
        outcome: Outcome,
    ) -> Outcome;
}

/// Transport plus its ordered stages.
pub struct Pipeline {
    transport: Arc<dyn HttpTransport>,
    request_stages: Vec<Arc<dyn RequestStage>>,
    response_stages: Vec<Arc<dyn ResponseStage>>,
}

impl Pipeline {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            request_stages: Vec::new(),
            response_stages: Vec::new(),
        }
    }

    pub fn with_request_stage(mut self, stage: impl RequestStage + 'static) -> Self {
        self.request_stages.push(Arc::new(stage));
        self
    }

    pub fn with_response_stage(mut self, stage: impl ResponseStage + 'static) -> Self {
        self.response_stages.push(Arc::new(stage));
        self
    }

    /// Stage names in execution order, request stages first.
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.request_stages
            .iter()
            .map(|s| s.name())
            .chain(self.response_stages.iter().map(|s| s.name()))
            .collect()
    }

    /// Send a fresh request.
    pub async fn send(&self, request: ApiRequest) -> Outcome {
        self.dispatch(PendingRequest::new(request)).await
    }

    /// Run a pending request through every stage.
    ///
    /// Boxed because response stages may re-enter the pipeline.
    pub fn dispatch(&self, mut pending: PendingRequest) -> BoxFuture<'_, Outcome> {
        Box::pin(async move {
            let mut request = pending.request.clone();
            for stage in &self.request_stages {
                request = stage.apply(request).await;
            }
            pending.request = request.clone();

            tracing::debug!(
                method = %request.method,
                path = %request.path,
                request_id = request.header(REQUEST_ID_HEADER).unwrap_or("-"),
                retried = pending.retried,
                "Dispatching request"
            );

            let mut outcome = match self.transport.send(request).await {
                Ok(response) if response.is_success() => Ok(response),
                Ok(response) => Err(Failure::Status(response)),
                Err(e) => Err(Failure::Network(e)),
            };

            if let Err(failure) = &outcome {
                tracing::debug!(
                    path = %pending.request.path,
                    status = ?failure.status(),
                    "Request failed"
                );
            }

            for stage in &self.response_stages {
                outcome = stage.apply(self, &mut pending, outcome).await;
            }

            outcome
        })
    }
}
