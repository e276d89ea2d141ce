//! Built-in pipeline stages: request correlation, bearer credentials and the
//! refresh-on-401 protocol.

use std::sync::Arc;

use async_trait::async_trait;
use docvault_shared::dto::{RefreshRequest, RefreshResponse};
use serde_json::json;
use uuid::Uuid;

use super::endpoints;
use super::pipeline::{Outcome, PendingRequest, Pipeline, REQUEST_ID_HEADER, RequestStage, ResponseStage};
use super::session::SessionStorage;
use crate::error::Failure;
use crate::ports::{ApiRequest, Navigator, Route};

pub const AUTHORIZATION_HEADER: &str = "authorization";

pub(crate) fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

/// Stamps an `X-Request-ID` on requests that do not carry one yet.
///
/// A resent request keeps its original ID, so a refresh-and-retry shows up
/// under a single ID in the server logs.
pub struct RequestIdStage;

#[async_trait]
impl RequestStage for RequestIdStage {
    fn name(&self) -> &'static str {
        "request_id"
    }

    async fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if request.header(REQUEST_ID_HEADER).is_none() {
            request.set_header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());
        }
        request
    }
}

/// Attaches the stored access token as a bearer credential.
///
/// Requests go out unauthenticated when no token is stored.
pub struct BearerAuthStage {
    storage: SessionStorage,
}

impl BearerAuthStage {
    pub fn new(storage: SessionStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl RequestStage for BearerAuthStage {
    fn name(&self) -> &'static str {
        "bearer_auth"
    }

    async fn apply(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(token) = self.storage.access_token().await {
            request.set_header(AUTHORIZATION_HEADER, bearer(&token));
        }
        request
    }
}

/// Recovers a 401 by refreshing the access token once and resending.
///
/// - an already retried request propagates its 401;
/// - without a stored refresh token the original 401 propagates and the
///   session is left alone;
/// - a failed refresh clears the whole session, sends the user to the login
///   route and propagates the refresh failure;
/// - otherwise the original request is resent once and its outcome returned.
pub struct RefreshOnUnauthorizedStage {
    storage: SessionStorage,
    navigator: Arc<dyn Navigator>,
}

impl RefreshOnUnauthorizedStage {
    pub fn new(storage: SessionStorage, navigator: Arc<dyn Navigator>) -> Self {
        Self { storage, navigator }
    }
}

#[async_trait]
impl ResponseStage for RefreshOnUnauthorizedStage {
    fn name(&self) -> &'static str {
        "refresh_on_unauthorized"
    }

    async fn apply(
        &self,
        pipeline: &Pipeline,
        pending: &mut PendingRequest,
        outcome: Outcome,
    ) -> Outcome {
        let unauthorized = match outcome {
            Err(failure) if failure.is_unauthorized() => failure,
            other => return other,
        };

        if pending.retried {
            return Err(unauthorized);
        }
        pending.retried = true;

        let Some(refresh_token) = self.storage.refresh_token().await else {
            tracing::debug!(path = %pending.request.path, "401 without refresh token");
            return Err(unauthorized);
        };

        if let Err(refresh_failure) = refresh_session(pipeline, &self.storage, &refresh_token).await
        {
            tracing::warn!(
                status = ?refresh_failure.status(),
                "Token refresh failed, ending session"
            );
            self.storage.expire().await;
            self.navigator.navigate(Route::Login);
            return Err(refresh_failure);
        }

        let Some(access_token) = self.storage.access_token().await else {
            return Err(unauthorized);
        };

        let mut retry = pending.clone();
        retry
            .request
            .set_header(AUTHORIZATION_HEADER, bearer(&access_token));

        tracing::debug!(path = %retry.request.path, "Resending request after token refresh");
        pipeline.dispatch(retry).await
    }
}

/// Exchange `refresh_token` for a new access token and persist it.
///
/// The refresh call itself is exempt from refresh handling, so a 401 here is
/// final. The new token is only stored when the response carries one and a
/// refresh token is still stored next to it.
pub(crate) async fn refresh_session(
    pipeline: &Pipeline,
    storage: &SessionStorage,
    refresh_token: &str,
) -> Result<(), Failure> {
    let body = RefreshRequest {
        refresh: refresh_token.to_string(),
    };
    let request = ApiRequest::post(endpoints::TOKEN_REFRESH).with_json(json!(body));

    let response = pipeline
        .dispatch(PendingRequest::without_refresh(request))
        .await?;

    let access = response
        .json::<RefreshResponse>()
        .unwrap_or_default()
        .access
        .filter(|token| !token.is_empty());

    match (access, storage.refresh_token().await) {
        (Some(access), Some(_)) => {
            storage.set_access_token(&access).await;
            tracing::info!("Access token refreshed");
        }
        _ => tracing::debug!("Refresh response carried no usable access token"),
    }

    Ok(())
}
