//! HTTP client core: endpoints, the persisted session, the request pipeline
//! and the typed API operations built on top of it.

mod api;
pub mod endpoints;
mod pipeline;
mod session;
mod stages;

pub use api::ApiClient;
pub use pipeline::{Outcome, PendingRequest, Pipeline, REQUEST_ID_HEADER, RequestStage, ResponseStage};
pub use session::SessionStorage;
pub use stages::{AUTHORIZATION_HEADER, BearerAuthStage, RefreshOnUnauthorizedStage, RequestIdStage};
