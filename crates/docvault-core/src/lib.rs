//! # DocVault Core
//!
//! Client-side core of DocVault: the session lifecycle, the request pipeline
//! with transparent token refresh, and the state machines behind the
//! authentication and document screens.
//!
//! Infrastructure (HTTP, persistence, navigation) is reached only through the
//! traits in [`ports`].

pub mod client;
pub mod domain;
pub mod error;
pub mod hooks;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::ApiClient;
pub use error::{ApiError, ApiErrorKind, Failure};
