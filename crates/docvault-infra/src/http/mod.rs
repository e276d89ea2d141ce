//! HTTP transport implementations.

mod reqwest_transport;

pub use reqwest_transport::{DEFAULT_API_URL, HttpConfig, ReqwestTransport};
