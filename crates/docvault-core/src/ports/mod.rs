//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod navigator;
mod session_store;
mod transport;

pub use navigator::{Navigator, Route};
pub use session_store::{SessionStore, StorageKey};
pub use transport::{
    ApiRequest, ApiResponse, FilePart, HttpTransport, Method, MultipartForm, RequestBody,
    TransportError,
};
