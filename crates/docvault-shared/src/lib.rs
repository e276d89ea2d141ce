//! # DocVault Shared
//!
//! Types and helpers with no I/O that every layer of the client uses:
//! request bodies, the server error payload, the message catalogue,
//! display formatters and client-side input validation.

pub mod dto;
pub mod format;
pub mod messages;
pub mod response;
pub mod validation;

pub use response::ErrorPayload;
