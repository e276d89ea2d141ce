//! Domain entities - the values exchanged with the document service.

mod auth;
mod category;
mod document;
mod user;

pub use auth::AuthResponse;
pub use category::{CategoryInfo, DocumentCategory, UnknownCategory};
pub use document::{CategoryCounts, Document, DocumentListItem, DocumentStats, FileUpload};
pub use user::User;
