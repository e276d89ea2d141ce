//! Paths of the document API, relative to the configured base URL.

pub const LOGIN: &str = "/auth/login/";
pub const REGISTER: &str = "/auth/register/";
pub const PROFILE: &str = "/auth/profile/";
pub const TOKEN_REFRESH: &str = "/auth/token/refresh/";

pub const DOCUMENTS: &str = "/documents/";
pub const DOCUMENTS_UPLOAD: &str = "/documents/upload/";
pub const DOCUMENTS_STATS: &str = "/documents/stats/";
pub const DOCUMENTS_DOWNLOAD_ZIP: &str = "/documents/download-zip/";

/// `/documents/{id}/`
pub fn document(id: u64) -> String {
    format!("{DOCUMENTS}{id}/")
}
