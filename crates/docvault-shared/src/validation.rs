//! Client-side input validation run before anything is sent to the server.

use thiserror::Error;

use crate::messages::error as msg;

/// Largest accepted upload, in bytes (10 MiB).
pub const MAX_UPLOAD_SIZE: u64 = 10 * 1024 * 1024;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// MIME types the document service classifies.
pub const ACCEPTED_MIME_TYPES: [&str; 3] = [PDF_MIME, DOCX_MIME, PPTX_MIME];

/// File extensions matching [`ACCEPTED_MIME_TYPES`], in the same order.
pub const ACCEPTED_EXTENSIONS: [&str; 3] = [".pdf", ".docx", ".pptx"];

pub const PASSWORD_MIN_LEN: usize = 8;

/// Reason a password is rejected. Rules are checked in declaration order and
/// the first failing one is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Le mot de passe doit contenir au moins 8 caractères.")]
    TooShort,

    #[error("Le mot de passe doit contenir au moins une lettre minuscule.")]
    MissingLowercase,

    #[error("Le mot de passe doit contenir au moins une lettre majuscule.")]
    MissingUppercase,

    #[error("Le mot de passe doit contenir au moins un chiffre.")]
    MissingDigit,
}

/// Reason a file is rejected for upload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileError {
    #[error("{name}: {}", msg::FILE_TOO_LARGE)]
    TooLarge { name: String },

    #[error("{name}: {}", msg::FILE_TYPE_NOT_SUPPORTED)]
    UnsupportedType { name: String },
}

/// Metadata of a file about to be uploaded.
#[derive(Debug, Clone, Copy)]
pub struct FileCandidate<'a> {
    pub name: &'a str,
    pub size: u64,
    pub content_type: &'a str,
}

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn validate_password(password: &str) -> Result<(), PasswordError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(PasswordError::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PasswordError::MissingLowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PasswordError::MissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PasswordError::MissingDigit);
    }
    Ok(())
}

pub fn validate_file(file: &FileCandidate<'_>) -> Result<(), FileError> {
    if file.size > MAX_UPLOAD_SIZE {
        return Err(FileError::TooLarge {
            name: file.name.to_string(),
        });
    }
    if !ACCEPTED_MIME_TYPES.contains(&file.content_type) {
        return Err(FileError::UnsupportedType {
            name: file.name.to_string(),
        });
    }
    Ok(())
}

/// MIME type for an accepted extension (case-insensitive), `None` otherwise.
pub fn mime_for_file_name(file_name: &str) -> Option<&'static str> {
    let lower = file_name.to_ascii_lowercase();
    ACCEPTED_EXTENSIONS
        .iter()
        .zip(ACCEPTED_MIME_TYPES)
        .find(|(ext, _)| lower.ends_with(**ext))
        .map(|(_, mime)| mime)
}
