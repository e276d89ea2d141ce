use std::path::Path;

use chrono::{DateTime, Utc};
use docvault_shared::validation::{FileCandidate, mime_for_file_name};
use serde::{Deserialize, Serialize};

use super::DocumentCategory;

/// Full document record (`GET /documents/{id}/`, upload response).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub title: String,
    /// URL of the stored file.
    pub file: String,
    pub file_name: String,
    pub category: DocumentCategory,
    #[serde(default)]
    pub content_preview: String,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub file_type: String,
    pub file_size: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Summary row of `GET /documents/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentListItem {
    pub id: u64,
    pub title: String,
    pub file_name: String,
    pub category: DocumentCategory,
    pub file_type: String,
    pub file_size: u64,
    pub created_at: DateTime<Utc>,
}

/// Response of `GET /documents/stats/`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub total_documents: u64,
    pub categories: CategoryCounts,
}

/// One counter per [`DocumentCategory`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub math: u64,
    pub algo: u64,
    pub histoire: u64,
    pub autres: u64,
}

impl CategoryCounts {
    pub fn get(&self, category: DocumentCategory) -> u64 {
        match category {
            DocumentCategory::Math => self.math,
            DocumentCategory::Algo => self.algo,
            DocumentCategory::Histoire => self.histoire,
            DocumentCategory::Autres => self.autres,
        }
    }
}

/// File content to send as the `file` part of an upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Build an upload whose MIME type is derived from the file extension.
    /// Unknown extensions get `application/octet-stream`, which the server rejects.
    pub fn from_file_name(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let content_type = mime_for_file_name(&file_name).unwrap_or("application/octet-stream");
        Self::new(file_name, content_type, bytes)
    }

    /// Read a file from disk, deriving the MIME type from its extension.
    pub async fn from_path(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::from_file_name(file_name, bytes))
    }

    /// Title used when the caller gives none: the file name up to its first `.`.
    pub fn default_title(&self) -> &str {
        self.file_name
            .split('.')
            .next()
            .unwrap_or(&self.file_name)
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// View for client-side validation.
    pub fn candidate(&self) -> FileCandidate<'_> {
        FileCandidate {
            name: &self.file_name,
            size: self.size(),
            content_type: &self.content_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docvault_shared::validation::{PDF_MIME, validate_file};

    #[test]
    fn test_stats_deserialize_all_categories() {
        let json = r#"{"total_documents":6,"categories":{"math":1,"algo":2,"histoire":0,"autres":3}}"#;
        let stats: DocumentStats = serde_json::from_str(json).unwrap();

        assert_eq!(stats.total_documents, 6);
        assert_eq!(stats.categories.get(DocumentCategory::Algo), 2);
        assert_eq!(stats.categories.get(DocumentCategory::Autres), 3);
    }

    #[test]
    fn test_default_title_strips_extension() {
        let upload = FileUpload::from_file_name("chapitre.1.pdf", vec![1, 2, 3]);
        assert_eq!(upload.default_title(), "chapitre");
        assert_eq!(upload.content_type, PDF_MIME);
        assert!(validate_file(&upload.candidate()).is_ok());
    }

    #[tokio::test]
    async fn test_from_path_reads_bytes_and_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Slides.pptx");
        tokio::fs::write(&path, b"deck").await.unwrap();

        let upload = FileUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.file_name, "Slides.pptx");
        assert_eq!(upload.size(), 4);
        assert_eq!(upload.default_title(), "Slides");
    }

    #[test]
    fn test_unknown_extension_fails_validation() {
        let upload = FileUpload::from_file_name("photo.png", vec![0; 4]);
        assert!(validate_file(&upload.candidate()).is_err());
    }
}
