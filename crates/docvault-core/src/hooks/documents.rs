//! Document list, statistics and upload progress of the signed-in user.

use std::sync::Arc;

use tokio::sync::watch;

use crate::client::ApiClient;
use crate::domain::{Document, DocumentCategory, DocumentListItem, DocumentStats, FileUpload};
use crate::error::ApiError;

/// Published state of the document list.
///
/// Starts out loading: the first [`DocumentLibrary::load`] settles it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentsState {
    pub documents: Vec<DocumentListItem>,
    pub stats: Option<DocumentStats>,
    pub is_loading: bool,
    /// Message of the last failed list load.
    pub error: Option<String>,
}

impl Default for DocumentsState {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            stats: None,
            is_loading: true,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadProgress {
    pub is_uploading: bool,
    pub file_name: Option<String>,
}

impl UploadProgress {
    fn started(file_name: &str) -> Self {
        Self {
            is_uploading: true,
            file_name: Some(file_name.to_string()),
        }
    }
}

pub struct DocumentLibrary {
    client: Arc<ApiClient>,
    state: watch::Sender<DocumentsState>,
    progress: watch::Sender<UploadProgress>,
}

impl DocumentLibrary {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (state, _) = watch::channel(DocumentsState::default());
        let (progress, _) = watch::channel(UploadProgress::default());
        Self {
            client,
            state,
            progress,
        }
    }

    pub fn state(&self) -> DocumentsState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DocumentsState> {
        self.state.subscribe()
    }

    pub fn upload_progress(&self) -> UploadProgress {
        self.progress.borrow().clone()
    }

    pub fn subscribe_upload_progress(&self) -> watch::Receiver<UploadProgress> {
        self.progress.subscribe()
    }

    /// Initial load: the unfiltered list, then the statistics.
    pub async fn load(&self) {
        self.load_documents(None).await;
        self.load_stats().await;
    }

    /// Reload the list. A failure is kept in [`DocumentsState::error`].
    pub async fn load_documents(&self, category: Option<DocumentCategory>) {
        self.state.send_modify(|state| {
            state.is_loading = true;
            state.error = None;
        });

        let result = self.client.get_documents(category).await;

        self.state.send_modify(|state| {
            state.is_loading = false;
            match result {
                Ok(documents) => state.documents = documents,
                Err(e) => state.error = Some(e.message),
            }
        });
    }

    /// Reload the statistics. Failures are logged only.
    pub async fn load_stats(&self) {
        match self.client.get_document_stats().await {
            Ok(stats) => self.state.send_modify(|state| state.stats = Some(stats)),
            Err(e) => tracing::error!(error = %e, "Failed to load document statistics"),
        }
    }

    async fn reload(&self) {
        futures::join!(self.load_documents(None), self.load_stats());
    }

    /// Upload a file and refresh the list and statistics before returning.
    ///
    /// Without a title the file name up to its first `.` is used.
    pub async fn upload_document(
        &self,
        file: FileUpload,
        title: Option<String>,
    ) -> Result<Document, ApiError> {
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| file.default_title().to_string());

        self.progress
            .send_replace(UploadProgress::started(&file.file_name));

        let result = match self.client.upload_document(&title, &file).await {
            Ok(document) => {
                self.reload().await;
                Ok(document)
            }
            Err(e) => Err(e),
        };

        self.progress.send_replace(UploadProgress::default());
        result
    }

    pub async fn delete_document(&self, id: u64) -> Result<(), ApiError> {
        self.client.delete_document(id).await?;
        self.reload().await;
        Ok(())
    }

    pub async fn download_zip(&self) -> Result<Vec<u8>, ApiError> {
        self.client.download_documents_zip().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::endpoints;
    use crate::ports::{ApiResponse, Method, RequestBody};
    use crate::test_support::{
        MemoryStore, RecordingNavigator, ScriptedTransport, document_json, list_item_json,
        stats_json,
    };
    use docvault_shared::messages::error as msg;
    use serde_json::json;

    fn library() -> (Arc<ScriptedTransport>, DocumentLibrary) {
        let transport = Arc::new(ScriptedTransport::new());
        let client = Arc::new(ApiClient::new(
            transport.clone(),
            Arc::new(MemoryStore::default()),
            Arc::new(RecordingNavigator::default()),
        ));
        (transport, DocumentLibrary::new(client))
    }

    fn list(ids: &[u64]) -> ApiResponse {
        let items: Vec<_> = ids
            .iter()
            .map(|id| list_item_json(*id, DocumentCategory::Math))
            .collect();
        ApiResponse::json_body(200, &json!(items))
    }

    #[tokio::test]
    async fn test_load_fills_list_and_stats() {
        let (transport, library) = library();
        assert!(library.state().is_loading);
        transport.route(Method::Get, endpoints::DOCUMENTS, list(&[1, 2]));
        transport.route(
            Method::Get,
            endpoints::DOCUMENTS_STATS,
            ApiResponse::json_body(200, &stats_json(2)),
        );

        library.load().await;

        let state = library.state();
        assert!(!state.is_loading);
        assert_eq!(state.documents.len(), 2);
        assert_eq!(state.stats.map(|s| s.total_documents), Some(2));
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_list_failure_sets_error_and_stats_failure_is_ignored() {
        let (transport, library) = library();
        transport.route(Method::Get, endpoints::DOCUMENTS, ApiResponse::new(500, ""));
        transport.route(
            Method::Get,
            endpoints::DOCUMENTS_STATS,
            ApiResponse::new(503, ""),
        );

        library.load().await;

        let state = library.state();
        assert!(!state.is_loading);
        assert_eq!(state.error.as_deref(), Some(msg::SERVER_ERROR));
        assert!(state.stats.is_none());
    }

    #[tokio::test]
    async fn test_successful_reload_clears_previous_error() {
        let (transport, library) = library();
        transport.push_response(ApiResponse::new(403, ""));
        transport.push_response(list(&[7]));

        library.load_documents(None).await;
        assert_eq!(library.state().error.as_deref(), Some(msg::FORBIDDEN));

        library.load_documents(Some(DocumentCategory::Math)).await;
        let state = library.state();
        assert!(state.error.is_none());
        assert_eq!(state.documents[0].id, 7);
    }

    #[tokio::test]
    async fn test_upload_defaults_title_and_reloads() {
        let (transport, library) = library();
        transport.route(
            Method::Post,
            endpoints::DOCUMENTS_UPLOAD,
            ApiResponse::json_body(201, &document_json(3, "algebre")),
        );
        transport.route(Method::Get, endpoints::DOCUMENTS, list(&[1, 2, 3]));
        transport.route(
            Method::Get,
            endpoints::DOCUMENTS_STATS,
            ApiResponse::json_body(200, &stats_json(3)),
        );

        let mut progress = library.subscribe_upload_progress();
        let upload = FileUpload::from_file_name("algebre.lineaire.pdf", b"%PDF".to_vec());
        let document = library.upload_document(upload, None).await.unwrap();

        assert_eq!(document.id, 3);
        assert!(progress.has_changed().unwrap());
        assert_eq!(*progress.borrow_and_update(), UploadProgress::default());

        let sent = transport.requests();
        match &sent[0].body {
            RequestBody::Multipart(form) => {
                assert_eq!(form.fields[0], ("title".to_string(), "algebre".to_string()));
            }
            other => panic!("expected multipart body, got {other:?}"),
        }
        assert_eq!(transport.count_path(endpoints::DOCUMENTS), 1);
        assert_eq!(transport.count_path(endpoints::DOCUMENTS_STATS), 1);

        let state = library.state();
        assert_eq!(state.documents.len(), 3);
        assert_eq!(state.stats.map(|s| s.total_documents), Some(3));
    }

    #[tokio::test]
    async fn test_failed_upload_resets_progress_and_skips_reload() {
        let (transport, library) = library();
        transport.push_response(ApiResponse::json_body(
            400,
            &json!({"file": ["Type de fichier non supporté"]}),
        ));

        let upload = FileUpload::from_file_name("notes.pdf", b"%PDF".to_vec());
        let err = library
            .upload_document(upload, Some("Notes".to_string()))
            .await
            .unwrap_err();

        assert_eq!(err.status, Some(400));
        assert!(err.fields.contains_key("file"));
        assert_eq!(library.upload_progress(), UploadProgress::default());
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_reloads_list_and_stats() {
        let (transport, library) = library();
        transport.route(
            Method::Delete,
            &endpoints::document(4),
            ApiResponse::new(204, ""),
        );
        transport.route(Method::Get, endpoints::DOCUMENTS, list(&[1]));
        transport.route(
            Method::Get,
            endpoints::DOCUMENTS_STATS,
            ApiResponse::json_body(200, &stats_json(1)),
        );

        library.delete_document(4).await.unwrap();

        assert_eq!(transport.count_path("/documents/4/"), 1);
        assert_eq!(library.state().documents.len(), 1);
    }

    #[tokio::test]
    async fn test_download_zip_returns_archive_bytes() {
        let (transport, library) = library();
        transport.push_response(ApiResponse::new(200, b"PK\x05\x06".to_vec()));

        assert_eq!(library.download_zip().await.unwrap(), b"PK\x05\x06".to_vec());
    }
}
