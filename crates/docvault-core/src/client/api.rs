//! Typed operations of the document API.

use std::sync::Arc;

use docvault_shared::dto::{LoginCredentials, RegisterData};
use serde::de::DeserializeOwned;
use serde_json::json;

use super::endpoints;
use super::pipeline::Pipeline;
use super::session::SessionStorage;
use super::stages::{self, BearerAuthStage, RefreshOnUnauthorizedStage, RequestIdStage};
use crate::domain::{
    AuthResponse, Document, DocumentCategory, DocumentListItem, DocumentStats, FileUpload, User,
};
use crate::error::ApiError;
use crate::ports::{
    ApiRequest, ApiResponse, FilePart, HttpTransport, MultipartForm, Navigator, SessionStore,
};

/// Client of the document API.
///
/// Owns the request pipeline and the persisted session. Construct one per
/// application and share it behind an `Arc`.
pub struct ApiClient {
    pipeline: Pipeline,
    storage: SessionStorage,
}

impl ApiClient {
    /// Client with the default stages: request id, bearer auth and
    /// refresh-on-401.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn SessionStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let storage = SessionStorage::new(store);
        let pipeline = Pipeline::new(transport)
            .with_request_stage(RequestIdStage)
            .with_request_stage(BearerAuthStage::new(storage.clone()))
            .with_response_stage(RefreshOnUnauthorizedStage::new(storage.clone(), navigator));

        Self { pipeline, storage }
    }

    /// Client over a custom pipeline. `storage` must be the session the
    /// pipeline's stages read from.
    pub fn with_pipeline(pipeline: Pipeline, storage: SessionStorage) -> Self {
        Self { pipeline, storage }
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }

    async fn call(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.pipeline.send(request).await.map_err(ApiError::from)
    }

    async fn call_json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        let response = self.call(request).await?;
        response.json().map_err(|e| ApiError::decode(&e))
    }

    async fn start_session(&self, auth: &AuthResponse) {
        self.storage
            .set_tokens(&auth.tokens.access, &auth.tokens.refresh)
            .await;
        self.storage.set_user(&auth.user).await;
    }

    // ==================== Auth ====================

    pub async fn login(&self, credentials: &LoginCredentials) -> Result<AuthResponse, ApiError> {
        let request = ApiRequest::post(endpoints::LOGIN).with_json(json!(credentials));
        let auth: AuthResponse = self.call_json(request).await?;

        self.start_session(&auth).await;
        tracing::info!(user_id = auth.user.id, "Logged in");
        Ok(auth)
    }

    pub async fn register(&self, data: &RegisterData) -> Result<AuthResponse, ApiError> {
        let request = ApiRequest::post(endpoints::REGISTER).with_json(json!(data));
        let auth: AuthResponse = self.call_json(request).await?;

        self.start_session(&auth).await;
        tracing::info!(user_id = auth.user.id, "Registered");
        Ok(auth)
    }

    /// Fetch the signed-in user's profile and cache it.
    pub async fn get_profile(&self) -> Result<User, ApiError> {
        let user: User = self.call_json(ApiRequest::get(endpoints::PROFILE)).await?;
        self.storage.set_user(&user).await;
        Ok(user)
    }

    /// Exchange a refresh token for a new access token.
    ///
    /// The new token is persisted only when the response carries one and a
    /// refresh token is already stored.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<(), ApiError> {
        stages::refresh_session(&self.pipeline, &self.storage, refresh_token)
            .await
            .map_err(ApiError::from)
    }

    /// Forget the local session. The server is not contacted.
    pub async fn logout(&self) {
        self.storage.clear().await;
        tracing::info!("Logged out");
    }

    pub async fn is_authenticated(&self) -> bool {
        self.storage.access_token().await.is_some()
    }

    /// Cached profile, without a network round-trip.
    pub async fn current_user(&self) -> Option<User> {
        self.storage.user().await
    }

    // ==================== Documents ====================

    pub async fn get_documents(
        &self,
        category: Option<DocumentCategory>,
    ) -> Result<Vec<DocumentListItem>, ApiError> {
        let mut request = ApiRequest::get(endpoints::DOCUMENTS);
        if let Some(category) = category {
            request = request.with_query("category", category.as_str());
        }
        self.call_json(request).await
    }

    pub async fn get_document(&self, id: u64) -> Result<Document, ApiError> {
        self.call_json(ApiRequest::get(endpoints::document(id))).await
    }

    pub async fn upload_document(
        &self,
        title: &str,
        file: &FileUpload,
    ) -> Result<Document, ApiError> {
        let form = MultipartForm::new().text("title", title).file(FilePart {
            field: "file".to_string(),
            file_name: file.file_name.clone(),
            content_type: file.content_type.clone(),
            bytes: file.bytes.clone(),
        });

        let document: Document = self
            .call_json(ApiRequest::post(endpoints::DOCUMENTS_UPLOAD).with_multipart(form))
            .await?;
        tracing::info!(document_id = document.id, category = %document.category, "Document uploaded");
        Ok(document)
    }

    pub async fn delete_document(&self, id: u64) -> Result<(), ApiError> {
        self.call(ApiRequest::delete(endpoints::document(id))).await?;
        tracing::info!(document_id = id, "Document deleted");
        Ok(())
    }

    pub async fn get_document_stats(&self) -> Result<DocumentStats, ApiError> {
        self.call_json(ApiRequest::get(endpoints::DOCUMENTS_STATS)).await
    }

    /// Every document of the user bundled as a zip archive.
    pub async fn download_documents_zip(&self) -> Result<Vec<u8>, ApiError> {
        let response = self
            .call(ApiRequest::get(endpoints::DOCUMENTS_DOWNLOAD_ZIP))
            .await?;
        Ok(response.body)
    }
}
