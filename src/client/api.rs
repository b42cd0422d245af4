//! Marketplace API Client
//!
//! One typed method per backend endpoint. The client holds no credential of
//! its own: authenticated calls take the [`Credential`] explicitly, so the
//! session manager stays the only owner of session state.

use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::client::config::Config;
use crate::client::error::{ClientError, Result};
use crate::client::listing::ImageUpload;
use crate::client::types::Credential;
use crate::shared::marketplace::{
    AuthResponse, CreateItemRequest, CreateSwapRequest, ImageUploadResponse, Item, LoginRequest,
    RegisterRequest, StatusMessage, SwapAction, SwapRequest, UserProfile,
};

/// Paging parameters for `GET /items`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    /// The backend's own default page
    pub const DEFAULT: Page = Page { skip: 0, limit: 20 };

    pub fn first(limit: u32) -> Self {
        Self { skip: 0, limit }
    }

    pub fn next(&self) -> Self {
        Self {
            skip: self.skip.saturating_add(self.limit),
            limit: self.limit,
        }
    }

    /// The page to fetch after this one returned `returned` items, if a
    /// full page suggests there may be more
    pub fn after(&self, returned: usize) -> Option<Page> {
        let full = self.limit > 0 && returned >= self.limit as usize;
        full.then(|| self.next())
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// HTTP client for the marketplace backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    config: Config,
    client: Client,
}

impl ApiClient {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            client: Client::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn authorized(&self, builder: RequestBuilder, credential: &Credential) -> RequestBuilder {
        builder.bearer_auth(credential.as_str())
    }

    /// Exchange email and password for a credential
    pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse> {
        let url = self.config.api_url("/auth/login");
        tracing::debug!("[API] POST {}", url);
        let response = self.client.post(&url).json(request).send().await?;
        decode(response).await
    }

    /// Create an account and receive its credential
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse> {
        let url = self.config.api_url("/auth/register");
        tracing::debug!("[API] POST {}", url);
        let response = self.client.post(&url).json(request).send().await?;
        decode(response).await
    }

    /// Identity behind `credential`
    pub async fn me(&self, credential: &Credential) -> Result<UserProfile> {
        let url = self.config.api_url("/auth/me");
        tracing::debug!("[API] GET {}", url);
        let response = self
            .authorized(self.client.get(&url), credential)
            .send()
            .await?;
        decode(response).await
    }

    /// Available items, newest listings as the backend orders them
    pub async fn list_items(&self, page: Page) -> Result<Vec<Item>> {
        let url = self.config.api_url("/items");
        tracing::debug!("[API] GET {} skip={} limit={}", url, page.skip, page.limit);
        let response = self
            .client
            .get(&url)
            .query(&[("skip", page.skip), ("limit", page.limit)])
            .send()
            .await?;
        decode(response).await
    }

    pub async fn get_item(&self, id: Uuid) -> Result<Item> {
        let url = self.config.api_url(&format!("/items/{}", id));
        tracing::debug!("[API] GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    /// Every item listed by `user_id`, available or not
    pub async fn user_items(&self, user_id: Uuid) -> Result<Vec<Item>> {
        let url = self.config.api_url(&format!("/items/user/{}", user_id));
        tracing::debug!("[API] GET {}", url);
        let response = self.client.get(&url).send().await?;
        decode(response).await
    }

    pub async fn create_item(&self, credential: &Credential, request: &CreateItemRequest) -> Result<Item> {
        let url = self.config.api_url("/items");
        tracing::debug!("[API] POST {}", url);
        let response = self
            .authorized(self.client.post(&url), credential)
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// Attach one image to an item the caller owns
    pub async fn upload_image(
        &self,
        credential: &Credential,
        item_id: Uuid,
        upload: &ImageUpload,
    ) -> Result<ImageUploadResponse> {
        let url = self.config.api_url(&format!("/items/{}/upload-image", item_id));
        tracing::debug!("[API] POST {} ({} bytes)", url, upload.bytes.len());

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .authorized(self.client.post(&url), credential)
            .multipart(form)
            .send()
            .await?;
        decode(response).await
    }

    /// Items owned by the caller
    pub async fn my_items(&self, credential: &Credential) -> Result<Vec<Item>> {
        let url = self.config.api_url("/my-items");
        tracing::debug!("[API] GET {}", url);
        let response = self
            .authorized(self.client.get(&url), credential)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn create_swap(&self, credential: &Credential, request: &CreateSwapRequest) -> Result<SwapRequest> {
        let url = self.config.api_url("/swaps");
        tracing::debug!("[API] POST {}", url);
        let response = self
            .authorized(self.client.post(&url), credential)
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    /// Requests against the caller's items
    pub async fn received_swaps(&self, credential: &Credential) -> Result<Vec<SwapRequest>> {
        let url = self.config.api_url("/swaps/received");
        tracing::debug!("[API] GET {}", url);
        let response = self
            .authorized(self.client.get(&url), credential)
            .send()
            .await?;
        decode(response).await
    }

    /// Requests the caller made
    pub async fn sent_swaps(&self, credential: &Credential) -> Result<Vec<SwapRequest>> {
        let url = self.config.api_url("/swaps/sent");
        tracing::debug!("[API] GET {}", url);
        let response = self
            .authorized(self.client.get(&url), credential)
            .send()
            .await?;
        decode(response).await
    }

    /// Accept or reject a pending request on one of the caller's items
    pub async fn respond_to_swap(
        &self,
        credential: &Credential,
        swap_id: Uuid,
        action: SwapAction,
    ) -> Result<StatusMessage> {
        let url = self
            .config
            .api_url(&format!("/swaps/{}/{}", swap_id, action.path_segment()));
        tracing::debug!("[API] PUT {}", url);
        let response = self
            .authorized(self.client.put(&url), credential)
            .send()
            .await?;
        decode(response).await
    }
}

/// Turn a response into `T`, or into the matching `ClientError`
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let err = ClientError::from_response(status, &body);
        tracing::debug!("[API] {} -> {}", status, err);
        return Err(err);
    }

    serde_json::from_slice(&body).map_err(|e| ClientError::Decode(e.to_string()))
}
