//! Listing Flow
//!
//! The "list an item" form: validates locally, creates the item, then
//! uploads its photos one at a time.

use std::path::Path;

use crate::client::api::ApiClient;
use crate::client::error::{ClientError, Result};
use crate::client::session::Session;
use crate::client::types::AppView;
use crate::shared::marketplace::item::DEFAULT_PRICE_POINTS;
use crate::shared::marketplace::{CreateItemRequest, Item, ItemCategory, ItemCondition};
use crate::shared::SharedError;

/// Message shown for any failed listing attempt
pub const LISTING_FAILED: &str = "Error creating item. Please try again.";

/// An image ready for `POST /items/{id}/upload-image`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Build an upload from memory. Only `image/*` content is accepted.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> std::result::Result<Self, SharedError> {
        let content_type = content_type.into();
        if !content_type.starts_with("image/") {
            return Err(SharedError::validation("images", "File must be an image"));
        }
        Ok(Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        })
    }

    /// Read an image from disk. The type is sniffed from the file's
    /// leading bytes, so the name does not matter.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await.map_err(|source| ClientError::File {
            path: path.to_path_buf(),
            source,
        })?;

        let content_type = infer::get(&bytes)
            .map(|kind| kind.mime_type())
            .filter(|mime| mime.starts_with("image/"))
            .ok_or_else(|| SharedError::validation("images", format!("{} is not an image", path.display())))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());

        Ok(Self::new(file_name, content_type, bytes)?)
    }
}

/// Split a comma-separated tag field: trimmed, empties and repeats dropped
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input.split(',').map(str::trim).filter(|tag| !tag.is_empty()) {
        if !tags.iter().any(|existing| existing == tag) {
            tags.push(tag.to_string());
        }
    }
    tags
}

/// Form state for a new listing
#[derive(Debug, Clone)]
pub struct ListingForm {
    pub title: String,
    pub description: String,
    pub category: ItemCategory,
    pub size: String,
    pub condition: ItemCondition,
    /// Raw comma-separated tags as typed
    pub tags: String,
    pub price_points: i64,
    pub images: Vec<ImageUpload>,
}

impl Default for ListingForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            category: ItemCategory::default(),
            size: String::new(),
            condition: ItemCondition::default(),
            tags: String::new(),
            price_points: DEFAULT_PRICE_POINTS,
            images: Vec::new(),
        }
    }
}

impl ListingForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the form and produce the create body
    pub fn to_request(&self) -> std::result::Result<CreateItemRequest, SharedError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(SharedError::validation("title", "Title is required"));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(SharedError::validation("description", "Description is required"));
        }
        let size = self.size.trim();
        if size.is_empty() {
            return Err(SharedError::validation("size", "Size is required"));
        }
        if self.price_points < 0 {
            return Err(SharedError::validation("price_points", "Points cannot be negative"));
        }

        Ok(CreateItemRequest {
            title: title.to_string(),
            description: description.to_string(),
            category: self.category,
            size: size.to_string(),
            condition: self.condition,
            tags: parse_tags(&self.tags),
            price_points: self.price_points,
        })
    }

    /// Create the item and upload its images in order.
    ///
    /// Stops at the first failed upload; the item itself stays listed. The
    /// returned item includes the uploaded image references.
    pub async fn submit(&self, api: &ApiClient, session: &Session) -> Result<(Item, AppView)> {
        let request = self.to_request()?;

        let mut item = api.create_item(session.credential(), &request).await.map_err(|e| {
            tracing::error!("[LISTING] Error creating item: {}", e);
            e
        })?;
        tracing::info!("[LISTING] Created '{}' ({})", item.title, item.id);

        for image in &self.images {
            let uploaded = api
                .upload_image(session.credential(), item.id, image)
                .await
                .map_err(|e| {
                    tracing::error!("[LISTING] Error uploading {}: {}", image.file_name, e);
                    e
                })?;
            item.images.push(uploaded.image_url);
        }

        Ok((item, AppView::Dashboard))
    }
}
