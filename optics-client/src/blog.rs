//! Blog publishing
//!
//! The rich-text body arrives as opaque HTML. Images are uploaded first;
//! the post row is inserted with whichever uploads succeeded.

use crate::storage::{StorageClient, object_name};
use crate::validation::{FieldErrors, Rule, validate_all};
use crate::{ClientResult, TableClient};
use shared::models::BlogPostCreate;
use shared::util::now_millis;

pub const BLOGS_TABLE: &str = "blogs";
pub const UPLOAD_FAILED: &str = "Error uploading image. Please try again.";
pub const SUBMIT_FAILED: &str = "Error submitting blog. Please check your inputs and try again.";

const BLOG_RULES: [(&str, Rule); 4] = [
    (
        "title",
        Rule::MinLength {
            min: 5,
            message: "Title must be at least 5 characters",
        },
    ),
    (
        "description",
        Rule::MinLength {
            min: 10,
            message: "Description must be at least 10 characters",
        },
    ),
    (
        "category",
        Rule::MinLength {
            min: 3,
            message: "Category is required",
        },
    ),
    (
        "content",
        Rule::MinLength {
            min: 10,
            message: "Blog content cannot be empty",
        },
    ),
];

/// Image picked for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlogDraft {
    pub title: String,
    pub category: String,
    pub description: String,
    /// HTML
    pub content: String,
    pub images: Vec<ImageUpload>,
}

impl BlogDraft {
    pub fn validate(&self) -> FieldErrors {
        validate_all(&BLOG_RULES, |field| match field {
            "title" => self.title.as_str(),
            "description" => self.description.as_str(),
            "category" => self.category.as_str(),
            "content" => self.content.as_str(),
            _ => "",
        })
    }
}

/// Why a publish did not produce a post
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PublishError {
    #[error("{}", .0.messages().join(", "))]
    Invalid(FieldErrors),
    #[error("{}", SUBMIT_FAILED)]
    Submit,
}

/// Result of a successful publish
#[derive(Debug, Clone, PartialEq)]
pub struct Published {
    pub title: String,
    pub image_urls: Vec<String>,
    /// Set when at least one image failed to upload
    pub upload_error: Option<&'static str>,
}

#[derive(Debug, Clone)]
pub struct BlogPublisher {
    table: TableClient,
    storage: StorageClient,
    bucket: String,
}

impl BlogPublisher {
    pub fn new(table: TableClient, storage: StorageClient, bucket: impl Into<String>) -> Self {
        Self {
            table,
            storage,
            bucket: bucket.into(),
        }
    }

    /// Upload one image and return its public URL
    pub async fn upload_image(&self, image: &ImageUpload) -> ClientResult<String> {
        let name = object_name("blog", now_millis(), &image.file_name);
        let path = self
            .storage
            .upload(&self.bucket, &name, image.bytes.clone())
            .await?;
        Ok(self.storage.public_url(&self.bucket, &path))
    }

    /// Validate, upload images, then insert the post row.
    ///
    /// Failed uploads are dropped from the post and reported through
    /// `Published::upload_error`.
    pub async fn publish(&self, draft: &BlogDraft) -> Result<Published, PublishError> {
        let errors = draft.validate();
        if !errors.is_empty() {
            return Err(PublishError::Invalid(errors));
        }

        let mut image_urls = Vec::with_capacity(draft.images.len());
        let mut upload_error = None;
        for image in &draft.images {
            match self.upload_image(image).await {
                Ok(url) => image_urls.push(url),
                Err(e) => {
                    tracing::warn!(file = %image.file_name, error = %e, "Image upload failed");
                    upload_error = Some(UPLOAD_FAILED);
                }
            }
        }

        let row = BlogPostCreate {
            title: draft.title.trim().to_string(),
            category: draft.category.trim().to_string(),
            description: draft.description.trim().to_string(),
            content: draft.content.clone(),
            images: image_urls.clone(),
            created_at: chrono::Utc::now().to_rfc3339(),
        };
        // Only the status is checked; the stored row is never decoded.
        self.table
            .insert_minimal(BLOGS_TABLE, std::slice::from_ref(&row))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Blog insert failed");
                PublishError::Submit
            })?;

        tracing::info!(
            title = %row.title,
            images = image_urls.len(),
            "Blog posted"
        );
        Ok(Published {
            title: row.title,
            image_urls,
            upload_error,
        })
    }
}
