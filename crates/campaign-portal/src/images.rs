//! Campaign logo and thumbnail uploads.

use chrono::Utc;
use portal_backend_client::StorageClient;
use tracing::{info, warn};

use crate::error::Result;
use crate::model::CampaignUpdate;
use crate::validation::validate_image;

/// Bucket campaign images live in
pub const DEFAULT_IMAGE_BUCKET: &str = "campaign-images";

/// Which campaign image is being uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ImageKind {
    Logo,
    Thumbnail,
}

impl ImageKind {
    /// Folder inside the bucket
    pub fn folder(&self) -> &'static str {
        match self {
            ImageKind::Logo => "logos",
            ImageKind::Thumbnail => "thumbnails",
        }
    }

    /// Campaign patch pointing this image slot at `url`
    pub fn campaign_update(&self, url: impl Into<String>) -> CampaignUpdate {
        let url = Some(url.into());
        match self {
            ImageKind::Logo => CampaignUpdate {
                logo_url: url,
                ..Default::default()
            },
            ImageKind::Thumbnail => CampaignUpdate {
                thumbnail_url: url,
                ..Default::default()
            },
        }
    }
}

/// MIME type of an image file name; unknown extensions map to
/// `application/octet-stream` and are rejected at upload.
pub fn mime_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// A file picked for upload
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl ImageUpload {
    /// File contents with the MIME type taken from the name
    pub fn new(file_name: impl Into<String>, data: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            mime_type: mime_type_for(&file_name).to_string(),
            file_name,
            data,
        }
    }

    /// Extension of the original file name, falling back to the MIME subtype
    fn extension(&self) -> String {
        match self.file_name.rsplit_once('.') {
            Some((_, ext)) if !ext.is_empty() => ext.to_lowercase(),
            _ => self
                .mime_type
                .rsplit('/')
                .next()
                .unwrap_or("bin")
                .to_string(),
        }
    }
}

/// Where an uploaded image ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    /// Object path inside the bucket
    pub path: String,
    pub public_url: String,
}

/// Validated uploads into the image bucket
#[derive(Clone)]
pub struct ImageUploader {
    storage: StorageClient,
    bucket: String,
}

impl ImageUploader {
    pub fn new(storage: StorageClient, bucket: impl Into<String>) -> Self {
        Self {
            storage,
            bucket: bucket.into(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Unique object path: `<folder>/<uuid>-<millis>.<ext>`
    pub fn object_path(kind: ImageKind, image: &ImageUpload) -> String {
        format!(
            "{}/{}-{}.{}",
            kind.folder(),
            uuid::Uuid::new_v4(),
            Utc::now().timestamp_millis(),
            image.extension()
        )
    }

    /// Check size and type, upload, and return the public URL.
    ///
    /// Nothing is sent when validation fails.
    pub async fn upload(&self, kind: ImageKind, image: ImageUpload) -> Result<UploadedImage> {
        validate_image(image.data.len(), &image.mime_type)?;

        let path = Self::object_path(kind, &image);
        self.storage
            .upload(&self.bucket, &path, image.data, &image.mime_type)
            .await
            .map_err(|e| {
                warn!(bucket = %self.bucket, %path, error = %e, "Image upload failed");
                e
            })?;

        let public_url = self.storage.public_url(&self.bucket, &path);
        info!(kind = kind.folder(), %path, "Image uploaded");
        Ok(UploadedImage { path, public_url })
    }

    /// Delete uploaded images, e.g. ones orphaned by a failed campaign insert.
    pub async fn remove(&self, paths: &[String]) -> Result<()> {
        self.storage.remove(&self.bucket, paths).await?;
        info!(bucket = %self.bucket, count = paths.len(), "Images removed");
        Ok(())
    }
}
