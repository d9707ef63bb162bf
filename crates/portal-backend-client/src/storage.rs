//! Object storage client

use crate::client::{error_for_status, handle_response, Transport};
use crate::error::Result;
use crate::types::{RemoveRequest, UploadResponse};
use reqwest::header;

const STORAGE_PATH: &str = "storage/v1/object";

/// Upload objects into buckets and resolve their public URLs
#[derive(Clone)]
pub struct StorageClient {
    transport: Transport,
}

impl StorageClient {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Upload `data` under `path` in `bucket`. Existing objects are not overwritten.
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        data: Vec<u8>,
        mime_type: &str,
    ) -> Result<UploadResponse> {
        let url = self
            .transport
            .url(&format!("{}/{}/{}", STORAGE_PATH, bucket, encode_path(path)));
        let size = data.len();

        let request = self
            .transport
            .http()
            .post(&url)
            .header(header::CONTENT_TYPE, mime_type)
            .header("x-upsert", "false")
            .body(data);
        let response = self.transport.authorize(request).await.send().await?;

        let uploaded: UploadResponse = handle_response(response).await?;
        tracing::info!(bucket, path, size, "Uploaded object");
        Ok(uploaded)
    }

    /// Public URL of an object in a public bucket
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.transport.url(&format!(
            "{}/public/{}/{}",
            STORAGE_PATH,
            bucket,
            encode_path(path)
        ))
    }

    /// Remove objects by path
    pub async fn remove(&self, bucket: &str, paths: &[String]) -> Result<()> {
        let url = self.transport.url(&format!("{}/{}", STORAGE_PATH, bucket));
        let request = self
            .transport
            .http()
            .delete(&url)
            .json(&RemoveRequest { prefixes: paths });
        let response = self.transport.authorize(request).await.send().await?;
        error_for_status(response).await?;
        Ok(())
    }
}

/// Percent-encode each segment, keeping the `/` separators
fn encode_path(path: &str) -> String {
    path.trim_matches('/')
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_path_keeps_separators() {
        assert_eq!(encode_path("logos/a b.png"), "logos/a%20b.png");
        assert_eq!(encode_path("/thumbnails/x.webp/"), "thumbnails/x.webp");
    }
}
