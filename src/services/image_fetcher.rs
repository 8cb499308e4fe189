use futures_util::future::try_join_all;
use image::DynamicImage;
use reqwest::Client;
use std::time::Duration;

use crate::{
    config::Config,
    error::{AppError, Result},
};

// ==================== IMAGE SOURCE ====================

/// Where card artwork comes from.
#[async_trait::async_trait]
pub trait ImageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}

/// Downloads card artwork over HTTP(S).
#[derive(Clone, Debug)]
pub struct HttpImageSource {
    client: Client,
}

impl HttpImageSource {
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(config.image_user_agent.clone());
        if let Some(timeout) = config.image_fetch_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("image client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let parsed = url::Url::parse(url).map_err(|e| AppError::ImageFetch(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::ImageFetch(format!(
                "unsupported scheme {}",
                parsed.scheme()
            )));
        }

        let resp = self
            .client
            .get(parsed)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::ImageFetch(e.to_string()))?;
        let bytes = resp
            .bytes()
            .await
            .map_err(|e| AppError::ImageFetch(e.to_string()))?;

        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }
}

// ==================== BATCH FETCH ====================

/// First failure of a batch; the batch as a whole is unusable.
#[derive(Debug, thiserror::Error)]
pub enum ImageBatchError {
    #[error("card {index} ({url}): {reason}")]
    Card {
        index: usize,
        url: String,
        reason: String,
    },

    #[error("image downloads exceeded {0:?}")]
    TimedOut(Duration),
}

impl From<ImageBatchError> for AppError {
    fn from(err: ImageBatchError) -> Self {
        AppError::ImageFetch(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct FetchedImage {
    pub index: usize,
    pub url: String,
    pub bytes: Vec<u8>,
}

impl FetchedImage {
    pub fn decode(&self) -> std::result::Result<DynamicImage, ImageBatchError> {
        image::load_from_memory(&self.bytes).map_err(|e| ImageBatchError::Card {
            index: self.index,
            url: self.url.clone(),
            reason: e.to_string(),
        })
    }
}

/// Downloads every url concurrently and waits for all of them.
///
/// Resolves to all images in request order or to the first failure; an
/// optional `limit` bounds the whole fan-out.
pub async fn fetch_all(
    source: &dyn ImageSource,
    urls: &[String],
    limit: Option<Duration>,
) -> std::result::Result<Vec<FetchedImage>, ImageBatchError> {
    let downloads = urls.iter().enumerate().map(|(index, url)| async move {
        source
            .fetch(url)
            .await
            .map(|bytes| FetchedImage {
                index,
                url: url.clone(),
                bytes,
            })
            .map_err(|e| ImageBatchError::Card {
                index,
                url: url.clone(),
                reason: match e {
                    AppError::ImageFetch(reason) => reason,
                    other => other.to_string(),
                },
            })
    });
    let batch = try_join_all(downloads);

    match limit {
        Some(limit) => tokio::time::timeout(limit, batch)
            .await
            .map_err(|_| ImageBatchError::TimedOut(limit))?,
        None => batch.await,
    }
}
