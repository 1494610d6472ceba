use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{BoxStream, StreamExt};
use reqwest::Client;

use crate::core::error::{ResolverError, ResolverResult};
use crate::core::http::build_http_client;

/// A body being received, chunk by chunk.
pub type ByteStream = BoxStream<'static, ResolverResult<Bytes>>;

/// Network seam of the downloader.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Start a GET for `url` and return its body stream.
    async fn fetch(&self, url: &str) -> ResolverResult<ByteStream>;
}

/// `reqwest`-backed transport.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> ResolverResult<Self> {
        Ok(Self::with_client(build_http_client()?))
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &str) -> ResolverResult<ByteStream> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ResolverError::DownloadFailed {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(ResolverError::from))
            .boxed())
    }
}
