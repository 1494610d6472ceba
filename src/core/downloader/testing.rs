// In-memory transport used by the downloader and pipeline tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use futures_util::stream::{self, StreamExt};

use super::transport::{ByteStream, Transport};
use crate::core::error::{ResolverError, ResolverResult};

#[derive(Default)]
pub struct FakeTransport {
    bodies: HashMap<String, Vec<u8>>,
    stalled: HashSet<String>,
    calls: AtomicUsize,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_body(mut self, url: &str, body: &[u8]) -> Self {
        self.bodies.insert(url.to_string(), body.to_vec());
        self
    }

    /// A URL whose body never finishes arriving.
    pub fn with_stalled(mut self, url: &str) -> Self {
        self.stalled.insert(url.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn fetch(&self, url: &str) -> ResolverResult<ByteStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.stalled.contains(url) {
            return Ok(stream::pending().boxed());
        }

        let Some(body) = self.bodies.get(url) else {
            return Err(ResolverError::DownloadFailed {
                url: url.to_string(),
                status: 404,
            });
        };

        // Two chunks so hashing has to be incremental.
        let mid = body.len() / 2;
        let chunks = vec![
            Ok(Bytes::copy_from_slice(&body[..mid])),
            Ok(Bytes::copy_from_slice(&body[mid..])),
        ];
        Ok(stream::iter(chunks).boxed())
    }
}
