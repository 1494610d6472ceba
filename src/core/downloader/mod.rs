mod client;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{DownloadHandle, DownloadRequest, Downloader, OnStart};
pub use transport::{ByteStream, HttpTransport, Transport};
