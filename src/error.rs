use std::io;
use std::path::PathBuf;

use attohttpc::StatusCode;
use thiserror::Error;

/// Failure to obtain the image list from the metadata endpoint.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: attohttpc::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("empty response from {0}")]
    EmptyBody(String),
    #[error("unable to retrieve JSON data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("response has no images array")]
    MissingImages,
    #[error("no image available")]
    NoImages,
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("download of {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: attohttpc::Error,
    },
    #[error("{url} answered with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
