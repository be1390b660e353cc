//! Downloads the Bing image of the day into a flat directory of
//! `YYYYMMDD.<ext>` files, skipping dates that are already there.

mod args;
mod client;
mod download;
mod error;
mod fetch;
mod provider;
mod rewrite;

pub use args::ArgsPatch;
pub use args::RequestArgs;
pub use args::Resolution;
pub use args::TODAY;
pub use args::TOMORROW;
pub use args::YESTERDAY;
pub use client::Client;
pub use download::Downloader;
pub use download::DownloaderBuilder;
pub use download::Saved;
pub use error::DownloadError;
pub use error::FetchError;
pub use fetch::Fetcher;
pub use fetch::ImageRecord;
pub use provider::Provider;
pub use rewrite::rewrite_url;
pub use rewrite::rewrite_urls;
