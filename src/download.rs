use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::PathBuf;

use attohttpc::Session;
use chrono::Duration;
use chrono::Local;
use chrono::NaiveDate;
use tracing::debug;
use tracing::info;
use tracing::warn;

use crate::args::ArgsPatch;
use crate::args::RequestArgs;
use crate::args::TODAY;
use crate::client::Client;
use crate::error::DownloadError;
use crate::fetch::ImageRecord;
use crate::provider::Provider;

const DATE_STAMP: &str = "%Y%m%d";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Saved {
    Written(PathBuf),
    /// A file for that date was already there.
    Skipped(PathBuf),
}

/// Saves images of the day into a flat directory, one `YYYYMMDD.<ext>` file
/// per date. The files present are the only record of what was downloaded.
pub struct Downloader {
    /// Destination directory to save images.
    dest: PathBuf,

    provider: Provider,

    args: ArgsPatch,

    /// File extension without the leading dot.
    extension: String,

    today: NaiveDate,

    sess: Session,
}

impl Downloader {
    pub fn builder() -> DownloaderBuilder {
        DownloaderBuilder::default()
    }

    pub fn path_for(&self, date: NaiveDate) -> PathBuf {
        self.dest
            .join(format!("{}.{}", date.format(DATE_STAMP), self.extension))
    }

    /// Downloads the images selected by the configured arguments. Returns
    /// without touching the network when every expected file already exists.
    pub fn download_today(&self) -> Result<Vec<PathBuf>, DownloadError> {
        let args = RequestArgs::from_patch(self.args.clone(), &self.provider);
        let present = expected_dates(self.today, &args)
            .is_some_and(|dates| dates.into_iter().all(|date| self.path_for(date).exists()));
        if present {
            info!(
                dest = %self.dest.display(),
                "Images already exist. Nothing to download."
            );
            return Ok(Vec::new());
        }

        let client = Client::new(self.provider.clone(), self.args.clone())?;
        let mut written = Vec::new();
        for image in client.images(args.count) {
            if let Saved::Written(path) = self.save(image)? {
                written.push(path);
            }
        }
        Ok(written)
    }

    /// Catches up on every date after the newest file in the directory, as far
    /// back as the provider's window reaches. Stops at the first failed download.
    pub fn sync(&self) -> Result<Vec<PathBuf>, DownloadError> {
        let latest = self.latest_date()?;
        if latest.is_some_and(|latest| latest >= self.today) {
            info!(dest = %self.dest.display(), "Already up to date.");
            return Ok(Vec::new());
        }

        let patch = ArgsPatch {
            day_offset: Some(TODAY),
            count: Some(self.provider.limit as i64),
            ..self.args.clone()
        };
        let client = Client::new(self.provider.clone(), patch)?;

        let mut pending: Vec<&ImageRecord> = client
            .images(self.provider.limit)
            .iter()
            .filter(|image| latest.is_none_or(|latest| image.startdate > latest))
            .collect();
        pending.sort_by_key(|image| image.startdate);

        let mut written = Vec::new();
        for image in pending {
            match self.save(image) {
                Ok(Saved::Written(path)) => written.push(path),
                Ok(Saved::Skipped(_)) => {}
                Err(err) => {
                    warn!(date = %image.startdate, "Failed to download. Cancel the remaining downloads.");
                    return Err(err);
                }
            }
        }
        Ok(written)
    }

    /// Writes one image under its date unless a file for that date exists.
    pub fn save(&self, image: &ImageRecord) -> Result<Saved, DownloadError> {
        let path = self.path_for(image.startdate);
        if path.exists() {
            info!(path = %path.display(), "This image already exists. Skipping.");
            return Ok(Saved::Skipped(path));
        }

        debug!(url = %image.url, "Downloading");
        let resp = self
            .sess
            .get(&image.url)
            .send()
            .map_err(|source| DownloadError::Request {
                url: image.url.clone(),
                source,
            })?;
        if !resp.is_success() {
            return Err(DownloadError::Status {
                url: image.url.clone(),
                status: resp.status(),
            });
        }
        let bytes = resp.bytes().map_err(|source| DownloadError::Request {
            url: image.url.clone(),
            source,
        })?;

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)
            .and_then(|file| file.lock().map(|()| file));
        let mut file = match file {
            Ok(file) => file,
            Err(source) => return Err(DownloadError::Io { path, source }),
        };
        if let Err(source) = write_locked(&mut file, &bytes) {
            // Removed before the lock is released with `file`.
            let _ = fs::remove_file(&path);
            drop(file);
            return Err(DownloadError::Io { path, source });
        }

        info!(
            path = %path.display(),
            at = %Local::now().format("%Y/%m/%d %H:%M:%S%.6f"),
            "Saved"
        );
        Ok(Saved::Written(path))
    }

    /// Newest date among the `YYYYMMDD.<ext>` files in the destination.
    fn latest_date(&self) -> Result<Option<NaiveDate>, DownloadError> {
        let io_err = |source: io::Error| DownloadError::Io {
            path: self.dest.clone(),
            source,
        };

        let mut latest = None;
        for entry in fs::read_dir(&self.dest).map_err(io_err)? {
            let path = entry.map_err(io_err)?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(self.extension.as_str()) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if stem.len() != 8 || !stem.bytes().all(|b| b.is_ascii_digit()) {
                continue;
            }
            if let Ok(date) = NaiveDate::parse_from_str(stem, DATE_STAMP) {
                latest = latest.max(Some(date));
            }
        }
        Ok(latest)
    }
}

/// Dates the provider will answer for `args`, newest first. `None` when an
/// offset reaches past the calendar chrono can represent.
fn expected_dates(today: NaiveDate, args: &RequestArgs) -> Option<Vec<NaiveDate>> {
    let first = today.checked_sub_signed(Duration::days(i64::from(args.day_offset)))?;
    (0..args.count)
        .map(|i| first.checked_sub_signed(Duration::days(i as i64)))
        .collect()
}

/// Replaces the contents of a file the caller holds the lock on.
fn write_locked(file: &mut File, bytes: &[u8]) -> io::Result<()> {
    file.set_len(0)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[derive(Debug)]
pub struct DownloaderBuilder {
    dest: PathBuf,
    provider: Provider,
    args: ArgsPatch,
    extension: String,
    today: NaiveDate,
}

impl DownloaderBuilder {
    pub fn dest<P: Into<PathBuf>>(mut self, dest: P) -> Self {
        self.dest = dest.into();
        self
    }

    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = provider;
        self
    }

    pub fn base_url(mut self, base_url: String) -> Self {
        self.provider.base_url = base_url;
        self
    }

    pub fn args(mut self, args: ArgsPatch) -> Self {
        self.args = args;
        self
    }

    pub fn extension<S: Into<String>>(mut self, extension: S) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn build(self) -> Downloader {
        Downloader {
            dest: self.dest,
            provider: self.provider,
            args: self.args,
            extension: self.extension,
            today: self.today,
            sess: Session::new(),
        }
    }
}

impl Default for DownloaderBuilder {
    fn default() -> Self {
        Self {
            dest: PathBuf::from("bing"),
            provider: Provider::default(),
            args: ArgsPatch::default(),
            extension: String::from("jpg"),
            today: Local::now().date_naive(),
        }
    }
}
