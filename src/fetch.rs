use attohttpc::Session;
use chrono::NaiveDate;
use serde::de;
use serde::Deserialize;
use serde::Deserializer;
use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::args::RequestArgs;
use crate::error::FetchError;
use crate::provider::Provider;

/// One image as described by the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImageRecord {
    pub url: String,

    /// Day the image was the image of the day.
    #[serde(deserialize_with = "date_from_startdate")]
    pub startdate: NaiveDate,

    /// Remaining provider fields (title, copyright, hsh, ...), untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn date_from_startdate<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let startdate: String = de::Deserialize::deserialize(deserializer)?;
    NaiveDate::parse_from_str(&startdate, "%Y%m%d").map_err(de::Error::custom)
}

#[derive(Debug, Deserialize)]
struct ArchiveResp {
    images: Option<Vec<ImageRecord>>,
}

pub struct Fetcher {
    provider: Provider,
    sess: Session,
}

impl Fetcher {
    pub fn new(provider: Provider) -> Self {
        Self {
            provider,
            sess: Session::new(),
        }
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Requests up to `args.count` records. URLs are returned as the provider
    /// sent them, relative and at the high resolution.
    pub fn fetch(&self, args: &RequestArgs) -> Result<Vec<ImageRecord>, FetchError> {
        let url = self.provider.archive_url();
        debug!(
            url = %url,
            idx = args.day_offset,
            n = args.count,
            mkt = %args.locale,
            "Fetching image metadata"
        );

        let resp = self
            .sess
            .get(&url)
            .param("format", "js")
            .param("idx", args.day_offset)
            .param("n", args.count)
            .param("mkt", &args.locale)
            .send()
            .map_err(|source| FetchError::Request {
                url: url.clone(),
                source,
            })?;

        if !resp.is_success() {
            return Err(FetchError::Status {
                url,
                status: resp.status(),
            });
        }

        let body = resp.bytes().map_err(|source| FetchError::Request {
            url: url.clone(),
            source,
        })?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Err(FetchError::EmptyBody(url));
        }

        let archive: ArchiveResp = serde_json::from_slice(&body)?;
        let mut images = archive.images.ok_or(FetchError::MissingImages)?;
        if images.is_empty() {
            return Err(FetchError::NoImages);
        }
        images.truncate(args.count);
        Ok(images)
    }
}
