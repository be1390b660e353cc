const BING_BASE_URL: &str = "http://www.bing.com";
const BING_ARCHIVE_PATH: &str = "/HPImageArchive.aspx";

/// Fixed facts about the image-of-the-day provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Provider {
    /// Origin prepended to every image path, e.g. `http://www.bing.com`.
    pub base_url: String,

    /// Path of the JSON metadata endpoint.
    pub archive_path: String,

    /// Resolution token selecting the low-resolution variant.
    pub low_token: String,

    /// Resolution token the provider puts in every image URL it returns.
    pub high_token: String,

    /// Maximum number of images a single request may return.
    pub limit: usize,

    /// Smallest accepted day offset. -1 is tomorrow.
    pub min_day_offset: i32,
}

impl Provider {
    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub(crate) fn archive_url(&self) -> String {
        format!("{}{}", self.base_url, self.archive_path)
    }
}

impl Default for Provider {
    fn default() -> Self {
        Self {
            base_url: String::from(BING_BASE_URL),
            archive_path: String::from(BING_ARCHIVE_PATH),
            low_token: String::from("1366x768"),
            high_token: String::from("1920x1080"),
            limit: 8,
            min_day_offset: -1,
        }
    }
}
