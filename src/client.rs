use crate::args::ArgsPatch;
use crate::args::RequestArgs;
use crate::error::FetchError;
use crate::fetch::Fetcher;
use crate::fetch::ImageRecord;
use crate::provider::Provider;
use crate::rewrite::rewrite_urls;

/// Image-of-the-day client holding the current arguments and the images they
/// resolved to.
pub struct Client {
    fetcher: Fetcher,
    args: RequestArgs,
    images: Vec<ImageRecord>,
}

impl Client {
    /// Normalizes `patch` over the defaults and fetches right away.
    pub fn new(provider: Provider, patch: ArgsPatch) -> Result<Self, FetchError> {
        let args = RequestArgs::from_patch(patch, &provider);
        let fetcher = Fetcher::new(provider);
        let images = load(&fetcher, &args)?;
        Ok(Self {
            fetcher,
            args,
            images,
        })
    }

    pub fn args(&self) -> &RequestArgs {
        &self.args
    }

    pub fn image(&self) -> Option<&ImageRecord> {
        self.images(1).first()
    }

    /// Returns `max(n, fetched)` records, capped at what was fetched: asking
    /// for fewer than were fetched still yields all of them.
    pub fn images(&self, n: usize) -> &[ImageRecord] {
        let n = n.max(self.images.len()).min(self.images.len());
        &self.images[..n]
    }

    /// Merges `patch` into the current arguments and fetches again. On error
    /// both the arguments and the images stay as they were.
    pub fn set_args(&mut self, patch: ArgsPatch) -> Result<(), FetchError> {
        let args = self.args.merge(patch, self.fetcher.provider());
        let images = load(&self.fetcher, &args)?;
        self.args = args;
        self.images = images;
        Ok(())
    }
}

fn load(fetcher: &Fetcher, args: &RequestArgs) -> Result<Vec<ImageRecord>, FetchError> {
    let images = fetcher.fetch(args)?;
    Ok(rewrite_urls(images, args.resolution, fetcher.provider()))
}
