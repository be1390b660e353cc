use crate::args::Resolution;
use crate::fetch::ImageRecord;
use crate::provider::Provider;

/// Points every record at the requested resolution variant and makes its URL
/// absolute.
pub fn rewrite_urls(
    images: Vec<ImageRecord>,
    resolution: Resolution,
    provider: &Provider,
) -> Vec<ImageRecord> {
    images
        .into_iter()
        .map(|mut image| {
            image.url = rewrite_url(&image.url, resolution, provider);
            image
        })
        .collect()
}

pub fn rewrite_url(url: &str, resolution: Resolution, provider: &Provider) -> String {
    let path = url.replace(&provider.high_token, resolution.token(provider));
    format!("{}{}", provider.base_url, path)
}

#[cfg(test)]
mod test {
    use super::*;

    const URL: &str = "/th?id=OHR.AutumnLarch_EN-US4820371951_1920x1080.jpg&pid=hp";

    #[test]
    fn low_replaces_only_the_token() {
        let provider = Provider::default();
        assert_eq!(
            rewrite_url(URL, Resolution::Low, &provider),
            "http://www.bing.com/th?id=OHR.AutumnLarch_EN-US4820371951_1366x768.jpg&pid=hp"
        );
    }

    #[test]
    fn high_only_prefixes_origin() {
        let provider = Provider::default();
        assert_eq!(
            rewrite_url(URL, Resolution::High, &provider),
            format!("http://www.bing.com{URL}")
        );
    }

    #[test]
    fn url_without_token_is_kept() {
        let provider = Provider::default().with_base_url("http://localhost:8080");
        assert_eq!(
            rewrite_url("/az/hprichbg/rb/Larch.jpg", Resolution::Low, &provider),
            "http://localhost:8080/az/hprichbg/rb/Larch.jpg"
        );
    }

    #[test]
    fn rewrite_keeps_metadata() {
        let images: Vec<ImageRecord> = serde_json::from_value(serde_json::json!([
            {"url": URL, "startdate": "20261014", "title": "Larch"},
        ]))
        .unwrap();
        let rewritten = rewrite_urls(images.clone(), Resolution::Low, &Provider::default());
        assert_eq!(rewritten[0].startdate, images[0].startdate);
        assert_eq!(rewritten[0].extra, images[0].extra);
        assert!(rewritten[0].url.ends_with("_1366x768.jpg&pid=hp"));
    }
}
