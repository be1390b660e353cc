use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use bing_downloader_rs::ArgsPatch;
use bing_downloader_rs::Downloader;
use bing_downloader_rs::Provider;
use clap::Parser;
use tracing::info;

/// Downloads the Bing image of the day
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Destination directory
    #[arg(default_value = PathBuf::from("./bing").into_os_string())]
    dest: PathBuf,

    /// Number of images to fetch (1 to 8)
    #[arg(short = 'n', long, default_value_t = 1, allow_hyphen_values = true)]
    count: i64,

    /// Days back from today; -1 is tomorrow
    #[arg(short, long, default_value_t = 0, allow_hyphen_values = true)]
    day_offset: i32,

    /// Market of the image, e.g. en-US or de-DE
    #[arg(short, long, default_value = "en-US")]
    locale: String,

    /// 1366x768 or 1920x1080; anything else means 1920x1080
    #[arg(short, long, default_value = "1920x1080")]
    resolution: String,

    /// Extension of saved files
    #[arg(short, long, default_value = "jpg")]
    extension: String,

    /// Provider origin
    #[arg(long, default_value = "http://www.bing.com")]
    base_url: String,

    /// Fetch every date missing since the newest saved image
    #[arg(long)]
    sync: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    fs::create_dir_all(&args.dest).with_context(|| {
        format!(
            "Cannot create destination directory: {}",
            args.dest.to_string_lossy()
        )
    })?;

    let downloader = Downloader::builder()
        .dest(args.dest)
        .provider(Provider::default().with_base_url(args.base_url))
        .args(ArgsPatch {
            day_offset: Some(args.day_offset),
            count: Some(args.count),
            locale: Some(args.locale),
            resolution: Some(args.resolution),
        })
        .extension(args.extension)
        .build();

    let written = if args.sync {
        downloader.sync()?
    } else {
        downloader.download_today()?
    };
    info!(count = written.len(), "Operation successful");
    Ok(())
}
