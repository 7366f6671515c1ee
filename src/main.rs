use std::path::PathBuf;

use anyhow::Context;

mod cli;
mod concat;
mod config;
mod download;
mod error;
mod library;
mod listing;
mod naming;
mod order;
mod pipeline;
mod playlist;
mod report;
mod tags;
mod util;

use cli::build_cli;
use config::Settings;
use listing::format_hms;
use pipeline::{FetchOptions, ReshuffleOptions};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let settings = Settings::load().context("failed to load configuration")?;
    settings.validate().map_err(anyhow::Error::msg)?;

    let matches = build_cli().get_matches();
    match matches.subcommand() {
        Some(("fetch", sub)) => {
            let opts = FetchOptions {
                url: sub
                    .get_one::<String>("url")
                    .cloned()
                    .expect("defaulted argument"),
                output_dir: sub
                    .get_one::<PathBuf>("output")
                    .cloned()
                    .unwrap_or_else(|| PathBuf::from(&settings.download.output_dir)),
                quality: sub
                    .get_one::<u32>("quality")
                    .copied()
                    .unwrap_or(settings.download.quality),
                update_tags: settings.download.update_tags && !sub.get_flag("no-tags"),
                concatenate: settings.download.concatenate && !sub.get_flag("no-concat"),
                randomize: settings.download.randomize && !sub.get_flag("no-shuffle"),
                seed: sub.get_one::<u64>("seed").copied(),
                force: sub.get_flag("force"),
                extensions: settings.library.extensions.clone(),
            };

            let summary = pipeline::run_fetch(&opts)
                .with_context(|| format!("failed to process playlist '{}'", opts.url))?;

            println!("{}", "=".repeat(60));
            println!("Playlist: {}", summary.playlist_title);
            println!(
                "Downloaded {} track(s), skipped {}",
                summary.downloaded, summary.skipped
            );
            println!("Files saved to: {}", summary.playlist_dir.display());
            for mix in &summary.mixes {
                println!(
                    "{} mix: {} [{}]",
                    mix.label,
                    mix.path.display(),
                    format_hms(mix.total)
                );
            }
            println!("{}", "=".repeat(60));
        }
        Some(("reshuffle", sub)) => {
            let dir = sub
                .get_one::<PathBuf>("dir")
                .cloned()
                .expect("required argument");
            let opts = ReshuffleOptions {
                dir: dir.clone(),
                seed: sub.get_one::<u64>("seed").copied(),
                force: sub.get_flag("force"),
                extensions: settings.library.extensions.clone(),
            };

            let summary = pipeline::run_reshuffle(&opts)
                .with_context(|| format!("failed to reshuffle '{}'", dir.display()))?;

            println!(
                "Reshuffled {} track(s) into {} [{}]",
                summary.tracks,
                summary.mix.path.display(),
                format_hms(summary.mix.total)
            );
        }
        _ => unreachable!("subcommand is required"),
    }

    Ok(())
}
