use std::path::PathBuf;

use clap::{Arg, ArgAction, Command, builder::ValueParser, value_parser};

/// Example playlist used when no URL is given, mirroring the published
/// usage examples.
pub const DEFAULT_PLAYLIST: &str =
    "https://www.youtube.com/watch?v=LZmtl3l1R9A&list=PLW7vZQVayoR0wLs2ahN7h774_XsD-dp-2";

/// Parse an MP3 bitrate argument. Only the bitrates the downloader's
/// encoding step supports are accepted.
pub fn parse_quality(value: &str) -> Result<u32, String> {
    match value {
        "128" => Ok(128),
        "192" => Ok(192),
        "320" => Ok(320),
        _ => Err(format!("quality must be 128, 192 or 320 (got '{value}')")),
    }
}

fn seed_arg() -> Arg {
    Arg::new("seed")
        .long("seed")
        .value_name("SEED")
        .help("Fix the shuffle permutation for reproducible runs")
        .value_parser(value_parser!(u64))
}

fn force_arg() -> Arg {
    Arg::new("force")
        .long("force")
        .help("Overwrite an existing randomized mix from the same day")
        .action(ArgAction::SetTrue)
}

pub fn build_cli() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .author(env!("CARGO_PKG_AUTHORS"))
        .about("Download a playlist as tagged MP3s and build combined mixes")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("fetch")
                .about("Run the full pipeline: download, tag, playlist, mixes")
                .arg(
                    Arg::new("url")
                        .value_name("PLAYLIST_URL")
                        .help("Playlist URL (defaults to the example playlist)")
                        .default_value(DEFAULT_PLAYLIST),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output-dir")
                        .value_name("DIR")
                        .help("Base directory for downloaded files")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("quality")
                        .short('q')
                        .long("quality")
                        .value_name("KBPS")
                        .help("MP3 bitrate: 128, 192 or 320")
                        .value_parser(ValueParser::new(parse_quality)),
                )
                .arg(
                    Arg::new("no-tags")
                        .long("no-tags")
                        .help("Skip rewriting ID3 tags after download")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-concat")
                        .long("no-concat")
                        .help("Skip building the combined mixes")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-shuffle")
                        .long("no-shuffle")
                        .help("Skip the randomized mix variant")
                        .action(ArgAction::SetTrue),
                )
                .arg(seed_arg())
                .arg(force_arg()),
        )
        .subcommand(
            Command::new("reshuffle")
                .about("Build a fresh randomized mix from an existing download directory")
                .arg(
                    Arg::new("dir")
                        .value_name("DIR")
                        .help("Directory holding the numbered track files")
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(seed_arg())
                .arg(force_arg()),
        )
}
