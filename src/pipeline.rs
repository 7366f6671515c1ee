//! The two entry workflows: full fetch and standalone reshuffle.
//!
//! Download and tagging tolerate per-item failures (skip, log, continue).
//! Everything after the inventory loader is strict: once a validated
//! [`TrackList`] exists, any failure aborts the stage.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::{info, warn};

use crate::concat::{FfmpegMerge, Merge, concatenate};
use crate::download::{self, DownloadedTrack};
use crate::error::{PipelineError, Result};
use crate::library::{self, LoftyProbe, TrackList};
use crate::listing::{build_listing, format_hms};
use crate::naming::{MixKind, listing_path, mix_path};
use crate::order::{OrderMode, rng_for, sequence};
use crate::playlist::write_m3u;
use crate::report::{MixNote, ReportInput, write_report};
use crate::tags::{TrackTags, write_tags};
use crate::util::{digit_width, sanitize_filename};

pub struct FetchOptions {
    pub url: String,
    pub output_dir: PathBuf,
    pub quality: u32,
    pub update_tags: bool,
    pub concatenate: bool,
    pub randomize: bool,
    pub seed: Option<u64>,
    pub force: bool,
    pub extensions: Vec<String>,
}

pub struct FetchSummary {
    pub playlist_title: String,
    pub playlist_dir: PathBuf,
    pub downloaded: usize,
    pub skipped: usize,
    pub mixes: Vec<MixNote>,
}

pub struct ReshuffleOptions {
    pub dir: PathBuf,
    pub seed: Option<u64>,
    pub force: bool,
    pub extensions: Vec<String>,
}

pub struct ReshuffleSummary {
    pub tracks: usize,
    pub mix: MixNote,
}

/// Full pipeline: download, tag, playlist, validate, mixes, report.
pub fn run_fetch(opts: &FetchOptions) -> Result<FetchSummary> {
    let info = download::fetch_playlist(&opts.url)?;
    let dir = opts.output_dir.join(sanitize_filename(&info.title, 100));
    fs::create_dir_all(&dir)?;
    info!("downloading '{}' into {}", info.title, dir.display());

    let width = digit_width(info.entries.len());
    let mut downloaded: Vec<DownloadedTrack> = Vec::new();
    let mut skipped = info.entries.iter().filter(|e| e.is_none()).count();
    for entry in info.entries.iter().flatten() {
        // Numbering follows successes, not playlist positions, so skipped
        // items never leave a gap for the strict loader to trip on.
        let seq = downloaded.len() as u32 + 1;
        match download::download_entry(entry, &dir, seq, width, opts.quality) {
            Some(track) => downloaded.push(track),
            None => skipped += 1,
        }
    }

    if downloaded.is_empty() {
        return Err(PipelineError::NoTracksFound { dir });
    }

    if opts.update_tags {
        let track_total = downloaded.len() as u32;
        for track in &downloaded {
            let tags = TrackTags {
                title: &track.title,
                artist: &track.artist,
                album: &info.title,
                track_number: track.seq,
                track_total,
                source_url: Some(&track.url),
            };
            if let Err(err) = write_tags(&track.path, &tags) {
                warn!("failed to tag {}: {err}", track.path.display());
            }
        }
    }

    // Strict validation pass over what actually landed on disk.
    let list = library::load_tracks(&dir, &opts.extensions, &LoftyProbe)?;
    info!(
        "validated {} track(s), {} of audio",
        list.len(),
        format_hms(list.total_duration())
    );

    write_m3u(&dir.join("playlist.m3u"), list.tracks())?;

    let base = base_name(&dir);
    let target = MixTarget {
        dir: &dir,
        base: &base,
        date: Local::now().date_naive(),
        force: opts.force,
    };
    let mut mixes = Vec::new();
    if opts.concatenate {
        mixes.push(build_mix(&list, MixKind::Sequential, &target, None, &FfmpegMerge)?);
        if opts.randomize {
            mixes.push(build_mix(
                &list,
                MixKind::Randomized,
                &target,
                opts.seed,
                &FfmpegMerge,
            )?);
        }
    }

    write_report(
        &dir.join("playlist_info.txt"),
        &ReportInput {
            playlist_title: &info.title,
            source_url: &opts.url,
            date: target.date,
            tracks: list.tracks(),
            mixes: &mixes,
        },
    )?;

    Ok(FetchSummary {
        playlist_title: info.title,
        playlist_dir: dir,
        downloaded: downloaded.len(),
        skipped,
        mixes,
    })
}

/// Standalone reshuffle over an existing download directory. Reads the
/// per-track sources, never rewrites them.
pub fn run_reshuffle(opts: &ReshuffleOptions) -> Result<ReshuffleSummary> {
    let dir = fs::canonicalize(&opts.dir)?;
    let list = library::load_tracks(&dir, &opts.extensions, &LoftyProbe)?;

    let base = base_name(&dir);
    let target = MixTarget {
        dir: &dir,
        base: &base,
        date: Local::now().date_naive(),
        force: opts.force,
    };
    let mix = build_mix(&list, MixKind::Randomized, &target, opts.seed, &FfmpegMerge)?;

    Ok(ReshuffleSummary {
        tracks: list.len(),
        mix,
    })
}

/// Where a mix and its listing land, shared by both variants of one run.
struct MixTarget<'a> {
    dir: &'a Path,
    base: &'a str,
    date: NaiveDate,
    force: bool,
}

/// Build one mix variant plus its track listing document.
fn build_mix(
    list: &TrackList,
    kind: MixKind,
    target: &MixTarget<'_>,
    seed: Option<u64>,
    merge: &dyn Merge,
) -> Result<MixNote> {
    // Resolve both names up front so a same-day collision aborts before
    // any merge work happens.
    let mix_dest = mix_path(target.dir, kind, target.base, target.date, target.force)?;
    let listing_dest = listing_path(target.dir, kind, target.base, target.date, target.force)?;

    let mode = match kind {
        MixKind::Sequential => OrderMode::Sequential,
        MixKind::Randomized => OrderMode::Randomized,
    };
    let mut rng = rng_for(seed);
    let order = sequence(list, mode, &mut rng);

    let mix = concatenate(&order, merge, &mix_dest)?;
    fs::write(&listing_dest, build_listing(&mix, kind.label()).render())?;
    info!(
        "{} mix ready: {} with listing {}",
        kind.label(),
        mix_dest.display(),
        listing_dest.display()
    );

    Ok(MixNote {
        label: kind.label().to_string(),
        path: mix.path,
        total: mix.total,
    })
}

/// Mix base title: the playlist directory's name.
fn base_name(dir: &Path) -> String {
    dir.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("mix")
        .to_string()
}
