//! Track listing documents for finished mixes.
//!
//! A listing exposes the same data twice: structured entries for
//! programmatic reuse (the run report feeds off them) and a rendered text
//! document for navigation while listening. Offsets are floored to whole
//! seconds — rounding up would overshoot into the next track when
//! scrubbing.

use std::time::Duration;

use crate::concat::MixResult;

/// One track's row in a listing. Offsets are whole seconds from the start
/// of the mix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingEntry {
    /// 1-based position in this mix's playback order.
    pub number: usize,
    pub title: String,
    pub start_secs: u64,
    pub end_secs: u64,
}

/// Structured listing plus its rendered form.
#[derive(Debug)]
pub struct Listing {
    pub label: String,
    pub total_secs: u64,
    pub entries: Vec<ListingEntry>,
}

/// Derive a listing from a finished mix. Pure function of its input:
/// calling it twice on the same [`MixResult`] renders byte-identical text.
pub fn build_listing(mix: &MixResult<'_>, label: &str) -> Listing {
    let entries = mix
        .stamps
        .iter()
        .enumerate()
        .map(|(i, stamp)| ListingEntry {
            number: i + 1,
            title: stamp.track.title.clone(),
            start_secs: stamp.start.as_secs(),
            end_secs: stamp.end.as_secs(),
        })
        .collect();

    Listing {
        label: label.to_string(),
        total_secs: mix.total.as_secs(),
        entries,
    }
}

impl Listing {
    pub fn render(&self) -> String {
        let bar = "=".repeat(64);
        let mut out = String::new();
        out.push_str(&format!("{bar}\n{} TRACK LISTING\n{bar}\n\n", self.label.to_uppercase()));
        out.push_str(&format!("Tracks: {}\n", self.entries.len()));
        out.push_str(&format!(
            "Total duration: {}\n\n",
            format_secs(self.total_secs)
        ));
        for entry in &self.entries {
            out.push_str(&format!(
                "Track {}: {} | Start: {} | End: {}\n",
                entry.number,
                entry.title,
                format_secs(entry.start_secs),
                format_secs(entry.end_secs)
            ));
        }
        out
    }
}

/// HH:MM:SS, floored to the second.
pub fn format_hms(duration: Duration) -> String {
    format_secs(duration.as_secs())
}

fn format_secs(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}
