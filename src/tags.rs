//! ID3 tag writing for downloaded tracks.
//!
//! Tag failures are per-item recoverable: the pipeline logs them and keeps
//! going, so this module reports errors instead of aborting.

use std::path::Path;

use lofty::{ItemKey, Probe, TagExt, TaggedFileExt};
use log::debug;

/// Tag fields for one downloaded track.
pub struct TrackTags<'a> {
    pub title: &'a str,
    pub artist: &'a str,
    pub album: &'a str,
    pub track_number: u32,
    pub track_total: u32,
    pub source_url: Option<&'a str>,
}

/// Write (or replace) the standard fields on `path`, preserving any other
/// existing tag items.
pub fn write_tags(path: &Path, tags: &TrackTags<'_>) -> Result<(), lofty::error::LoftyError> {
    let mut tagged = Probe::open(path)?.read()?;

    let tag_type = tagged.primary_tag_type();
    let tag = match tagged.tag_mut(tag_type) {
        Some(tag) => tag,
        None => {
            tagged.insert_tag(lofty::Tag::new(tag_type));
            tagged.tag_mut(tag_type).unwrap()
        }
    };

    tag.insert_text(ItemKey::TrackTitle, tags.title.to_string());
    tag.insert_text(ItemKey::TrackArtist, tags.artist.to_string());
    tag.insert_text(ItemKey::AlbumTitle, tags.album.to_string());
    tag.insert_text(ItemKey::TrackNumber, tags.track_number.to_string());
    tag.insert_text(ItemKey::TrackTotal, tags.track_total.to_string());
    if let Some(url) = tags.source_url {
        tag.insert_text(ItemKey::Comment, url.to_string());
    }

    tag.save_to_path(path)?;
    debug!("tagged {}", path.display());
    Ok(())
}
