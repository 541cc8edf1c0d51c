//! The read-only track catalog the player browses and plays from.

mod error;
mod lyrics;
mod models;

pub use error::CatalogError;
pub use lyrics::{LyricLine, Lyrics};
pub use models::{format_duration, Track, TrackId, TrackRecord};

use std::collections::HashSet;
use tracing::{info, warn};

const BUNDLED_CATALOG: &str = include_str!("../../assets/catalog.json");

/// Ordered, validated track list. Ids are unique and every track has audio.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    tracks: Vec<Track>,
}

impl Catalog {
    pub fn new(tracks: Vec<Track>) -> Result<Self, CatalogError> {
        if tracks.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::with_capacity(tracks.len());
        for track in &tracks {
            if !seen.insert(track.id) {
                return Err(CatalogError::DuplicateId(track.id));
            }
            if track.audio_src.is_empty() {
                return Err(CatalogError::MissingAudio(track.id));
            }
            if !track.lyrics.is_sorted() {
                warn!(
                    track_id = track.id,
                    "lyric timestamps are out of order; highlighting falls back to a linear scan"
                );
            }
        }

        Ok(Self { tracks })
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let records: Vec<TrackRecord> = serde_json::from_str(raw)?;
        Self::new(records.into_iter().map(Track::from).collect())
    }

    /// The catalog compiled into the app.
    pub fn bundled() -> Result<Self, CatalogError> {
        let catalog = Self::from_json(BUNDLED_CATALOG)?;
        info!(tracks = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn position_of(&self, id: TrackId) -> Option<usize> {
        self.tracks.iter().position(|track| track.id == id)
    }

    /// Indices of tracks whose title or artist contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<usize> {
        let needle = query.trim().to_lowercase();
        self.tracks
            .iter()
            .enumerate()
            .filter(|(_, track)| {
                needle.is_empty() || track.search_text().to_lowercase().contains(&needle)
            })
            .map(|(index, _)| index)
            .collect()
    }
}
