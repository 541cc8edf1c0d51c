use serde::{Deserialize, Serialize};

use super::lyrics::{LyricLine, Lyrics};

pub type TrackId = u32;

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artist: String,
    pub album: String,
    pub album_art_url: String,
    pub audio_src: String,
    pub video_bg_src: Option<String>,
    pub lyrics: Lyrics,
}

impl Track {
    pub fn has_video(&self) -> bool {
        self.video_bg_src.is_some()
    }

    /// Text the catalog search matches against.
    pub fn search_text(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}

/// Track as written in the catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub id: TrackId,
    pub title: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub album: String,
    #[serde(default, alias = "albumArtUrl")]
    pub album_art_url: String,
    #[serde(alias = "audioSrc")]
    pub audio_src: String,
    #[serde(default, alias = "videoBgSrc")]
    pub video_bg_src: Option<String>,
    #[serde(default)]
    pub lyrics: Vec<LyricLine>,
    #[serde(default)]
    pub lrc: Option<String>,
}

impl From<TrackRecord> for Track {
    fn from(record: TrackRecord) -> Self {
        let lyrics = match record.lrc.as_deref() {
            Some(raw) if record.lyrics.is_empty() => Lyrics::from_lrc(raw),
            _ => Lyrics::new(record.lyrics),
        };

        Self {
            id: record.id,
            title: record.title,
            artist: record.artist,
            album: record.album,
            album_art_url: record.album_art_url,
            audio_src: record.audio_src.trim().to_string(),
            video_bg_src: record
                .video_bg_src
                .map(|src| src.trim().to_string())
                .filter(|src| !src.is_empty()),
            lyrics,
        }
    }
}

/// Format seconds as `m:ss`. Negative or non-finite input renders as `0:00`.
pub fn format_duration(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    let mins = whole / 60;
    let secs = whole % 60;
    format!("{}:{:02}", mins, secs)
}
