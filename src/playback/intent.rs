use crate::catalog::{format_duration, Track, TrackId};

/// The user's desired playback state. Only the transport mutates it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackIntent {
    pub track_id: Option<TrackId>,
    pub playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub shuffle: bool,
    pub repeat: bool,
    pub speed: f64,
    pub show_video: bool,
}

impl Default for PlaybackIntent {
    fn default() -> Self {
        Self {
            track_id: None,
            playing: false,
            current_time: 0.0,
            duration: 0.0,
            volume: 0.7,
            muted: false,
            shuffle: false,
            repeat: false,
            speed: 1.0,
            show_video: true,
        }
    }
}

impl PlaybackIntent {
    /// Level handed to the media: zero while muted.
    pub fn effective_volume(&self) -> f64 {
        if self.muted {
            0.0
        } else {
            self.volume
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportPhase {
    Idle,
    Loading,
    Playing,
    Paused,
    /// Audio for the current track could not be loaded.
    Failed,
}

impl TransportPhase {
    pub fn label(self) -> &'static str {
        match self {
            Self::Idle => "Nothing playing",
            Self::Loading => "Loading",
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Failed => "Unavailable",
        }
    }
}

/// Read-only view of the transport for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub track: Option<Track>,
    pub index: Option<usize>,
    pub phase: TransportPhase,
    /// What the screen shows: false while a rejected play is outstanding.
    pub is_playing: bool,
    pub wants_playing: bool,
    pub current_time: f64,
    pub duration: f64,
    pub volume: f64,
    pub muted: bool,
    pub effective_volume: f64,
    pub shuffle: bool,
    pub repeat: bool,
    pub speed: f64,
    pub show_video: bool,
    pub video_visible: bool,
    pub video_presentable: bool,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl PlayerSnapshot {
    pub fn elapsed_label(&self) -> String {
        format_duration(self.current_time)
    }

    pub fn remaining_label(&self) -> String {
        let remaining = (self.duration - self.current_time).max(0.0);
        format!("-{}", format_duration(remaining))
    }

    pub fn has_track(&self) -> bool {
        self.track.is_some()
    }
}
