use thiserror::Error;

use super::surface::SurfaceKind;

/// Failures reported by media surfaces. These travel as events, never as
/// `Err` returns across the async boundary.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MediaError {
    #[error("{surface} failed to load: {reason}")]
    Load { surface: SurfaceKind, reason: String },

    #[error("{surface} playback was blocked: {reason}")]
    PlaybackRejected { surface: SurfaceKind, reason: String },
}

impl MediaError {
    pub fn surface(&self) -> SurfaceKind {
        match self {
            Self::Load { surface, .. } | Self::PlaybackRejected { surface, .. } => *surface,
        }
    }

    /// Audio load failures stop the track; everything else degrades.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::Load {
                surface: SurfaceKind::Audio,
                ..
            }
        )
    }

    /// Short text for the player's notice area.
    pub fn user_message(&self) -> String {
        match self {
            Self::Load {
                surface: SurfaceKind::Audio,
                ..
            } => "Unable to load this track.".to_string(),
            Self::Load {
                surface: SurfaceKind::Video,
                ..
            } => "Video background unavailable, playing audio only.".to_string(),
            Self::PlaybackRejected {
                surface: SurfaceKind::Audio,
                ..
            } => "Playback was blocked. Press play to start.".to_string(),
            Self::PlaybackRejected {
                surface: SurfaceKind::Video,
                ..
            } => "Video background was blocked. Press play to try again.".to_string(),
        }
    }
}
