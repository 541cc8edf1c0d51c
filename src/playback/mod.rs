//! Platform-independent playback core.
//!
//! [`Transport`] owns the user's intent and drives a [`MediaSyncEngine`],
//! which owns the audio and video surfaces. Browser elements implement
//! [`MediaSurface`] in `components::audio_manager`; tests use an in-memory
//! fake.

mod engine;
mod error;
mod events;
mod intent;
mod shortcuts;
mod surface;
mod transport;

#[cfg(test)]
mod fake;
#[cfg(test)]
mod tests;

pub use engine::{MediaObservedState, MediaSources, MediaSyncEngine, SyncTolerances};
pub use error::MediaError;
pub use events::EngineEvent;
pub use intent::{PlaybackIntent, PlayerSnapshot, TransportPhase};
pub use shortcuts::{shortcut_action, ShortcutAction};
pub use surface::{Generation, MediaSurface, SurfaceEvent, SurfaceKind};
pub use transport::Transport;
