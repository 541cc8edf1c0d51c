//! Events the synchronization engine emits for the transport to absorb.

use super::error::MediaError;
use super::surface::SurfaceKind;

#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A surface buffered enough to play.
    Ready(SurfaceKind),
    /// Audio position, outside any seek quiet window.
    TimeUpdate(f64),
    /// Audio duration became known or changed.
    DurationChange(f64),
    /// Audio reached its end and repeat is off.
    Ended,
    /// Audio reached its end with repeat on and was restarted at 0.
    Restarted,
    /// The audio surface confirmed a play command.
    PlaybackStarted,
    Error(MediaError),
}
