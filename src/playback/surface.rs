use std::fmt;

/// Which physical element a surface stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    Audio,
    Video,
}

impl SurfaceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::Video => "video",
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tag of one `bind`. Surface events carrying an older tag are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A media element that can load a source and take transport commands.
///
/// Commands return immediately. Anything that completes later (buffering,
/// metadata, the outcome of `play`) comes back as a [`SurfaceEvent`] tagged
/// with the generation passed to `load`/`play`.
pub trait MediaSurface {
    fn load(&mut self, src: &str, generation: Generation);
    /// Drop the current source and stop any network activity.
    fn release(&mut self);
    fn play(&mut self, generation: Generation);
    fn pause(&mut self);
    /// Position the element itself reports, in seconds.
    fn position(&self) -> f64;
    fn set_position(&mut self, seconds: f64);
    fn set_volume(&mut self, level: f64);
    fn set_muted(&mut self, muted: bool);
    fn set_rate(&mut self, rate: f64);
}

/// Notifications a surface reports back after a command.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    /// Enough data is buffered to play through.
    CanPlayThrough,
    Metadata { duration: f64 },
    TimeUpdate { position: f64 },
    Ended,
    LoadFailed { reason: String },
    PlayStarted,
    PlayRejected { reason: String },
}
