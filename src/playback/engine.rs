//! Media synchronization engine.
//!
//! Owns the audio surface (timeline of record) and the video surface (a
//! follower) for the bound track, converges them toward the commands it
//! receives, and turns raw surface events into [`EngineEvent`]s.

use tracing::{debug, info, warn};

use super::error::MediaError;
use super::events::EngineEvent;
use super::surface::{Generation, MediaSurface, SurfaceEvent, SurfaceKind};
use crate::catalog::Track;
use crate::config::PlayerConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncTolerances {
    pub audio_secs: f64,
    pub video_secs: f64,
    pub quiet_window_ms: f64,
}

impl Default for SyncTolerances {
    fn default() -> Self {
        Self::from(&PlayerConfig::default())
    }
}

impl From<&PlayerConfig> for SyncTolerances {
    fn from(config: &PlayerConfig) -> Self {
        Self {
            audio_secs: config.audio_drift_tolerance_secs,
            video_secs: config.video_drift_tolerance_secs,
            quiet_window_ms: f64::from(config.seek_quiet_window_ms),
        }
    }
}

/// Sources to load for one track.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSources {
    pub audio: String,
    pub video: Option<String>,
}

impl From<&Track> for MediaSources {
    fn from(track: &Track) -> Self {
        Self {
            audio: track.audio_src.clone(),
            video: track.video_bg_src.clone(),
        }
    }
}

/// What the surfaces have reported for the bound track.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MediaObservedState {
    pub current_time: f64,
    pub duration: f64,
    pub audio_ready: bool,
    pub video_ready: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum VideoLayer {
    /// Track has no video, or nothing is bound.
    #[default]
    Absent,
    Loading,
    Ready,
    Failed,
    /// The browser refused to play the video; static background until the
    /// next play or show request.
    Rejected,
    /// Audio ran past the end of the video; a static background shows instead.
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum AudioPlay {
    #[default]
    Idle,
    Requested,
    Started,
    Rejected,
}

pub struct MediaSyncEngine<A, V> {
    audio: A,
    video: V,
    tolerances: SyncTolerances,
    generation: Generation,
    bound: bool,
    observed: MediaObservedState,
    audio_failed: bool,
    audio_play: AudioPlay,
    video_layer: VideoLayer,
    video_duration: Option<f64>,
    playing: bool,
    video_visible: bool,
    repeat: bool,
    volume: f64,
    muted: bool,
    speed: f64,
    quiet_until_ms: Option<f64>,
}

impl<A: MediaSurface, V: MediaSurface> MediaSyncEngine<A, V> {
    pub fn new(audio: A, video: V, tolerances: SyncTolerances) -> Self {
        Self {
            audio,
            video,
            tolerances,
            generation: Generation::default(),
            bound: false,
            observed: MediaObservedState::default(),
            audio_failed: false,
            audio_play: AudioPlay::Idle,
            video_layer: VideoLayer::Absent,
            video_duration: None,
            playing: false,
            video_visible: true,
            repeat: false,
            volume: 1.0,
            muted: false,
            speed: 1.0,
            quiet_until_ms: None,
        }
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn observed(&self) -> MediaObservedState {
        self.observed
    }

    /// Audio, and video when the track has one, are buffered enough to start.
    pub fn is_ready(&self) -> bool {
        self.bound
            && self.observed.audio_ready
            && !self.audio_failed
            && self.video_layer != VideoLayer::Loading
    }

    /// The video layer should be on screen instead of the static background.
    pub fn video_presentable(&self) -> bool {
        self.video_visible && self.video_layer == VideoLayer::Ready
    }

    /// Release the previous track's media and load `sources`.
    ///
    /// Returns the new generation; surface events tagged with any other
    /// generation are dropped from now on. Playback does not start until
    /// [`set_playing`](Self::set_playing) is called and the media is ready.
    pub fn bind(&mut self, sources: &MediaSources) -> Generation {
        self.release_surfaces();

        self.generation = self.generation.next();
        self.bound = true;
        self.observed = MediaObservedState::default();
        self.audio_failed = false;
        self.audio_play = AudioPlay::Idle;
        self.video_duration = None;
        self.playing = false;
        self.quiet_until_ms = None;

        self.audio.load(&sources.audio, self.generation);
        self.video_layer = match sources.video.as_deref() {
            Some(src) => {
                self.video.load(src, self.generation);
                VideoLayer::Loading
            }
            None => VideoLayer::Absent,
        };
        self.apply_output();

        info!(
            generation = %self.generation,
            audio = %sources.audio,
            video = sources.video.as_deref().unwrap_or("-"),
            "media bound"
        );
        self.generation
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        if playing {
            self.retry_rejected_video();
            self.start_if_ready();
        } else {
            self.audio_play = AudioPlay::Idle;
            self.audio.pause();
            self.video.pause();
        }
    }

    /// Move both surfaces to `time` where they drift past their tolerance.
    ///
    /// Returns whether any surface was repositioned; if so, observed time
    /// updates are held back for the quiet window starting at `now_ms`.
    pub fn seek(&mut self, time: f64, now_ms: f64) -> bool {
        if !self.bound || !time.is_finite() {
            return false;
        }

        let mut issued = false;
        let audio_drift = (self.audio.position() - time).abs();
        if audio_drift > self.tolerances.audio_secs {
            self.audio.set_position(time);
            issued = true;
        }
        issued |= self.follow_audio(time);

        if issued {
            self.quiet_until_ms = Some(now_ms + self.tolerances.quiet_window_ms);
            debug!(time, audio_drift, "seek issued");
        }
        issued
    }

    pub fn set_volume(&mut self, level: f64) {
        self.volume = level.clamp(0.0, 1.0);
        self.audio.set_volume(self.volume);
        self.video.set_volume(self.volume);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.audio.set_muted(muted);
    }

    pub fn set_speed(&mut self, multiplier: f64) {
        self.speed = multiplier;
        self.audio.set_rate(multiplier);
        self.video.set_rate(multiplier);
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.repeat = repeat;
    }

    pub fn set_video_visible(&mut self, visible: bool) {
        self.video_visible = visible;
        if !visible {
            self.video.pause();
            self.video.set_muted(true);
            return;
        }

        if self.retry_rejected_video() {
            self.resume_video();
            return;
        }

        if self.video_layer == VideoLayer::Ready {
            let target = self.audio.position();
            self.follow_audio(target);
            self.resume_video();
        }
    }

    /// Apply an event reported by one of the surfaces.
    pub fn handle_event(
        &mut self,
        generation: Generation,
        kind: SurfaceKind,
        event: SurfaceEvent,
        now_ms: f64,
    ) -> Vec<EngineEvent> {
        if !self.bound || generation != self.generation {
            debug!(
                %generation,
                current = %self.generation,
                surface = %kind,
                ?event,
                "dropping stale surface event"
            );
            return Vec::new();
        }

        match kind {
            SurfaceKind::Audio => self.handle_audio(event, now_ms),
            SurfaceKind::Video => self.handle_video(event),
        }
    }

    fn handle_audio(&mut self, event: SurfaceEvent, now_ms: f64) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        match event {
            SurfaceEvent::CanPlayThrough => {
                if !self.observed.audio_ready {
                    self.observed.audio_ready = true;
                    info!(generation = %self.generation, "audio ready");
                    events.push(EngineEvent::Ready(SurfaceKind::Audio));
                    self.start_if_ready();
                }
            }
            SurfaceEvent::Metadata { duration } => {
                if duration.is_finite() && duration > 0.0 && duration != self.observed.duration {
                    self.observed.duration = duration;
                    events.push(EngineEvent::DurationChange(duration));
                }
            }
            SurfaceEvent::TimeUpdate { position } => {
                self.observed.current_time = position;
                if self.in_quiet_window(now_ms) {
                    debug!(position, "time update suppressed after seek");
                    return events;
                }
                events.push(EngineEvent::TimeUpdate(position));
                self.follow_audio(position);
            }
            SurfaceEvent::Ended => {
                if self.repeat {
                    self.restart();
                    events.push(EngineEvent::Restarted);
                } else {
                    events.push(EngineEvent::Ended);
                }
            }
            SurfaceEvent::LoadFailed { reason } => {
                warn!(generation = %self.generation, %reason, "audio failed to load");
                self.audio_failed = true;
                self.audio_play = AudioPlay::Idle;
                self.audio.pause();
                self.video.pause();
                events.push(EngineEvent::Error(MediaError::Load {
                    surface: SurfaceKind::Audio,
                    reason,
                }));
            }
            SurfaceEvent::PlayStarted => {
                if self.playing {
                    self.audio_play = AudioPlay::Started;
                    events.push(EngineEvent::PlaybackStarted);
                } else {
                    // A play issued before the user paused resolved late.
                    debug!("audio started after pause was requested; pausing again");
                    self.audio.pause();
                }
            }
            SurfaceEvent::PlayRejected { reason } => {
                if self.playing {
                    warn!(%reason, "audio play rejected");
                    self.audio_play = AudioPlay::Rejected;
                    self.video.pause();
                    events.push(EngineEvent::Error(MediaError::PlaybackRejected {
                        surface: SurfaceKind::Audio,
                        reason,
                    }));
                }
            }
        }
        events
    }

    fn handle_video(&mut self, event: SurfaceEvent) -> Vec<EngineEvent> {
        let mut events = Vec::new();
        match event {
            SurfaceEvent::CanPlayThrough => {
                if self.video_layer == VideoLayer::Loading {
                    self.video_layer = VideoLayer::Ready;
                    self.observed.video_ready = true;
                    info!(generation = %self.generation, "video ready");
                    events.push(EngineEvent::Ready(SurfaceKind::Video));

                    let target = self.audio.position();
                    self.follow_audio(target);
                    self.start_if_ready();
                }
            }
            SurfaceEvent::Metadata { duration } => {
                if duration.is_finite() && duration > 0.0 {
                    debug!(duration, "video duration known");
                    self.video_duration = Some(duration);
                }
            }
            // Audio is the timeline of record; video positions never feed back.
            SurfaceEvent::TimeUpdate { .. } => {}
            SurfaceEvent::Ended => {
                if self.video_layer == VideoLayer::Ready {
                    if self.video_duration.is_none() {
                        self.video_duration = Some(self.video.position());
                    }
                    self.exhaust_video();
                }
            }
            SurfaceEvent::LoadFailed { reason } => {
                warn!(generation = %self.generation, %reason, "video failed to load; audio only");
                self.video_layer = VideoLayer::Failed;
                self.observed.video_ready = false;
                self.video.pause();
                self.video.release();
                events.push(EngineEvent::Error(MediaError::Load {
                    surface: SurfaceKind::Video,
                    reason,
                }));
                self.start_if_ready();
            }
            SurfaceEvent::PlayStarted => {
                if !(self.playing && self.video_presentable()) {
                    self.video.pause();
                }
            }
            SurfaceEvent::PlayRejected { reason } => {
                warn!(%reason, "video play rejected");
                if self.playing && self.video_layer == VideoLayer::Ready {
                    self.video_layer = VideoLayer::Rejected;
                    self.video.pause();
                    events.push(EngineEvent::Error(MediaError::PlaybackRejected {
                        surface: SurfaceKind::Video,
                        reason,
                    }));
                }
            }
        }
        events
    }

    fn start_if_ready(&mut self) {
        if !self.playing || !self.is_ready() {
            return;
        }
        if !matches!(self.audio_play, AudioPlay::Requested | AudioPlay::Started) {
            self.audio.play(self.generation);
            self.audio_play = AudioPlay::Requested;
        }
        self.resume_video();
    }

    fn resume_video(&mut self) {
        let audio_running = matches!(self.audio_play, AudioPlay::Requested | AudioPlay::Started);
        if self.playing && audio_running && self.video_presentable() {
            self.video.play(self.generation);
        }
    }

    /// Reconcile the video with an authoritative audio position. Returns
    /// whether the video was repositioned.
    fn follow_audio(&mut self, audio_position: f64) -> bool {
        if !matches!(self.video_layer, VideoLayer::Ready | VideoLayer::Exhausted) {
            return false;
        }

        if let Some(video_duration) = self.video_duration {
            if audio_position > video_duration {
                if self.video_layer == VideoLayer::Ready {
                    self.exhaust_video();
                }
                return false;
            }
            if self.video_layer == VideoLayer::Exhausted {
                debug!(audio_position, "audio back within video range");
                self.video_layer = VideoLayer::Ready;
                self.video.set_position(audio_position);
                self.resume_video();
                return true;
            }
        }

        if !self.video_visible {
            return false;
        }
        let drift = (self.video.position() - audio_position).abs();
        if drift > self.tolerances.video_secs {
            debug!(drift, audio_position, "video drift corrected");
            self.video.set_position(audio_position);
            return true;
        }
        false
    }

    /// Put a rejected video layer back in play, caught up to the audio.
    /// Returns whether there was one to retry.
    fn retry_rejected_video(&mut self) -> bool {
        if self.video_layer != VideoLayer::Rejected {
            return false;
        }
        debug!(generation = %self.generation, "retrying rejected video");
        self.video_layer = VideoLayer::Ready;
        let target = self.audio.position();
        self.follow_audio(target);
        true
    }

    fn exhaust_video(&mut self) {
        info!(generation = %self.generation, "video ended before audio; showing static background");
        self.video_layer = VideoLayer::Exhausted;
        self.video.pause();
    }

    fn restart(&mut self) {
        debug!(generation = %self.generation, "repeat: restarting at 0");
        self.quiet_until_ms = None;
        self.observed.current_time = 0.0;
        self.audio.set_position(0.0);
        if matches!(self.video_layer, VideoLayer::Ready | VideoLayer::Exhausted) {
            self.video_layer = VideoLayer::Ready;
            self.video.set_position(0.0);
        }
        // Ended media needs a fresh play command, but only if the latest
        // request is still to play.
        self.audio_play = AudioPlay::Idle;
        self.start_if_ready();
    }

    fn in_quiet_window(&mut self, now_ms: f64) -> bool {
        match self.quiet_until_ms {
            Some(until) if now_ms < until => true,
            Some(_) => {
                self.quiet_until_ms = None;
                false
            }
            None => false,
        }
    }

    fn apply_output(&mut self) {
        self.audio.set_volume(self.volume);
        self.audio.set_muted(self.muted);
        self.audio.set_rate(self.speed);
        // The audio element carries the sound; video stays silent.
        self.video.set_volume(self.volume);
        self.video.set_muted(true);
        self.video.set_rate(self.speed);
    }

    fn release_surfaces(&mut self) {
        if !self.bound {
            return;
        }
        self.audio.pause();
        self.audio.release();
        self.video.pause();
        self.video.release();
    }

    #[cfg(test)]
    pub(crate) fn audio(&self) -> &A {
        &self.audio
    }

    #[cfg(test)]
    pub(crate) fn video(&self) -> &V {
        &self.video
    }

    #[cfg(test)]
    pub(crate) fn surfaces_mut(&mut self) -> (&mut A, &mut V) {
        (&mut self.audio, &mut self.video)
    }
}
