//! Transport state machine: the single owner of [`PlaybackIntent`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::engine::{MediaSources, MediaSyncEngine};
use super::error::MediaError;
use super::events::EngineEvent;
use super::intent::{PlaybackIntent, PlayerSnapshot, TransportPhase};
use super::shortcuts::ShortcutAction;
use super::surface::{Generation, MediaSurface, SurfaceEvent, SurfaceKind};
use crate::catalog::{Catalog, Track, TrackId};
use crate::config::PlayerConfig;

/// Per-track outcome of the media, cleared on every selection.
#[derive(Debug, Clone, Default)]
struct TrackStatus {
    load_error: Option<MediaError>,
    rejected: bool,
    video_forced_off: bool,
    notice: Option<String>,
}

pub struct Transport<A, V> {
    catalog: Catalog,
    engine: MediaSyncEngine<A, V>,
    intent: PlaybackIntent,
    current_index: Option<usize>,
    status: TrackStatus,
    seek_pending_until_ms: Option<f64>,
    quiet_window_ms: f64,
    volume_step: f64,
    min_speed: f64,
    max_speed: f64,
    rng: StdRng,
}

impl<A: MediaSurface, V: MediaSurface> Transport<A, V> {
    pub fn new(catalog: Catalog, mut engine: MediaSyncEngine<A, V>, config: &PlayerConfig) -> Self {
        let intent = PlaybackIntent {
            volume: config.default_volume,
            ..PlaybackIntent::default()
        };
        engine.set_volume(intent.effective_volume());
        engine.set_muted(intent.muted);
        engine.set_speed(intent.speed);
        engine.set_repeat(intent.repeat);
        engine.set_video_visible(intent.show_video);

        Self {
            catalog,
            engine,
            intent,
            current_index: None,
            status: TrackStatus::default(),
            seek_pending_until_ms: None,
            quiet_window_ms: f64::from(config.seek_quiet_window_ms),
            volume_step: config.volume_step,
            min_speed: config.min_speed,
            max_speed: config.max_speed,
            rng: StdRng::from_entropy(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn intent(&self) -> &PlaybackIntent {
        &self.intent
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_index.and_then(|index| self.catalog.get(index))
    }

    /// Generation of the media currently bound; surface events must carry it.
    pub fn generation(&self) -> Generation {
        self.engine.generation()
    }

    pub fn phase(&self) -> TransportPhase {
        if self.current_index.is_none() {
            return TransportPhase::Idle;
        }
        if self.status.load_error.is_some() {
            return TransportPhase::Failed;
        }
        if !self.engine.is_ready() {
            return TransportPhase::Loading;
        }
        if self.intent.playing && !self.status.rejected {
            TransportPhase::Playing
        } else {
            TransportPhase::Paused
        }
    }

    pub fn select_track(&mut self, id: TrackId) -> bool {
        match self.catalog.position_of(id) {
            Some(index) => {
                self.load_index(index);
                true
            }
            None => {
                warn!(track_id = id, "select_track: unknown track id");
                false
            }
        }
    }

    pub fn play_pause(&mut self) {
        match self.phase() {
            TransportPhase::Idle => {}
            TransportPhase::Failed => {
                if let Some(index) = self.current_index {
                    info!(index, "retrying track after load failure");
                    self.load_index(index);
                }
            }
            _ if self.status.rejected => {
                // The intent already says play; the user gesture lets it through.
                self.status.rejected = false;
                self.status.notice = None;
                self.intent.playing = true;
                self.engine.set_playing(true);
            }
            _ => {
                self.intent.playing = !self.intent.playing;
                self.engine.set_playing(self.intent.playing);
            }
        }
    }

    pub fn next(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let len = self.catalog.len();
        let index = if self.intent.shuffle {
            self.rng.gen_range(0..len)
        } else {
            match self.current_index {
                Some(index) => (index + 1) % len,
                None => 0,
            }
        };
        self.load_index(index);
    }

    pub fn previous(&mut self) {
        if self.catalog.is_empty() {
            return;
        }
        let len = self.catalog.len();
        let index = if self.intent.shuffle {
            self.rng.gen_range(0..len)
        } else {
            match self.current_index {
                Some(index) => (index + len - 1) % len,
                None => len - 1,
            }
        };
        self.load_index(index);
    }

    /// Clamp `time` into the track and move the media there.
    pub fn seek(&mut self, time: f64, now_ms: f64) {
        if self.current_index.is_none() || time.is_nan() {
            return;
        }

        let upper = if self.intent.duration > 0.0 {
            self.intent.duration
        } else {
            f64::INFINITY
        };
        let target = time.clamp(0.0, upper);
        if !target.is_finite() {
            return;
        }

        self.intent.current_time = target;
        if self.engine.seek(target, now_ms) {
            self.seek_pending_until_ms = Some(now_ms + self.quiet_window_ms);
        }
    }

    /// Setting the volume to zero mutes; raising it never unmutes.
    pub fn set_volume(&mut self, level: f64) {
        if level.is_nan() {
            return;
        }
        self.intent.volume = level.clamp(0.0, 1.0);
        if self.intent.volume == 0.0 {
            self.intent.muted = true;
        }
        self.sync_output();
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.intent.muted = muted;
        self.sync_output();
    }

    pub fn toggle_mute(&mut self) {
        self.set_muted(!self.intent.muted);
    }

    pub fn set_shuffle(&mut self, shuffle: bool) {
        self.intent.shuffle = shuffle;
    }

    pub fn set_repeat(&mut self, repeat: bool) {
        self.intent.repeat = repeat;
        self.engine.set_repeat(repeat);
    }

    pub fn set_speed(&mut self, multiplier: f64) {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            warn!(multiplier, "ignoring invalid playback speed");
            return;
        }
        self.intent.speed = multiplier.clamp(self.min_speed, self.max_speed);
        self.engine.set_speed(self.intent.speed);
    }

    pub fn set_video_visible(&mut self, visible: bool) {
        self.intent.show_video = visible;
        let visible = self.video_visible();
        self.engine.set_video_visible(visible);
    }

    pub fn apply_shortcut(&mut self, action: ShortcutAction) {
        debug!(?action, "keyboard shortcut");
        match action {
            ShortcutAction::PlayPause => self.play_pause(),
            ShortcutAction::Next => self.next(),
            ShortcutAction::Previous => self.previous(),
            ShortcutAction::VolumeUp => self.step_volume(self.volume_step),
            ShortcutAction::VolumeDown => self.step_volume(-self.volume_step),
            ShortcutAction::ToggleMute => self.toggle_mute(),
        }
    }

    /// Feed one media element event through the engine and absorb the result.
    pub fn on_surface_event(
        &mut self,
        kind: SurfaceKind,
        generation: Generation,
        event: SurfaceEvent,
        now_ms: f64,
    ) {
        for engine_event in self.engine.handle_event(generation, kind, event, now_ms) {
            self.absorb(engine_event, now_ms);
        }
    }

    /// Transient message about the current track, if any.
    pub fn notice(&self) -> Option<&str> {
        self.status.notice.as_deref()
    }

    pub fn video_presentable(&self) -> bool {
        self.engine.video_presentable()
    }

    pub fn clear_notice(&mut self) {
        self.status.notice = None;
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        let phase = self.phase();
        PlayerSnapshot {
            track: self.current_track().cloned(),
            index: self.current_index,
            phase,
            is_playing: phase == TransportPhase::Playing,
            wants_playing: self.intent.playing,
            current_time: self.intent.current_time,
            duration: self.intent.duration,
            volume: self.intent.volume,
            muted: self.intent.muted,
            effective_volume: self.intent.effective_volume(),
            shuffle: self.intent.shuffle,
            repeat: self.intent.repeat,
            speed: self.intent.speed,
            show_video: self.intent.show_video,
            video_visible: self.video_visible(),
            video_presentable: self.engine.video_presentable(),
            error: self
                .status
                .load_error
                .as_ref()
                .map(MediaError::user_message),
            notice: self.status.notice.clone(),
        }
    }

    fn load_index(&mut self, index: usize) {
        let Some(track) = self.catalog.get(index) else {
            warn!(index, "track index out of range");
            return;
        };
        let sources = MediaSources::from(track);
        info!(track_id = track.id, title = %track.title, index, "track selected");

        self.current_index = Some(index);
        self.intent.track_id = Some(track.id);
        self.intent.current_time = 0.0;
        self.intent.duration = 0.0;
        self.intent.playing = true;
        self.status = TrackStatus::default();
        self.seek_pending_until_ms = None;

        self.engine.bind(&sources);
        let visible = self.video_visible();
        self.engine.set_video_visible(visible);
        self.engine.set_playing(true);
    }

    fn absorb(&mut self, event: EngineEvent, now_ms: f64) {
        match event {
            EngineEvent::Ready(kind) => debug!(surface = %kind, "surface ready"),
            EngineEvent::TimeUpdate(time) => {
                if self.seek_pending(now_ms) {
                    debug!(time, "time update held back by pending seek");
                } else {
                    self.intent.current_time = time;
                }
            }
            EngineEvent::DurationChange(duration) => {
                self.intent.duration = duration;
            }
            EngineEvent::Restarted => {
                self.seek_pending_until_ms = None;
                self.intent.current_time = 0.0;
            }
            EngineEvent::Ended => {
                if self.intent.repeat {
                    warn!("track ended with repeat on; advancing");
                }
                self.next();
            }
            EngineEvent::PlaybackStarted => {
                self.status.rejected = false;
            }
            EngineEvent::Error(err) => self.absorb_error(err),
        }
    }

    fn absorb_error(&mut self, err: MediaError) {
        warn!(surface = %err.surface(), error = %err, "media error");
        self.status.notice = Some(err.user_message());
        match err {
            MediaError::Load {
                surface: SurfaceKind::Audio,
                ..
            } => {
                self.intent.playing = false;
                self.engine.set_playing(false);
                self.status.load_error = Some(err);
            }
            MediaError::Load {
                surface: SurfaceKind::Video,
                ..
            } => {
                self.status.video_forced_off = true;
            }
            MediaError::PlaybackRejected {
                surface: SurfaceKind::Audio,
                ..
            } => {
                self.status.rejected = true;
            }
            // The engine already fell back to the static background.
            MediaError::PlaybackRejected {
                surface: SurfaceKind::Video,
                ..
            } => {}
        }
    }

    fn seek_pending(&mut self, now_ms: f64) -> bool {
        match self.seek_pending_until_ms {
            Some(until) if now_ms < until => true,
            Some(_) => {
                self.seek_pending_until_ms = None;
                false
            }
            None => false,
        }
    }

    fn step_volume(&mut self, delta: f64) {
        let stepped = ((self.intent.volume + delta) * 100.0).round() / 100.0;
        self.set_volume(stepped);
    }

    fn video_visible(&self) -> bool {
        self.intent.show_video && !self.status.video_forced_off
    }

    fn sync_output(&mut self) {
        self.engine.set_volume(self.intent.effective_volume());
        self.engine.set_muted(self.intent.muted);
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &MediaSyncEngine<A, V> {
        &self.engine
    }
}
