//! Player settings read once at startup.
//!
//! Values come from the bundled `assets/player.json`; any field missing from the
//! file falls back to its default, and a file that fails to parse falls back to
//! [`PlayerConfig::default`] as a whole.

use serde::{Deserialize, Serialize};
use tracing::warn;

const BUNDLED_CONFIG: &str = include_str!("../../assets/player.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerConfig {
    #[serde(default = "default_audio_drift_tolerance_secs")]
    pub audio_drift_tolerance_secs: f64,
    #[serde(default = "default_video_drift_tolerance_secs")]
    pub video_drift_tolerance_secs: f64,
    #[serde(default = "default_seek_quiet_window_ms")]
    pub seek_quiet_window_ms: u32,
    #[serde(default = "default_volume")]
    pub default_volume: f64,
    #[serde(default = "default_volume_step")]
    pub volume_step: f64,
    #[serde(default = "default_speed_options")]
    pub speed_options: Vec<f64>,
    #[serde(default = "default_min_speed")]
    pub min_speed: f64,
    #[serde(default = "default_max_speed")]
    pub max_speed: f64,
}

fn default_audio_drift_tolerance_secs() -> f64 {
    0.5
}

fn default_video_drift_tolerance_secs() -> f64 {
    0.3
}

fn default_seek_quiet_window_ms() -> u32 {
    200
}

fn default_volume() -> f64 {
    0.7
}

fn default_volume_step() -> f64 {
    0.1
}

fn default_speed_options() -> Vec<f64> {
    vec![0.5, 0.75, 1.0, 1.25, 1.5, 2.0]
}

fn default_min_speed() -> f64 {
    0.25
}

fn default_max_speed() -> f64 {
    4.0
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            audio_drift_tolerance_secs: default_audio_drift_tolerance_secs(),
            video_drift_tolerance_secs: default_video_drift_tolerance_secs(),
            seek_quiet_window_ms: default_seek_quiet_window_ms(),
            default_volume: default_volume(),
            volume_step: default_volume_step(),
            speed_options: default_speed_options(),
            min_speed: default_min_speed(),
            max_speed: default_max_speed(),
        }
    }
}

impl PlayerConfig {
    /// Load the configuration shipped with the app.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_CONFIG)
    }

    pub fn from_json(raw: &str) -> Self {
        match serde_json::from_str::<PlayerConfig>(raw) {
            Ok(config) => config.normalized(),
            Err(err) => {
                warn!("invalid player config, using defaults: {err}");
                Self::default()
            }
        }
    }

    /// Replace out-of-range values with their defaults so the playback core
    /// never sees a negative tolerance or a non-positive speed.
    pub fn normalized(mut self) -> Self {
        let defaults = Self::default();

        if !is_non_negative(self.audio_drift_tolerance_secs) {
            warn!(
                value = self.audio_drift_tolerance_secs,
                "audio drift tolerance out of range"
            );
            self.audio_drift_tolerance_secs = defaults.audio_drift_tolerance_secs;
        }
        if !is_non_negative(self.video_drift_tolerance_secs) {
            warn!(
                value = self.video_drift_tolerance_secs,
                "video drift tolerance out of range"
            );
            self.video_drift_tolerance_secs = defaults.video_drift_tolerance_secs;
        }
        if !(self.default_volume.is_finite() && (0.0..=1.0).contains(&self.default_volume)) {
            self.default_volume = defaults.default_volume;
        }
        if !(self.volume_step.is_finite() && self.volume_step > 0.0 && self.volume_step <= 1.0) {
            self.volume_step = defaults.volume_step;
        }
        if !(is_positive(self.min_speed) && is_positive(self.max_speed))
            || self.min_speed > self.max_speed
        {
            warn!(
                min = self.min_speed,
                max = self.max_speed,
                "speed range out of range"
            );
            self.min_speed = defaults.min_speed;
            self.max_speed = defaults.max_speed;
        }

        let (min, max) = (self.min_speed, self.max_speed);
        self.speed_options
            .retain(|speed| is_positive(*speed) && (min..=max).contains(speed));
        if self.speed_options.is_empty() {
            self.speed_options = vec![1.0];
        }

        self
    }
}

fn is_non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

fn is_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
