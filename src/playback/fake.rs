//! In-memory media surface for tests. Records every command and lets the
//! test deliver element events by hand.

use super::surface::{Generation, MediaSurface};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load(String, Generation),
    Release,
    Play(Generation),
    Pause,
    Seek(f64),
    Volume(f64),
    Muted(bool),
    Rate(f64),
}

#[derive(Debug, Default)]
pub struct FakeSurface {
    pub log: Vec<Command>,
    pub src: Option<String>,
    pub position: f64,
    pub volume: f64,
    pub muted: bool,
    pub rate: f64,
    pub paused: bool,
}

impl FakeSurface {
    pub fn new() -> Self {
        Self {
            volume: 1.0,
            rate: 1.0,
            paused: true,
            ..Self::default()
        }
    }

    pub fn clear_log(&mut self) {
        self.log.clear();
    }

    pub fn plays(&self) -> usize {
        self.count(|command| matches!(command, Command::Play(_)))
    }

    pub fn seeks(&self) -> Vec<f64> {
        self.log
            .iter()
            .filter_map(|command| match command {
                Command::Seek(position) => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn loads(&self) -> Vec<(String, Generation)> {
        self.log
            .iter()
            .filter_map(|command| match command {
                Command::Load(src, generation) => Some((src.clone(), *generation)),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&Command) -> bool) -> usize {
        self.log.iter().filter(|command| predicate(command)).count()
    }

    /// Position drifts as if the element played on its own clock.
    pub fn advance_to(&mut self, position: f64) {
        self.position = position;
    }
}

impl MediaSurface for FakeSurface {
    fn load(&mut self, src: &str, generation: Generation) {
        self.src = Some(src.to_string());
        self.position = 0.0;
        self.paused = true;
        self.log.push(Command::Load(src.to_string(), generation));
    }

    fn release(&mut self) {
        self.src = None;
        self.log.push(Command::Release);
    }

    fn play(&mut self, generation: Generation) {
        self.paused = false;
        self.log.push(Command::Play(generation));
    }

    fn pause(&mut self) {
        self.paused = true;
        self.log.push(Command::Pause);
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
        self.log.push(Command::Seek(seconds));
    }

    fn set_volume(&mut self, level: f64) {
        self.volume = level;
        self.log.push(Command::Volume(level));
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.log.push(Command::Muted(muted));
    }

    fn set_rate(&mut self, rate: f64) {
        self.rate = rate;
        self.log.push(Command::Rate(rate));
    }
}
