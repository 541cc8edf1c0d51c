use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    #[serde(alias = "time")]
    pub timestamp_seconds: f64,
    pub text: String,
}

impl LyricLine {
    pub fn new(timestamp_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            timestamp_seconds,
            text: text.into(),
        }
    }
}

/// Timed lyric lines of one track.
///
/// Sortedness is checked once on construction so that the per-frame cursor
/// lookup can binary search; unsorted input keeps the linear-scan semantics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lyrics {
    lines: Vec<LyricLine>,
    sorted: bool,
}

impl Lyrics {
    pub fn new(lines: Vec<LyricLine>) -> Self {
        let sorted = is_sorted(&lines);
        Self { lines, sorted }
    }

    /// Parse LRC text (`[mm:ss.xx] text`). Lines may carry several stamps and
    /// come out sorted by time; metadata tags such as `[ar:...]` are skipped.
    pub fn from_lrc(raw_lrc: &str) -> Self {
        Self::new(parse_lrc_lines(raw_lrc))
    }

    pub fn lines(&self) -> &[LyricLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// Index of the last line whose timestamp is at or before `playback_seconds`.
    ///
    /// Among equal timestamps the highest index wins. Returns `None` when there
    /// are no lines or playback has not reached the first one.
    pub fn active_index(&self, playback_seconds: f64) -> Option<usize> {
        if self.sorted {
            active_index_sorted(&self.lines, playback_seconds)
        } else {
            active_index_linear(&self.lines, playback_seconds)
        }
    }
}

fn is_sorted(lines: &[LyricLine]) -> bool {
    lines
        .windows(2)
        .all(|pair| pair[0].timestamp_seconds <= pair[1].timestamp_seconds)
}

fn active_index_sorted(lines: &[LyricLine], playback_seconds: f64) -> Option<usize> {
    lines
        .partition_point(|line| line.timestamp_seconds <= playback_seconds)
        .checked_sub(1)
}

fn active_index_linear(lines: &[LyricLine], playback_seconds: f64) -> Option<usize> {
    lines
        .iter()
        .rposition(|line| line.timestamp_seconds <= playback_seconds)
}

fn parse_lrc_lines(raw_lrc: &str) -> Vec<LyricLine> {
    let mut lines = Vec::<LyricLine>::new();

    for raw_line in raw_lrc.lines() {
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let mut timestamps = Vec::<f64>::new();
        let mut rest = trimmed;

        while rest.starts_with('[') {
            let Some(end_index) = rest.find(']') else {
                break;
            };
            if let Some(value) = parse_lrc_timestamp(&rest[1..end_index]) {
                timestamps.push(value);
            }
            rest = &rest[end_index + 1..];
        }

        let text = rest.trim();
        if timestamps.is_empty() || text.is_empty() {
            continue;
        }

        for timestamp in timestamps {
            lines.push(LyricLine::new(timestamp, text));
        }
    }

    // Stable sort keeps file order for lines sharing a stamp.
    lines.sort_by(|left, right| {
        left.timestamp_seconds
            .partial_cmp(&right.timestamp_seconds)
            .unwrap_or(Ordering::Equal)
    });

    lines
}

fn parse_lrc_timestamp(token: &str) -> Option<f64> {
    let mut segments = token.split(':').collect::<Vec<_>>();
    if segments.len() < 2 || segments.len() > 3 {
        return None;
    }

    let seconds = segments.pop()?.replace(',', ".").parse::<f64>().ok()?;
    let minutes = segments.pop()?.trim().parse::<f64>().ok()?;
    let hours = match segments.pop() {
        Some(hours_segment) => hours_segment.trim().parse::<f64>().ok()?,
        None => 0.0,
    };

    let total = hours * 3600.0 + minutes * 60.0 + seconds;
    (total.is_finite() && total >= 0.0).then_some(total)
}
