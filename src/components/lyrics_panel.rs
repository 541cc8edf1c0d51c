// Scrolling lyrics for the now-playing view.

use crate::catalog::{Track, TrackId};
use crate::components::{now_millis, PlayerSignal};
use dioxus::prelude::*;

const SCROLL_CONTAINER_ID: &str = "lyrics-scroll";
const MANUAL_SCROLL_HOLD_MS: f64 = 1_800.0;
const PROGRAMMATIC_SCROLL_MS: f64 = 250.0;

#[component]
pub fn LyricsPanel(track: Track, current_time: f64) -> Element {
    let mut player = use_context::<PlayerSignal>().0;
    let mut programmatic_scroll_until_ms = use_signal(|| 0.0_f64);
    let mut manual_scroll_hold_until_ms = use_signal(|| 0.0_f64);
    let mut last_centered = use_signal(|| None::<(TrackId, usize)>);

    let active_index = track.lyrics.active_index(current_time);

    let on_lyrics_scrolled = move |_: Event<ScrollData>| {
        let now = now_millis();
        if now < *programmatic_scroll_until_ms.peek() {
            return;
        }
        manual_scroll_hold_until_ms.set(now + MANUAL_SCROLL_HOLD_MS);
        last_centered.set(None);
    };

    // Keep the active line centred unless the user scrolled recently.
    use_effect(move || {
        let (track_id, active) = {
            let transport = player.read();
            let Some(track) = transport.current_track() else {
                return;
            };
            (
                track.id,
                track.lyrics.active_index(transport.intent().current_time),
            )
        };
        let Some(index) = active else {
            return;
        };
        if now_millis() < *manual_scroll_hold_until_ms.peek() {
            return;
        }
        if *last_centered.peek() == Some((track_id, index)) {
            return;
        }

        let line_id = format!("{SCROLL_CONTAINER_ID}-line-{index}");
        let script = format!(
            r#"(function() {{
                const container = document.getElementById("{SCROLL_CONTAINER_ID}");
                const line = document.getElementById("{line_id}");
                if (!container || !line) return;
                const cRect = container.getBoundingClientRect();
                const lRect = line.getBoundingClientRect();
                const target = container.scrollTop + (lRect.top - cRect.top) - (cRect.height / 2) + (lRect.height / 2);
                container.scrollTo({{ top: target, behavior: "smooth" }});
            }})();"#
        );
        let _ = document::eval(&script);
        programmatic_scroll_until_ms.set(now_millis() + PROGRAMMATIC_SCROLL_MS);
        last_centered.set(Some((track_id, index)));
    });

    if track.lyrics.is_empty() {
        return rsx! {
            div { class: "lyrics-panel is-empty",
                p { class: "lyrics-empty", "No lyrics for this track." }
            }
        };
    }

    rsx! {
        div {
            id: SCROLL_CONTAINER_ID,
            class: "lyrics-panel",
            onscroll: on_lyrics_scrolled,
            for (index, line) in track.lyrics.lines().iter().enumerate() {
                button {
                    key: "{index}",
                    id: format!("{SCROLL_CONTAINER_ID}-line-{index}"),
                    r#type: "button",
                    class: lyric_line_class(index, active_index),
                    onclick: {
                        let target = line.timestamp_seconds;
                        move |_| player.write().seek(target, now_millis())
                    },
                    "{line.text}"
                }
            }
        }
    }
}

/// Lines before the active one read as sung; the rest as upcoming.
fn lyric_line_class(index: usize, active_index: Option<usize>) -> &'static str {
    match active_index {
        Some(active) if index == active => "lyric-line is-active",
        Some(active) if index < active => "lyric-line is-past",
        _ => "lyric-line",
    }
}
