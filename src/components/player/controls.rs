use crate::components::{Icon, PlayerSignal};
use crate::playback::TransportPhase;
use dioxus::prelude::*;

const CONTROL_CLASS: &str = "control-btn";

fn toggle_class(active: bool) -> String {
    if active {
        format!("{CONTROL_CLASS} is-active")
    } else {
        CONTROL_CLASS.to_string()
    }
}

#[component]
pub(super) fn PlayPauseButton() -> Element {
    let mut player = use_context::<PlayerSignal>().0;
    let snapshot = player.read().snapshot();

    let icon = match snapshot.phase {
        TransportPhase::Loading if snapshot.wants_playing => "loader",
        _ if snapshot.is_playing => "pause",
        _ => "play",
    };
    let label = if snapshot.is_playing { "Pause" } else { "Play" };

    rsx! {
        button {
            id: "play-pause-btn",
            r#type: "button",
            class: "play-btn",
            aria_label: "{label}",
            disabled: !snapshot.has_track(),
            onclick: move |_| player.write().play_pause(),
            Icon { name: icon.to_string(), class: "icon-lg".to_string() }
        }
    }
}

#[component]
pub(super) fn PrevButton() -> Element {
    let mut player = use_context::<PlayerSignal>().0;

    rsx! {
        button {
            id: "prev-btn",
            r#type: "button",
            class: CONTROL_CLASS,
            aria_label: "Previous track",
            onclick: move |_| player.write().previous(),
            Icon { name: "prev".to_string(), class: "icon".to_string() }
        }
    }
}

#[component]
pub(super) fn NextButton() -> Element {
    let mut player = use_context::<PlayerSignal>().0;

    rsx! {
        button {
            id: "next-btn",
            r#type: "button",
            class: CONTROL_CLASS,
            aria_label: "Next track",
            onclick: move |_| player.write().next(),
            Icon { name: "next".to_string(), class: "icon".to_string() }
        }
    }
}

#[component]
pub(super) fn ShuffleButton() -> Element {
    let mut player = use_context::<PlayerSignal>().0;
    let shuffle = player.read().intent().shuffle;

    rsx! {
        button {
            id: "shuffle-btn",
            r#type: "button",
            class: toggle_class(shuffle),
            aria_label: "Shuffle",
            aria_pressed: "{shuffle}",
            onclick: move |_| player.write().set_shuffle(!shuffle),
            Icon { name: "shuffle".to_string(), class: "icon-sm".to_string() }
        }
    }
}

#[component]
pub(super) fn RepeatButton() -> Element {
    let mut player = use_context::<PlayerSignal>().0;
    let repeat = player.read().intent().repeat;

    rsx! {
        button {
            id: "repeat-btn",
            r#type: "button",
            class: toggle_class(repeat),
            aria_label: "Repeat track",
            aria_pressed: "{repeat}",
            onclick: move |_| player.write().set_repeat(!repeat),
            Icon { name: "repeat".to_string(), class: "icon-sm".to_string() }
        }
    }
}

#[component]
pub(super) fn VolumeControl() -> Element {
    let mut player = use_context::<PlayerSignal>().0;
    let (volume, muted) = {
        let transport = player.read();
        (transport.intent().volume, transport.intent().muted)
    };
    let percent = (volume * 100.0).round() as i32;

    rsx! {
        div { class: "volume-control",
            button {
                id: "mute-btn",
                r#type: "button",
                class: toggle_class(muted),
                aria_label: if muted { "Unmute" } else { "Mute" },
                onclick: move |_| player.write().toggle_mute(),
                Icon {
                    name: if muted { "volume-x".to_string() } else { "volume".to_string() },
                    class: "icon-sm".to_string(),
                }
            }
            input {
                r#type: "range",
                class: "volume-slider",
                aria_label: "Volume",
                min: "0",
                max: "100",
                value: "{percent}",
                oninput: move |e: Event<FormData>| {
                    if let Ok(value) = e.value().parse::<f64>() {
                        player.write().set_volume(value / 100.0);
                    }
                },
            }
        }
    }
}

#[component]
pub(super) fn SpeedSelect(options: Vec<f64>) -> Element {
    let mut player = use_context::<PlayerSignal>().0;
    let speed = player.read().intent().speed;

    rsx! {
        select {
            class: "speed-select",
            aria_label: "Playback speed",
            onchange: move |e: Event<FormData>| {
                if let Ok(value) = e.value().parse::<f64>() {
                    player.write().set_speed(value);
                }
            },
            for choice in options.iter().copied() {
                option {
                    key: "{choice}",
                    value: "{choice}",
                    selected: (choice - speed).abs() < f64::EPSILON,
                    "{choice}x"
                }
            }
        }
    }
}

#[component]
pub(super) fn VideoToggleButton() -> Element {
    let mut player = use_context::<PlayerSignal>().0;
    let snapshot = player.read().snapshot();
    let has_video = snapshot
        .track
        .as_ref()
        .map(|track| track.has_video())
        .unwrap_or(false);
    let show_video = snapshot.show_video;

    rsx! {
        button {
            id: "video-toggle-btn",
            r#type: "button",
            class: toggle_class(show_video && has_video),
            aria_label: if show_video { "Hide video" } else { "Show video" },
            disabled: !has_video,
            onclick: move |_| player.write().set_video_visible(!show_video),
            Icon {
                name: if show_video { "video".to_string() } else { "video-off".to_string() },
                class: "icon-sm".to_string(),
            }
        }
    }
}
