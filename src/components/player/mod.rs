use crate::components::{now_millis, Icon, PlayerSignal};
use crate::config::PlayerConfig;
use dioxus::prelude::*;

mod controls;

use controls::{
    NextButton, PlayPauseButton, PrevButton, RepeatButton, ShuffleButton, SpeedSelect,
    VideoToggleButton, VolumeControl,
};

/// Transport bar: track info, controls and the seek slider.
#[component]
pub fn Player() -> Element {
    let mut player = use_context::<PlayerSignal>().0;
    let config = use_context::<PlayerConfig>();
    let snapshot = player.read().snapshot();

    let phase_label = snapshot.phase.label();
    let elapsed = snapshot.elapsed_label();
    let remaining = snapshot.remaining_label();
    let seekable = snapshot.has_track() && snapshot.duration > 0.0;
    let duration = snapshot.duration;
    let current_time = snapshot.current_time;

    let on_seek_input = move |e: Event<FormData>| {
        if let Ok(time) = e.value().parse::<f64>() {
            player.write().seek(time, now_millis());
        }
    };

    let banner = snapshot.error.clone().or_else(|| snapshot.notice.clone());

    rsx! {
        div { class: "player-shell",
            if let Some(message) = banner {
                div { class: if snapshot.error.is_some() { "player-banner is-error" } else { "player-banner" },
                    span { "{message}" }
                    if snapshot.error.is_none() {
                        button {
                            r#type: "button",
                            class: "banner-dismiss",
                            aria_label: "Dismiss",
                            onclick: move |_| player.write().clear_notice(),
                            Icon { name: "x".to_string(), class: "icon-xs".to_string() }
                        }
                    }
                }
            }
            div { class: "player-track",
                {
                    match &snapshot.track {
                        Some(track) => rsx! {
                            img {
                                class: "player-art",
                                src: "{track.album_art_url}",
                                alt: "{track.album}",
                            }
                            div { class: "player-meta",
                                p { class: "player-title", "{track.title}" }
                                p { class: "player-artist", "{track.artist}" }
                                p { class: "player-phase", "{phase_label}" }
                            }
                        },
                        None => rsx! {
                            div { class: "player-art placeholder",
                                Icon { name: "music".to_string(), class: "icon".to_string() }
                            }
                            div { class: "player-meta",
                                p { class: "player-title", "Nothing playing" }
                                p { class: "player-artist", "Pick a track to start" }
                            }
                        },
                    }
                }
            }

            div { class: "player-center",
                div { class: "player-controls",
                    ShuffleButton {}
                    PrevButton {}
                    PlayPauseButton {}
                    NextButton {}
                    RepeatButton {}
                }
                div { class: "seek-row",
                    span { class: "time-label", "{elapsed}" }
                    input {
                        r#type: "range",
                        class: "seek-slider",
                        aria_label: "Seek",
                        min: "0",
                        max: "{duration}",
                        step: "0.1",
                        value: "{current_time}",
                        disabled: !seekable,
                        oninput: on_seek_input,
                    }
                    span { class: "time-label", "{remaining}" }
                }
            }

            div { class: "player-extras",
                SpeedSelect { options: config.speed_options.clone() }
                VideoToggleButton {}
                VolumeControl {}
            }
        }
    }
}
