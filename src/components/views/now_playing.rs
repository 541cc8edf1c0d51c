use crate::components::{AppView, Icon, LyricsPanel, Navigation, PlayerSignal};
use dioxus::prelude::*;

/// Full-screen view over the video (or static) backdrop.
#[component]
pub fn NowPlayingView() -> Element {
    let player = use_context::<PlayerSignal>().0;
    let navigation = use_context::<Navigation>();
    let snapshot = player.read().snapshot();

    let backdrop_class = if snapshot.video_presentable {
        "now-playing-backdrop has-video"
    } else {
        "now-playing-backdrop"
    };
    let backdrop_style = snapshot
        .track
        .as_ref()
        .filter(|_| !snapshot.video_presentable)
        .map(|track| format!("background-image: url('{}');", track.album_art_url))
        .unwrap_or_default();

    rsx! {
        div { class: "now-playing-view",
            div { class: backdrop_class, style: backdrop_style }

            button {
                r#type: "button",
                class: "back-btn",
                aria_label: "Back to tracks",
                onclick: move |_| {
                    if navigation.go_back().is_none() {
                        navigation.navigate_to(AppView::Catalog);
                    }
                },
                Icon { name: "arrow-left".to_string(), class: "icon".to_string() }
            }

            {
                match snapshot.track.clone() {
                    Some(track) => rsx! {
                        div { class: "now-playing-body",
                            div { class: "now-playing-header",
                                img {
                                    class: "now-playing-art",
                                    src: "{track.album_art_url}",
                                    alt: "{track.album}",
                                }
                                div {
                                    h1 { class: "now-playing-title", "{track.title}" }
                                    p { class: "now-playing-artist", "{track.artist}" }
                                    p { class: "now-playing-album", "{track.album}" }
                                }
                            }
                            LyricsPanel { track: track.clone(), current_time: snapshot.current_time }
                        }
                    },
                    None => rsx! {
                        div { class: "now-playing-body is-empty",
                            p { class: "empty-state", "Nothing is playing." }
                        }
                    },
                }
            }
        }
    }
}
