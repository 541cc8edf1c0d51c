use crate::components::{AppView, Icon, Navigation, PlayerSignal};
use dioxus::prelude::*;

#[component]
pub fn CatalogView() -> Element {
    let mut player = use_context::<PlayerSignal>().0;
    let navigation = use_context::<Navigation>();
    let mut search_query = use_signal(String::new);

    let (tracks, current_index, is_playing) = {
        let transport = player.read();
        let matches = transport.catalog().search(&search_query());
        let tracks = matches
            .into_iter()
            .filter_map(|index| transport.catalog().get(index).map(|track| (index, track.clone())))
            .collect::<Vec<_>>();
        (
            tracks,
            transport.current_index(),
            transport.snapshot().is_playing,
        )
    };

    rsx! {
        div { class: "catalog-view",
            header { class: "page-header",
                h1 { class: "page-title", "Tracks" }
                div { class: "search-box",
                    Icon { name: "search".to_string(), class: "search-icon".to_string() }
                    input {
                        r#type: "search",
                        class: "search-input",
                        placeholder: "Search by title or artist",
                        value: search_query,
                        oninput: move |e| search_query.set(e.value()),
                    }
                }
            }

            if tracks.is_empty() {
                p { class: "empty-state", "No tracks match your search." }
            } else {
                div { class: "track-grid",
                    for (index, track) in tracks {
                        div {
                            key: "{track.id}",
                            class: if current_index == Some(index) { "track-card is-active" } else { "track-card" },
                            onclick: move |_| {
                                player.write().select_track(track.id);
                                navigation.navigate_to(AppView::NowPlaying);
                            },
                            div { class: "track-art",
                                img { src: "{track.album_art_url}", alt: "{track.album}" }
                                if current_index == Some(index) {
                                    button {
                                        r#type: "button",
                                        class: "track-art-overlay",
                                        aria_label: if is_playing { "Pause" } else { "Play" },
                                        onclick: move |e: MouseEvent| {
                                            e.stop_propagation();
                                            player.write().play_pause();
                                        },
                                        Icon {
                                            name: if is_playing { "pause".to_string() } else { "play".to_string() },
                                            class: "icon-sm".to_string(),
                                        }
                                    }
                                }
                            }
                            div { class: "track-info",
                                h3 { class: "track-title", "{track.title}" }
                                p { class: "track-artist", "{track.artist}" }
                            }
                        }
                    }
                }
            }
        }
    }
}
