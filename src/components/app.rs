use crate::catalog::Catalog;
use crate::components::views::{CatalogView, NowPlayingView};
use crate::components::{
    connect_surface_events, view_label, AppView, BrowserSurface, Icon, MediaController,
    Navigation, Player, PlayerSignal, SurfaceEventSink,
};
use crate::config::PlayerConfig;
use crate::playback::{MediaSyncEngine, SurfaceKind, SyncTolerances, Transport};
use dioxus::prelude::*;
use tracing::error;

/// Loads configuration and the catalog, then hands over to the player.
#[component]
pub fn AppShell() -> Element {
    let config = use_hook(PlayerConfig::bundled);
    let catalog = use_hook(|| {
        Catalog::bundled().map_err(|err| {
            error!(error = %err, "catalog failed to load");
            err.to_string()
        })
    });

    match catalog {
        Ok(catalog) => rsx! {
            PlayerRoot { catalog, config }
        },
        Err(message) => rsx! {
            div { class: "app-container load-error",
                Icon { name: "music".to_string(), class: "icon-lg".to_string() }
                h1 { "The track list could not be loaded" }
                p { "{message}" }
            }
        },
    }
}

#[component]
fn PlayerRoot(catalog: Catalog, config: PlayerConfig) -> Element {
    let sink = use_hook(SurfaceEventSink::default);
    let player = use_signal(|| {
        let engine = MediaSyncEngine::new(
            BrowserSurface::new(SurfaceKind::Audio, sink.clone()),
            BrowserSurface::new(SurfaceKind::Video, sink.clone()),
            SyncTolerances::from(&config),
        );
        Transport::new(catalog.clone(), engine, &config)
    });
    use_hook(|| connect_surface_events(&sink, player));

    let current_view = use_signal(|| AppView::Catalog);
    let history = use_signal(Vec::<AppView>::new);
    let navigation = Navigation::new(current_view, history);

    use_context_provider(|| PlayerSignal(player));
    use_context_provider(|| navigation);
    use_context_provider(|| config.clone());

    let view = current_view();
    let has_track = player.read().current_index().is_some();

    rsx! {
        div { class: "app-container",
            header { class: "app-header",
                span { class: "app-brand", "Cadence" }
                span { class: "app-view-label", "{view_label(&view)}" }
                if view == AppView::Catalog && has_track {
                    button {
                        r#type: "button",
                        class: "header-link",
                        onclick: move |_| navigation.navigate_to(AppView::NowPlaying),
                        "Now playing"
                    }
                }
            }

            main { class: "main-scroll",
                match view {
                    AppView::Catalog => rsx! {
                        CatalogView {}
                    },
                    AppView::NowPlaying => rsx! {
                        NowPlayingView {}
                    },
                }
            }

            Player {}
        }

        // Media controller - wires elements and shortcuts outside the view tree
        MediaController {}
    }
}
