#[cfg(target_arch = "wasm32")]
const NOTICE_TIMEOUT_MS: u32 = 4_000;

/// Side effects tied to the page rather than to any one view.
#[cfg(target_arch = "wasm32")]
#[component]
pub fn MediaController() -> Element {
    let player = use_context::<PlayerSignal>().0;
    let navigation = use_context::<Navigation>();

    use_hook(move || install_keyboard_shortcuts(player));

    // The video element lives outside the view tree; show it only behind
    // the now-playing view and only while it has frames to show.
    use_effect(move || {
        let on_now_playing = navigation.current() == AppView::NowPlaying;
        let presentable = player.read().video_presentable();
        set_video_layer_visible(on_now_playing && presentable);
    });

    use_effect(move || {
        let Some(notice) = player.read().notice().map(str::to_owned) else {
            return;
        };
        spawn(async move {
            gloo_timers::future::TimeoutFuture::new(NOTICE_TIMEOUT_MS).await;
            let mut player = player;
            let still_shown = player.peek().notice() == Some(notice.as_str());
            if still_shown {
                player.write().clear_notice();
            }
        });
    });

    rsx! {}
}
