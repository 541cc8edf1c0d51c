// Public wiring API consumed by the app shell.

/// Route element events into `player`.
///
/// Handlers run from browser callbacks outside any component scope, so the
/// signal is written under a guard for the runtime captured here.
#[cfg(target_arch = "wasm32")]
pub fn connect_surface_events(sink: &SurfaceEventSink, player: Signal<WebTransport>) {
    let runtime = Runtime::current();
    sink.connect(move |kind, generation, event| {
        let _guard = RuntimeGuard::new(runtime.clone());
        let mut player = player;
        player
            .write()
            .on_surface_event(kind, generation, event, now_millis());
    });
}

#[cfg(not(target_arch = "wasm32"))]
pub fn connect_surface_events(sink: &SurfaceEventSink, player: Signal<WebTransport>) {
    sink.connect(move |kind, generation, event| {
        let mut player = player;
        player
            .write()
            .on_surface_event(kind, generation, event, now_millis());
    });
}

/// Show the video element behind the page, or hide it for the static backdrop.
#[cfg(target_arch = "wasm32")]
pub fn set_video_layer_visible(visible: bool) {
    let Some(element) = window()
        .and_then(|w| w.document())
        .and_then(|doc| doc.get_element_by_id(VIDEO_ELEMENT_ID))
    else {
        return;
    };
    let class = if visible {
        format!("{VIDEO_LAYER_CLASS} is-visible")
    } else {
        VIDEO_LAYER_CLASS.to_string()
    };
    let _ = element.set_attribute("class", &class);
}

/// Document-level keyboard shortcuts.
#[cfg(target_arch = "wasm32")]
fn install_keyboard_shortcuts(player: Signal<WebTransport>) {
    let Some(document) = window().and_then(|w| w.document()) else {
        return;
    };

    let runtime = Runtime::current();
    let key_cb = Closure::wrap(Box::new(move |event: KeyboardEvent| {
        if event.default_prevented()
            || event.is_composing()
            || event.ctrl_key()
            || event.meta_key()
            || event.alt_key()
        {
            return;
        }
        let Some(action) = shortcut_action(&event.key(), is_editable_shortcut_target(&event))
        else {
            return;
        };
        event.prevent_default();

        let _guard = RuntimeGuard::new(runtime.clone());
        let mut player = player;
        player.write().apply_shortcut(action);
    }) as Box<dyn FnMut(KeyboardEvent)>);

    let _ = document.add_event_listener_with_callback("keydown", key_cb.as_ref().unchecked_ref());
    key_cb.forget();
}
