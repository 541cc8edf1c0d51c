// Shared imports, state primitives, and browser-specific helper utilities.
use dioxus::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};

use crate::playback::{Generation, MediaSurface, SurfaceEvent, SurfaceKind, Transport};

#[cfg(target_arch = "wasm32")]
use crate::components::{AppView, Navigation};
#[cfg(target_arch = "wasm32")]
use crate::playback::shortcut_action;
#[cfg(target_arch = "wasm32")]
use dioxus::core::{Runtime, RuntimeGuard};
#[cfg(target_arch = "wasm32")]
use js_sys;
#[cfg(target_arch = "wasm32")]
use std::cell::Cell;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen_futures::JsFuture;
#[cfg(target_arch = "wasm32")]
use web_sys::{window, HtmlMediaElement, KeyboardEvent};

const AUDIO_ELEMENT_ID: &str = "cadence-audio";
const VIDEO_ELEMENT_ID: &str = "cadence-video";
const VIDEO_LAYER_CLASS: &str = "video-backdrop";

/// Transport driving the page's persistent media elements.
pub type WebTransport = Transport<BrowserSurface, BrowserSurface>;

/// Context handle to the one transport of the app.
#[derive(Clone, Copy)]
pub struct PlayerSignal(pub Signal<WebTransport>);

type SurfaceEventHandler = Box<dyn Fn(SurfaceKind, Generation, SurfaceEvent)>;

/// Fan-in point for events from both media elements.
///
/// Surfaces are created before the transport that owns them exists, so the
/// handler is connected afterwards; events before that are dropped.
#[derive(Clone, Default)]
pub struct SurfaceEventSink(Rc<RefCell<Option<SurfaceEventHandler>>>);

impl SurfaceEventSink {
    pub fn connect(&self, handler: impl Fn(SurfaceKind, Generation, SurfaceEvent) + 'static) {
        *self.0.borrow_mut() = Some(Box::new(handler));
    }

    pub fn emit(&self, kind: SurfaceKind, generation: Generation, event: SurfaceEvent) {
        match self.0.borrow().as_ref() {
            Some(handler) => handler(kind, generation, event),
            None => debug!(surface = %kind, ?event, "surface event before transport connected"),
        }
    }
}

fn media_element_id(kind: SurfaceKind) -> &'static str {
    match kind {
        SurfaceKind::Audio => AUDIO_ELEMENT_ID,
        SurfaceKind::Video => VIDEO_ELEMENT_ID,
    }
}

/// Text for a `MediaError.code`.
fn describe_media_error(code: u16) -> String {
    match code {
        1 => "loading was aborted".to_string(),
        2 => "network error while loading".to_string(),
        3 => "the media could not be decoded".to_string(),
        4 => "no supported source was found".to_string(),
        other => format!("unknown media error (code {other})"),
    }
}

/// Monotonic milliseconds since page load, used for seek quiet windows and
/// lyric scroll holds. Wall-clock steps never reach it.
#[cfg(target_arch = "wasm32")]
pub fn now_millis() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|performance| performance.now())
        // Without a Performance object every call takes this branch, so the
        // clock stays one source for the whole session.
        .unwrap_or_else(js_sys::Date::now)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_millis() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static STARTED: OnceLock<Instant> = OnceLock::new();
    STARTED.get_or_init(Instant::now).elapsed().as_secs_f64() * 1000.0
}

/// Find the persistent element for `kind`, creating it on first use.
/// The flag is true when the element was created by this call.
#[cfg(target_arch = "wasm32")]
fn get_or_create_media_element(kind: SurfaceKind) -> Option<(HtmlMediaElement, bool)> {
    let document = window()?.document()?;
    let id = media_element_id(kind);

    if let Some(existing) = document.get_element_by_id(id) {
        return existing
            .dyn_into::<HtmlMediaElement>()
            .ok()
            .map(|element| (element, false));
    }

    let element: HtmlMediaElement = document.create_element(kind.label()).ok()?.dyn_into().ok()?;
    element.set_id(id);
    element.set_attribute("preload", "auto").ok()?;
    if kind == SurfaceKind::Video {
        element.set_attribute("playsinline", "").ok()?;
        element.set_attribute("aria-hidden", "true").ok()?;
        element.set_attribute("class", VIDEO_LAYER_CLASS).ok()?;
        element.set_default_muted(true);
        element.set_muted(true);
    }
    document.body()?.append_child(&element).ok()?;

    Some((element, true))
}

#[cfg(target_arch = "wasm32")]
fn describe_js_error(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return format!("{}: {}", String::from(error.name()), String::from(error.message()));
    }
    value
        .as_string()
        .unwrap_or_else(|| "unknown error".to_string())
}

#[cfg(target_arch = "wasm32")]
fn is_editable_shortcut_target(event: &KeyboardEvent) -> bool {
    let Some(target) = event.target() else {
        return false;
    };

    let mut current = target.dyn_into::<web_sys::Element>().ok();
    while let Some(element) = current {
        let tag = element.tag_name().to_ascii_lowercase();
        if tag == "input" || tag == "textarea" || tag == "select" {
            return true;
        }
        if element.has_attribute("contenteditable")
            && element
                .get_attribute("contenteditable")
                .map(|v| v.to_ascii_lowercase() != "false")
                .unwrap_or(true)
        {
            return true;
        }
        current = element.parent_element();
    }

    false
}
