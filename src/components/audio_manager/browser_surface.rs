// Media surfaces backed by the page's persistent <audio> and <video> elements.

/// One `<audio>` or `<video>` element driven by the sync engine.
///
/// Element events are read back through listeners attached once per element
/// and tagged with the generation of the latest `load`. Loading a new source
/// drops any element events still queued for the old one, so only the `play`
/// promise can outlive a bind; it carries the generation it was issued with.
#[cfg(target_arch = "wasm32")]
pub struct BrowserSurface {
    kind: SurfaceKind,
    element: Option<HtmlMediaElement>,
    generation: Rc<Cell<Generation>>,
    sink: SurfaceEventSink,
}

#[cfg(target_arch = "wasm32")]
impl BrowserSurface {
    pub fn new(kind: SurfaceKind, sink: SurfaceEventSink) -> Self {
        let generation = Rc::new(Cell::new(Generation::default()));
        let element = match get_or_create_media_element(kind) {
            Some((element, created)) => {
                if created {
                    attach_media_listeners(&element, kind, generation.clone(), sink.clone());
                }
                Some(element)
            }
            None => {
                warn!(surface = %kind, "media element unavailable");
                None
            }
        };

        Self {
            kind,
            element,
            generation,
            sink,
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn attach_media_listeners(
    element: &HtmlMediaElement,
    kind: SurfaceKind,
    generation: Rc<Cell<Generation>>,
    sink: SurfaceEventSink,
) {
    let listen = |name: &str, read: fn(&HtmlMediaElement) -> Option<SurfaceEvent>| {
        let target = element.clone();
        let generation = generation.clone();
        let sink = sink.clone();
        let callback = Closure::wrap(Box::new(move || {
            if let Some(event) = read(&target) {
                sink.emit(kind, generation.get(), event);
            }
        }) as Box<dyn FnMut()>);
        let _ = element.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
        callback.forget();
    };

    let read_duration = |element: &HtmlMediaElement| {
        Some(SurfaceEvent::Metadata {
            duration: element.duration(),
        })
    };

    listen("canplaythrough", |_| Some(SurfaceEvent::CanPlayThrough));
    listen("loadedmetadata", read_duration);
    listen("durationchange", read_duration);
    listen("timeupdate", |element| {
        Some(SurfaceEvent::TimeUpdate {
            position: element.current_time(),
        })
    });
    listen("ended", |_| Some(SurfaceEvent::Ended));
    listen("error", |element| {
        element.error().map(|error| SurfaceEvent::LoadFailed {
            reason: describe_media_error(error.code()),
        })
    });
}

#[cfg(target_arch = "wasm32")]
impl MediaSurface for BrowserSurface {
    fn load(&mut self, src: &str, generation: Generation) {
        self.generation.set(generation);
        if let Some(element) = &self.element {
            element.set_src(src);
            element.load();
        }
    }

    fn release(&mut self) {
        // Removing the attribute (rather than setting an empty src) keeps the
        // element from reporting a load error.
        if let Some(element) = &self.element {
            let _ = element.remove_attribute("src");
            element.load();
        }
    }

    fn play(&mut self, generation: Generation) {
        let Some(element) = &self.element else {
            return;
        };
        let kind = self.kind;
        let sink = self.sink.clone();

        // Outcomes are always delivered from a later task so the transport is
        // never re-entered while it is issuing commands.
        match element.play() {
            Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                let event = match JsFuture::from(promise).await {
                    Ok(_) => SurfaceEvent::PlayStarted,
                    Err(err) => SurfaceEvent::PlayRejected {
                        reason: describe_js_error(&err),
                    },
                };
                sink.emit(kind, generation, event);
            }),
            Err(err) => {
                let reason = describe_js_error(&err);
                wasm_bindgen_futures::spawn_local(async move {
                    sink.emit(kind, generation, SurfaceEvent::PlayRejected { reason });
                });
            }
        }
    }

    fn pause(&mut self) {
        if let Some(element) = &self.element {
            let _ = element.pause();
        }
    }

    fn position(&self) -> f64 {
        self.element
            .as_ref()
            .map(|element| element.current_time())
            .unwrap_or(0.0)
    }

    fn set_position(&mut self, seconds: f64) {
        if let Some(element) = &self.element {
            element.set_current_time(seconds);
        }
    }

    fn set_volume(&mut self, level: f64) {
        if let Some(element) = &self.element {
            element.set_volume(level);
        }
    }

    fn set_muted(&mut self, muted: bool) {
        if let Some(element) = &self.element {
            element.set_muted(muted);
        }
    }

    fn set_rate(&mut self, rate: f64) {
        // `load()` resets playbackRate to the default rate.
        if let Some(element) = &self.element {
            element.set_default_playback_rate(rate);
            element.set_playback_rate(rate);
        }
    }
}

/// Headless stand-in for hosts without a DOM; keeps position only.
#[cfg(not(target_arch = "wasm32"))]
pub struct BrowserSurface {
    kind: SurfaceKind,
    position: f64,
}

#[cfg(not(target_arch = "wasm32"))]
impl BrowserSurface {
    pub fn new(kind: SurfaceKind, _sink: SurfaceEventSink) -> Self {
        Self {
            kind,
            position: 0.0,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl MediaSurface for BrowserSurface {
    fn load(&mut self, src: &str, generation: Generation) {
        warn!(surface = %self.kind, src, %generation, "no media backend on this platform");
        self.position = 0.0;
    }

    fn release(&mut self) {}

    fn play(&mut self, _generation: Generation) {}

    fn pause(&mut self) {}

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, seconds: f64) {
        self.position = seconds;
    }

    fn set_volume(&mut self, _level: f64) {}

    fn set_muted(&mut self, _muted: bool) {}

    fn set_rate(&mut self, _rate: f64) {}
}
