//! Audio Manager - Owns the browser media elements outside of the component render cycle.
//! Element events are routed into the transport; components only ever render snapshots.

// Shared imports, state types, and browser-only utility helpers.
include!("shared_types_and_web_helpers.rs");
// `MediaSurface` implementation over `<audio>`/`<video>` elements.
include!("browser_surface.rs");
// Wiring between element events, keyboard input and the transport signal.
include!("playback_api.rs");
// Web (wasm) media controller component.
include!("controller_web.rs");
// Native (non-wasm) media controller component.
include!("controller_native.rs");
