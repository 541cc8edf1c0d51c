/// Hosts without a DOM have no elements or keyboard to wire.
#[cfg(not(target_arch = "wasm32"))]
#[component]
pub fn MediaController() -> Element {
    rsx! {}
}
