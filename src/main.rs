use dioxus::prelude::*;

mod catalog;
mod components;
mod config;
mod playback;

const APP_CSS: Asset = asset!("/assets/styling/app.css");

fn main() {
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        document::Meta { name: "theme-color", content: "#101014" }
        document::Meta { name: "mobile-web-app-capable", content: "yes" }
        document::Meta { name: "apple-mobile-web-app-title", content: "Cadence" }

        document::Stylesheet { href: APP_CSS }

        components::AppShell {}
    }
}
