use dioxus::prelude::*;

/// Glyphs drawn with `fill` instead of a stroke.
const FILLED_ICONS: [&str; 4] = ["play", "pause", "prev", "next"];

#[component]
pub fn Icon(name: String, class: String) -> Element {
    let filled = FILLED_ICONS.contains(&name.as_str());
    let class = if name == "loader" {
        format!("{class} spin")
    } else {
        class
    };

    rsx! {
        svg {
            class: "{class}",
            view_box: "0 0 24 24",
            fill: if filled { "currentColor" } else { "none" },
            stroke: if filled { "none" } else { "currentColor" },
            stroke_width: "2",
            stroke_linecap: "round",
            stroke_linejoin: "round",
            {glyph(&name)}
        }
    }
}

fn glyph(name: &str) -> Element {
    match name {
        "search" => rsx! {
            circle { cx: "11", cy: "11", r: "8" }
            path { d: "M21 21l-4.35-4.35" }
        },
        "arrow-left" => rsx! {
            path { d: "M19 12H5M12 19l-7-7 7-7" }
        },
        "shuffle" => rsx! {
            path { d: "M16 3h5v5M4 20L21 3M21 16v5h-5M15 15l6 6M4 4l5 5" }
        },
        "play" => rsx! {
            path { d: "M6 4l14 8-14 8z" }
        },
        "pause" => rsx! {
            path { d: "M6 4h4v16H6zM14 4h4v16h-4z" }
        },
        "prev" => rsx! {
            path { d: "M19 20L9 12l10-8z" }
            path { d: "M5 5h2v14H5z" }
        },
        "next" => rsx! {
            path { d: "M5 4l10 8-10 8z" }
            path { d: "M17 5h2v14h-2z" }
        },
        "repeat" => rsx! {
            path { d: "M17 1l4 4-4 4M3 11V9a4 4 0 0 1 4-4h14M7 23l-4-4 4-4M21 13v2a4 4 0 0 1-4 4H3" }
        },
        "volume" => rsx! {
            path { d: "M11 5L6 9H2v6h4l5 4z" }
            path { d: "M15.54 8.46a5 5 0 0 1 0 7.07M19.07 4.93a10 10 0 0 1 0 14.14" }
        },
        "volume-x" => rsx! {
            path { d: "M11 5L6 9H2v6h4l5 4z" }
            path { d: "M23 9l-6 6M17 9l6 6" }
        },
        "video" => rsx! {
            path { d: "M23 7l-7 5 7 5z" }
            rect { x: "1", y: "5", width: "15", height: "14", rx: "2" }
        },
        "video-off" => rsx! {
            path { d: "M16 16v1a2 2 0 0 1-2 2H3a2 2 0 0 1-2-2V7a2 2 0 0 1 2-2h2m5.66 0H14a2 2 0 0 1 2 2v3.34l1 1L23 7v10" }
            path { d: "M1 1l22 22" }
        },
        "music" => rsx! {
            path { d: "M9 18V5l12-2v13" }
            circle { cx: "6", cy: "18", r: "3" }
            circle { cx: "18", cy: "16", r: "3" }
        },
        "x" => rsx! {
            path { d: "M18 6L6 18M6 6l12 12" }
        },
        "loader" => rsx! {
            circle { cx: "12", cy: "12", r: "10", opacity: "0.25" }
            path { d: "M12 2a10 10 0 0 1 10 10", opacity: "0.75" }
        },
        _ => rsx! {
            circle { cx: "12", cy: "12", r: "10" }
        },
    }
}
