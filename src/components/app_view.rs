//! Defines the shared application view state.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Catalog,
    NowPlaying,
}

pub fn view_label(view: &AppView) -> &'static str {
    match view {
        AppView::Catalog => "Library",
        AppView::NowPlaying => "Now Playing",
    }
}
