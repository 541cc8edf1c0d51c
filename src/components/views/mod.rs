mod catalog;
mod now_playing;

pub use catalog::CatalogView;
pub use now_playing::NowPlayingView;
