//! The components module contains all shared components for our app.

mod app;
mod app_view;
pub mod audio_manager;
mod icons;
mod lyrics_panel;
mod navigation;
mod player;
pub mod views;

pub use app::*;
pub use app_view::*;
pub use audio_manager::*;
pub use icons::*;
pub use lyrics_panel::*;
pub use navigation::*;
pub use player::*;
// Views are accessed via views::ViewName
