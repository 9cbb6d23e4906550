//! Terminal browser for the search widget
//!
//! - `browser` - search box, result dropdown and a map stand-in
//! - `model` - key mapping, hit-testing and host state, free of UI state

pub mod browser;
pub mod components;
pub mod model;
pub mod theme;

pub use browser::{GeoSearchBrowser, GeoSearchBrowserProps};
pub use model::MapState;
pub use theme::Theme;
