//! Components for the geosearch browser

pub mod footer;
pub mod map_pane;
pub mod result_list;
pub mod search_box;
pub mod shortcuts;

pub use footer::{Footer, FooterProps, Shortcut, blurred_shortcuts, input_shortcuts};
pub use map_pane::{MapPane, MapPaneProps};
pub use result_list::{ResultList, ResultListProps, ResultRow, ResultRowProps};
pub use search_box::{SearchBox, SearchBoxProps};
pub use shortcuts::ShortcutsBuilder;
