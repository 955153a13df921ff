//! GUI components

pub mod path_input;
pub mod preset_tabs;
pub mod progress_bar;
pub mod url_input;

// Re-export for convenience
pub use path_input::path_input;
pub use preset_tabs::preset_tabs;
pub use progress_bar::progress_bar;
pub use url_input::url_input;
