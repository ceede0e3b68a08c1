// Components module - reusable UI building blocks
//
// Shell components are rendered around the panels on every frame:
// - Title bar: app heading, backend URL, reachability
// - Status bar: key hints for the focused element
// - Toast: transient notices
//
// Panels implement the `Component` trait and read everything from a
// `RenderContext`.

pub mod directory_panel;
pub mod logs_panel;
pub mod lookup_panel;
pub mod status_bar;
pub mod text_input;
pub mod title_bar;
pub mod toast;

pub use directory_panel::DirectoryPanel;
pub use logs_panel::LogsPanel;
pub use lookup_panel::LookupPanel;
pub use toast::Toast;
