pub mod app;
pub mod catalog;
pub mod common;
#[cfg(feature = "desktop")]
pub mod gui;
pub mod hotkey;
pub mod launcher;
pub mod logging;
pub mod settings;
pub mod settings_editor;
pub mod store;
#[cfg(feature = "desktop")]
pub mod system_hotkey;
pub mod theme;
pub mod tools;
pub mod tray;
pub mod visibility;

/// Name used for the config directory, window title and tray tooltip.
pub const APP_NAME: &str = "ToolLauncher";
