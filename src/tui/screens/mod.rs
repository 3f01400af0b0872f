//! TUI screens

pub mod editor;
pub mod main_menu;
pub mod records;

pub use editor::{EditorAction, EditorMode, EditorScreen};
pub use main_menu::MainMenuScreen;
pub use records::{RecordsAction, RecordsScreen};
