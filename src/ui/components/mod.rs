pub mod menu;
pub mod progress_bar;
pub mod quiz_panel;
