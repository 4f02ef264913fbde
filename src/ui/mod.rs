pub mod dialogs;
pub mod order_panel;
pub mod theme;
pub mod toolbar;
