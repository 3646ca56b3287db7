pub mod controls;
pub mod error_toast;
pub mod filter_panel;
pub mod footer;
pub mod help_overlay;
pub mod pagination_bar;
pub mod process_list;
