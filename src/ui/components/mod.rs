pub mod chat_area;
pub mod config_panel;
pub mod input_bar;
pub mod upload_zone;
