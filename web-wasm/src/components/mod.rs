//! UIコンポーネント

pub mod action_buttons;
pub mod camera_modal;
pub mod file_list;
pub mod header;
pub mod progress_bar;
pub mod results_panel;
pub mod status_banner;
pub mod upload_area;
