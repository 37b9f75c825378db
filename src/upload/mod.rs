pub mod preview;
pub mod selected_file;
