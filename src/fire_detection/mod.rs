pub mod app;
pub mod core;
pub mod render;
pub mod run_effect;
