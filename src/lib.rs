pub mod app;
pub mod color;
pub mod dash;
pub mod data;
pub mod state;
pub mod ui;
