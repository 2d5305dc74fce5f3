pub mod app;
pub mod draft;
pub mod input;
pub mod panels;
pub mod render;
pub mod theme;

pub use app::run;
