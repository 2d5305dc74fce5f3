pub mod config;
pub mod group;
pub mod task;

pub use config::*;
pub use group::*;
pub use task::*;
