pub mod filter;
pub mod store;
pub mod tags;

pub use filter::TaskFilter;
pub use store::{Store, StoreError};
