pub mod config_io;
pub mod interchange;
pub mod logging;
pub mod store_io;
