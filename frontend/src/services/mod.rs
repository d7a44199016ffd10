pub mod date_bridge;
pub mod logging;
