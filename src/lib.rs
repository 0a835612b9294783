pub mod config;
pub mod lint;
pub mod logging;
pub mod page;
pub mod version;
