pub mod catalog;
pub mod config;
pub mod fetch;
pub mod logging;
pub mod release;
