pub mod catalog;
pub mod config;
pub mod professors;
pub mod server;
pub mod types;
