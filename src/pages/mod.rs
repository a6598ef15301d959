pub mod config;
pub mod playground;
pub mod sessions;
