pub mod app;
pub mod config;
pub mod profile;
pub mod provision;
pub mod shared;
