pub mod api;
pub mod collection;
pub mod config;
pub mod error;
pub mod generator;
pub mod metadata;
pub mod record;
pub mod render;
// cmd and reports are binary modules (declared in main.rs).
