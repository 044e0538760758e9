//! Configuration loading and application.
pub(crate) mod apply;
mod loader;
pub mod types;


pub use apply::apply_config;
pub use loader::load_config;

pub(crate) use loader::load_config_file;
