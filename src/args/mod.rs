//! CLI argument types and parsing helpers.
mod cli;
mod defaults;
pub(crate) mod parsers;
mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use cli::TesterArgs;
pub use types::{PositiveUsize, RampSetting};

pub(crate) use defaults::DEFAULT_CONFIG_FILES;
