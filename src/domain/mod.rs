//! Validated, immutable run inputs.
mod run;

pub use run::RunConfig;
