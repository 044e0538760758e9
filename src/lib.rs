//! Core library for the `webstress` CLI.
//!
//! The binary opens one short-lived TCP connection per simulated client,
//! sends a single `GET`, and aggregates how each attempt ended. This crate
//! holds the pieces it is built from: CLI argument types, configuration
//! loading, request execution, client orchestration, and outcome
//! aggregation. The command-line application is the primary interface;
//! library APIs may change with it.
pub mod args;
pub mod config;
pub mod domain;
pub mod error;
pub mod http;
pub mod load;
pub mod metrics;

#[cfg(feature = "fuzzing")]
pub mod fuzzing;
