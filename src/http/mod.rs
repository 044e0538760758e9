//! Raw HTTP/1.1 request execution over a single connection.
mod executor;
mod request;

#[cfg(test)]
mod tests;

pub use executor::{ExecuteRequest, RequestExecutor};
pub use request::{ResponseHead, build_request};
