//! Remote Data Gateway
//!
//! A thin client over the hosted content store. Reads are described by a
//! [`Query`] (table, projection, filters, order, limit, single) and writes are
//! plain inserts. Every call returns `Result<Value, GatewayError>`: the error
//! is authoritative, whatever data may have come back with it.
//!
//! ## Implementations
//!
//! - [`RestGateway`]: PostgREST-compatible HTTP client
//! - [`MemoryGateway`]: in-process tables for tests and local demos

mod memory;
mod query;
mod rest;

pub use memory::MemoryGateway;
pub use query::{Direction, Filter, Order, Query};
pub use rest::RestGateway;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// PostgREST error code for "JSON object requested, multiple (or no) rows returned"
pub const NOT_SINGLE_CODE: &str = "PGRST116";

/// Message reported when a single-row query matches zero or several rows
pub const NOT_SINGLE_MESSAGE: &str = "JSON object requested, multiple (or no) rows returned";

/// Common trait for content store clients
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Short name used in logs and health output
    fn name(&self) -> &str;

    /// Run a read query.
    ///
    /// Returns a JSON array of rows, or a single JSON object when the query
    /// is marked [`Query::single`].
    async fn select(&self, query: &Query) -> GatewayResult<Value>;

    /// Append a record to a table. No generated id is returned.
    async fn insert(&self, table: &str, record: Value) -> GatewayResult<()>;

    /// Check that the store is reachable
    async fn health_check(&self) -> GatewayResult<()>;
}

/// Errors reported by a gateway.
///
/// `Display` yields the raw message from the store so pages can show it
/// verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    /// The store answered with an error body
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// A single-row query matched zero or multiple rows
    #[error("{message}")]
    NotSingle { message: String },

    /// The request never produced a response
    #[error("{0}")]
    Transport(String),

    /// The response could not be decoded into the expected shape
    #[error("{0}")]
    Decode(String),
}

impl GatewayError {
    /// The raw message text, passed through unmodified
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// True for the distinct "not found / multiple" condition of single queries
    pub fn is_not_single(&self) -> bool {
        matches!(self, GatewayError::NotSingle { .. })
    }
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_is_raw_message() {
        let err = GatewayError::Api {
            status: 401,
            code: Some("42501".to_string()),
            message: "permission denied for table profile".to_string(),
        };
        assert_eq!(err.message(), "permission denied for table profile");
        assert!(!err.is_not_single());
    }

    #[test]
    fn test_not_single_flag() {
        let err = GatewayError::NotSingle {
            message: NOT_SINGLE_MESSAGE.to_string(),
        };
        assert!(err.is_not_single());
        assert_eq!(err.to_string(), NOT_SINGLE_MESSAGE);
    }
}
