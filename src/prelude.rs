//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::client::{DataApi, DataApiError};
pub use crate::config::RdsConfig;
pub use crate::context::CallContext;
pub use crate::driver::{DRIVER_NAME, connect, connect_from_env, open};
pub use crate::error::RdsDataError;
pub use crate::rds::{RdsConnection, Statement, Transaction, TransactionId};
pub use crate::results::{CustomDbRow, ExecResult, FromRowValue, ResultSet, Rows};
pub use crate::translation::rewrite_ordinal_params;
pub use crate::tx_outcome::TxOutcome;
pub use crate::types::{NamedValue, RowValues};

#[cfg(feature = "http")]
pub use crate::client::HttpDataApi;
#[cfg(feature = "http")]
pub use crate::driver::open_http;
