//! SQL middleware over the RDS Data API.
//!
//! Each statement, begin, commit and rollback is an independent HTTPS call carrying the
//! cluster and secret ARNs; there is no session or server-side cursor. Transactions are
//! identified by the id `begin` returns, and only named parameters are accepted.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use rds_data_middleware::prelude::*;
//!
//! # async fn run(api: Arc<dyn DataApi>) -> Result<(), RdsDataError> {
//! let cfg = RdsConfig::new(
//!     "arn:aws:rds:us-east-1:123456789012:cluster:demo",
//!     "arn:aws:secretsmanager:us-east-1:123456789012:secret:demo",
//! )
//! .with_database("app");
//! let cx = CallContext::background();
//! let conn = connect(&cx, &cfg, api).await?;
//!
//! let tx = conn.begin(&cx).await?;
//! tx.execute(
//!     &cx,
//!     "INSERT INTO users (name) VALUES (:name)",
//!     &[NamedValue::named("name", "alice")],
//! )
//! .await?;
//! tx.commit(&cx).await?;
//!
//! for row in conn.query(&cx, "SELECT id, name FROM users", &[]).await? {
//!     let name: String = row.try_get_by_name("name")?;
//!     println!("{name}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod context;
pub mod driver;
pub mod error;
pub mod prelude;
pub mod rds;
pub mod results;
pub mod translation;
pub mod tx_outcome;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::{DataApi, DataApiError};
#[cfg(feature = "http")]
pub use client::HttpDataApi;
pub use config::RdsConfig;
pub use context::CallContext;
pub use driver::{DRIVER_NAME, connect, connect_from_env, open};
#[cfg(feature = "http")]
pub use driver::open_http;
pub use error::RdsDataError;
pub use rds::{RdsConnection, Statement, Transaction, TransactionId};
pub use results::{CustomDbRow, ExecResult, FromRowValue, ResultSet, Rows};
pub use tx_outcome::TxOutcome;
pub use types::{NamedValue, RowValues};
