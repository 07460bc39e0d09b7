// Data API module - the connection/statement/transaction surface over stateless RPCs
//
// - connection: identity holder, ping, prepare, close
// - executor: query/execute dispatch (ordinal check, encoding, remote call)
// - params: value -> typed field encoding
// - query: response -> cursor / write outcome decoding
// - prepared: deferred statements
// - transaction: begin/commit/rollback by transaction id

pub mod connection;
mod executor;
pub mod params;
pub mod prepared;
pub mod query;
pub mod transaction;

pub use connection::RdsConnection;
pub use params::{Params, encode_value};
pub use prepared::Statement;
pub use query::{build_exec_result, build_rows, decode_field};
pub use transaction::{Transaction, TransactionId};
