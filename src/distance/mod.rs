//! Travel cost: the directed matrix, the oracle that supplies it, and the
//! cache that may sit in front of the oracle.

mod cache;
pub mod geo;
mod matrix;
mod oracle;
mod response;
mod table;

pub use cache::{cache_key, CachedOracle, MatrixCache, TtlCache};
pub use matrix::{Leg, TravelMatrix};
pub(crate) use oracle::request_matrix;
pub use oracle::DistanceOracle;
pub use response::parse_matrix_response;
pub use table::TableOracle;
