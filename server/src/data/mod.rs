//! Data layer
//!
//! - `filters` - filter parsing and compilation to a single SQL statement
//! - `postgres` - connection pool and the job search repository
//! - `traits` - repository traits the HTTP layer depends on
//! - `types` - result records
//! - `error` - unified error type

pub mod error;
pub mod filters;
pub mod postgres;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use postgres::PostgresService;
pub use traits::JobSearchRepository;
pub use types::JobRow;
