//! `SQLite` driver boundary: parameter conversion, row extraction, and the
//! connection handle.

mod connection;
mod params;
mod query;

pub use connection::SqliteConnection;
pub use params::convert_params;
