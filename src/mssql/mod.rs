pub mod connection;
pub mod introspect;

pub use connection::MssqlConnection;
pub use introspect::introspect_table;
