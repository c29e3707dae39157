// Database service module
// SQLite storage standing in for the hosted event collection

mod connection;
mod migrations;
mod schema;

pub use connection::Database;
