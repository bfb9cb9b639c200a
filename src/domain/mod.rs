pub mod error;
pub mod models;
pub mod ports;
pub mod records;
pub mod schema;
