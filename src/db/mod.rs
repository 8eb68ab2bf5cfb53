pub mod configurations;
pub mod connection;
pub mod error_records;
pub mod projects;
pub mod results;
pub mod schema;
pub mod store;

pub use connection::Database;
pub use results::NewResult;
pub use store::ResultStore;
