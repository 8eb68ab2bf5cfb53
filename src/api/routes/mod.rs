pub mod aggregate;
pub mod health;
pub mod projects;
pub mod reports;
