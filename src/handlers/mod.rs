pub mod auth;
pub mod categories;
pub mod clients;
pub mod dashboard;
pub mod orders;
pub mod products;
