pub mod connection;
pub mod ledger;
pub mod models;
