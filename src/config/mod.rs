pub mod database;
pub mod env;
