pub mod config;
pub mod schema;
pub mod script;
pub mod upload;
