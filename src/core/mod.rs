pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;
pub mod tracing_init;
