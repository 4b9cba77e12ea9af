pub mod config;
#[cfg(feature = "mongodb")]
pub mod database;
pub mod handlers;
pub mod hash_worker;
pub mod http_error;
pub mod middleware;
pub mod role;
pub mod rto;
pub mod telemetry;
