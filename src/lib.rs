//! Transaction-submission gateway for a chain CLI client.

pub mod config;
pub mod gateway;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::schema::GatewayConfig;
pub use gateway::Gateway;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
