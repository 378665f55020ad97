//! Backend gateway implementations for mailmate.

pub mod http_gateway;

pub use http_gateway::HttpEmailGateway;
