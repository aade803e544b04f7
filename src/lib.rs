pub mod config;
pub mod error;
pub mod feed;
pub mod file;
pub mod index;
pub mod query;
pub mod sampler;
pub mod server;
