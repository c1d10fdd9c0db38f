pub mod client;
pub mod config;
pub mod error;
pub mod gateway;
pub mod http_server;
pub mod image_gen;
pub mod models;
pub mod prompt;
pub mod serverless;
pub mod styles;
