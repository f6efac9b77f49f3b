//! webserver - Minimal HTTP/1.0 static file server
//!
//! One request per connection, one tokio task per connection.

pub mod config;
pub mod fs;
pub mod http;
pub mod server;
