//! HTTP/1.0 protocol implementation.
//!
//! Each connection carries exactly one request and one response, then closes.
//!
//! # Architecture
//!
//! - **`connection`**: Per-connection state machine driving the other pieces
//! - **`parser`**: Reads and splits the request line
//! - **`request`**: Request line representation
//! - **`response`**: Status codes, bodies and canned responses
//! - **`writer`**: Frames and writes a response to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Read one request line
//!        └──────┬──────┘
//!               ├─ no line ──────────────────────────┐
//!               ├─ malformed → 400 ─────────┐        │
//!               ▼                           │        │
//!        ┌──────────────────┐               │        │
//!        │    Resolving     │ ← 200/404/500/501      │
//!        └──────┬───────────┘               │        │
//!               ▼                           │        │
//!        ┌──────────────────┐               │        │
//!        │     Writing      │ ◄─────────────┘        │
//!        └──────┬───────────┘                        │
//!               ▼                                    │
//!        ┌──────────────────┐                        │
//!        │      Closed      │ ◄──────────────────────┘
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use webserver::config::Config;
//! use webserver::http::connection::Connection;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Arc::new(Config::new(8080));
//!     let listener = TcpListener::bind(config.listen_addr()).await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let config = config.clone();
//!         tokio::spawn(async move {
//!             let mut conn = Connection::new(socket, config);
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
