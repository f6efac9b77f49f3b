//! Listening socket, accept loop and worker bookkeeping.

pub mod listener;
pub mod supervisor;

pub use supervisor::{Supervisor, WorkerId};
