//! Filesystem side of request handling.
//!
//! - **`resolver`**: Maps a request target onto the serving root and
//!   classifies what is there

pub mod resolver;

pub use resolver::{ResolvedTarget, resolve};
