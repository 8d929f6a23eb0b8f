//! # trawl
//!
//! Fan-out search service. One query goes to every configured provider at
//! once; the extracted listings come back as one JSON object keyed by
//! provider. The search itself lives in the `trawl-search` crate; this
//! crate adds configuration loading, the HTTP listener and the static
//! front-end.

pub mod config;
pub mod error;
pub mod server;

pub use config::TrawlConfig;
pub use error::{Result, TrawlError};
