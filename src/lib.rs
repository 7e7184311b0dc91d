#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

pub mod error;
pub use error::*;
pub mod client;
pub use client::*;
pub mod record;
pub use record::*;
pub mod aggregate;
pub use aggregate::*;
pub mod orchestrator;
pub use orchestrator::*;
pub mod selection;
pub use selection::*;
pub mod api;
pub use api::*;
