//! Typed queries for the publication tracker API.

pub mod authors;
pub use authors::*;
pub mod publications;
pub use publications::*;
pub mod stats;
pub use stats::*;
pub mod ingest;
pub use ingest::*;
pub mod export;
pub use export::*;
