//! Pure aggregation functions over normalized publication records.
//!
//! Each function builds a fresh value per call; nothing is mutated in place
//! after being handed to a consumer.

pub mod keywords;
pub use keywords::*;
pub mod multi_group;
pub use multi_group::*;
pub mod groups;
pub use groups::*;
pub mod timeline;
pub use timeline::*;
