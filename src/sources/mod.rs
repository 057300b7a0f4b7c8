//! Upstream data sources
//!
//! The cache policy consumes one collaborator: something that, given a table
//! kind, returns a dated snapshot of team rows or fails. The trait seam keeps
//! the core independent of where snapshots come from; the factory picks a
//! concrete source from configuration.

pub mod factory;
pub mod file;
pub mod http;
pub mod traits;

pub use factory::SourceFactory;
pub use file::FileSource;
pub use http::HttpSource;
pub use traits::StatSource;
