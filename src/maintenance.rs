//! Index maintenance operations that run on a whole server.

pub mod dedup;

pub use dedup::remove_duplicates;
