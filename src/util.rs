//! Helpers layered on top of the search server.

pub mod paginator;
pub mod request_queue;

pub use paginator::{Paginator, paginate};
pub use request_queue::RequestQueue;
