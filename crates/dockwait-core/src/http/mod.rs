//! Blocking HTTP client on libcurl.
//!
//! Used for management API calls and, over a Unix socket, for the Docker
//! Engine API. [`send`] only fails on transport errors; [`send_checked`]
//! also rejects non-2xx statuses; [`send_with_retry`] wraps the latter in a
//! [`RetryPolicy`](crate::retry::RetryPolicy).

mod error;
mod request;
mod response;
mod send;

pub use error::RequestError;
pub use request::{Method, Request};
pub use response::Response;
pub use send::{send, send_checked, send_with_retry};
