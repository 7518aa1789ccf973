//! Request/response plumbing between the host HTTP stack and the router.
//!
//! The transport (accepting connections, parsing headers, writing bytes) is
//! the host's job. This module defines what crosses that boundary: the
//! [`Request`] descriptor, the [`ResponseWriter`] sink, the [`Handler`] trait
//! and the [`params`] accessor for captured path parameters.

mod handler;
mod request;
mod response;

pub use handler::{Handler, HandlerRef};
pub use request::{params, Request};
pub(crate) use request::attach_params;
pub use response::{write_error, write_json, write_not_found, ResponseWriter, NOT_FOUND_BODY};
