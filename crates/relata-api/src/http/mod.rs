//! HTTP delivery surface: router, handlers, errors, SSE streaming.

pub(crate) mod errors;
pub(crate) mod handlers;
pub mod router;
pub(crate) mod sse;
