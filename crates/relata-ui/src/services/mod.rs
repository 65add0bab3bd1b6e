//! Transport-adjacent services: SSE parsing, the progress channel core,
//! and the confirmation gate.

pub mod confirm;
pub mod stream;
#[cfg(target_arch = "wasm32")]
pub(crate) mod transport;
