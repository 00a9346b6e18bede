//! Chat message relay (unix only)
//!
//! A stateless side channel: each chat message received by the server is
//! written to a per-instance named pipe for an external reader.

pub mod relay;

pub use relay::MessageRelay;
