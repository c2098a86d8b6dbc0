//! Command Transport
//!
//! Framing and the request/response exchange used by every register
//! accessor.
//!
//! # Modules
//!
//! - [`frame`]: `0x57 0xAB` framed command buffer
//! - [`deadline`]: Fixed-interval poll budget
//! - `link`: `write_check` / `write_read` exchanges

pub mod deadline;
pub mod frame;
pub(crate) mod link;

pub use deadline::Deadline;
pub use frame::Frame;
pub(crate) use link::CommandLink;
