//! SoftDevice API serialization engine
//!
//! This crate provides the building blocks for marshalling API calls to a
//! remote BLE SoftDevice running on a connectivity coprocessor. Each call is
//! sent as a compact command packet and answered with a response packet:
//!
//! - **Commands** (host → coprocessor): opcode byte, then the arguments in
//!   declared order
//! - **Responses** (coprocessor → host): opcode echo, 32-bit result code, and
//!   on success the declared output fields
//!
//! Optional arguments are prefixed with a one-byte presence marker. All
//! multi-byte integers are little-endian. Every byte access goes through the
//! bounds-checked [`Writer`] / [`Reader`] cursors, and every decode must
//! consume its packet exactly.
//!
//! The transport that moves packets across the serial link is not part of
//! this crate.
//!
//! # Example
//!
//! ```rust,ignore
//! use sdser_codec::{decode_response, encode_request, Reply};
//!
//! let len = encode_request(&call, &mut buf)?;
//! transport.send(&buf[..len]);
//!
//! match decode_response::<MyCall>(&received)? {
//!     Reply::Success(output) => { /* ... */ }
//!     Reply::RemoteFailure(code) => { /* ... */ }
//! }
//! ```

mod codec;
mod command;
mod cond;
mod cursor;
mod error;
mod result;

pub use codec::*;
pub use command::*;
pub use cond::*;
pub use cursor::*;
pub use error::*;
pub use result::*;
