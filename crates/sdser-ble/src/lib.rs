//! Serialized SoftDevice BLE calls
//!
//! This crate provides the GAP and GATTS calls a host sends to a BLE stack
//! running on a separate connectivity chip. Every call is encoded into a
//! caller-supplied buffer as a request packet, and every response packet is
//! decoded back into the call's outputs.
//!
//! # Packet Overview
//!
//! - **Request** (host → chip): `opcode | arguments...`
//! - **Response** (chip → host): `opcode | result_code:u32 | outputs...`
//!
//! Outputs only follow the envelope when the result code is success. Optional
//! arguments and outputs are conditional fields led by a presence marker.
//!
//! # Example
//!
//! ```rust,ignore
//! use sdser_ble::{GapConnParamUpdate, ConnParams};
//! use sdser_codec::{encode_request, decode_response, Reply};
//!
//! let cmd = GapConnParamUpdate { conn_handle: 0x10, conn_params: Some(params) };
//! let len = encode_request(&cmd, &mut buf)?;
//!
//! match decode_response::<GapConnParamUpdate>(&received)? {
//!     Reply::Success(()) => {}
//!     Reply::RemoteFailure(code) => eprintln!("rejected: {code}"),
//! }
//! ```

mod call;
mod commands;
mod constants;
mod error;
mod types;

pub use call::*;
pub use commands::*;
pub use constants::*;
pub use error::*;
pub use types::*;
