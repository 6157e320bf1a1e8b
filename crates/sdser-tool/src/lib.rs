//! Packet inspection tool for serialized SoftDevice calls
//!
//! Encodes a call described in YAML or JSON into the request packet a host
//! would send, and decodes a captured response packet back into its result
//! code and outputs. Nothing here talks to hardware.

mod config;
mod error;
mod inspect;

pub use config::*;
pub use error::*;
pub use inspect::*;
