//! Data-driven calls.
//!
//! [`CommandCall`] is a call whose arguments come from outside the type
//! system (a YAML or JSON file, a script). Mandatory arguments may therefore
//! be missing, and encoding reports that as [`CodecError::NullArgument`]
//! before anything is written. [`DecodedReply`] is the matching serializable
//! view of a response.

use sdser_codec::{
    decode_response, encode_request, CodecError, CodecResult, Command, CommandDescriptor,
    OutputSlot, Reply,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::commands::*;
use crate::constants::*;
use crate::error::{BleError, BleResult};
use crate::types::*;

/// A call with an untyped argument set.
///
/// Serialized with a `command` tag holding the call name, e.g.
///
/// ```yaml
/// command: gap_conn_param_update
/// conn_handle: 16
/// conn_params:
///   min_conn_interval: 6
///   max_conn_interval: 12
///   slave_latency: 0
///   conn_sup_timeout: 500
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum CommandCall {
    GapConnParamUpdate {
        conn_handle: Option<u16>,
        conn_params: Option<ConnParams>,
    },
    GapDisconnect {
        conn_handle: Option<u16>,
        hci_status_code: Option<u8>,
    },
    GapTxPowerSet {
        tx_power: Option<i8>,
    },
    GapPpcpSet {
        conn_params: Option<ConnParams>,
    },
    GapPpcpGet {
        #[serde(default)]
        want_conn_params: bool,
    },
    GattsServiceAdd {
        service_type: Option<u8>,
        uuid: Option<Uuid>,
        #[serde(default)]
        want_handle: bool,
    },
    GattsCharacteristicAdd {
        service_handle: Option<u16>,
        char_md: Option<CharMd>,
        attr_char_value: Option<Attr>,
        #[serde(default)]
        want_handles: bool,
    },
    GattsDescriptorAdd {
        char_handle: Option<u16>,
        attr: Option<Attr>,
        #[serde(default)]
        want_handle: bool,
    },
}

fn required<T: Clone>(value: &Option<T>, field: &'static str) -> CodecResult<T> {
    value.clone().ok_or(CodecError::NullArgument { field })
}

impl CommandCall {
    /// Descriptor of the call.
    pub fn descriptor(&self) -> CommandDescriptor {
        match self {
            CommandCall::GapConnParamUpdate { .. } => GapConnParamUpdate::DESCRIPTOR,
            CommandCall::GapDisconnect { .. } => GapDisconnect::DESCRIPTOR,
            CommandCall::GapTxPowerSet { .. } => GapTxPowerSet::DESCRIPTOR,
            CommandCall::GapPpcpSet { .. } => GapPpcpSet::DESCRIPTOR,
            CommandCall::GapPpcpGet { .. } => GapPpcpGet::DESCRIPTOR,
            CommandCall::GattsServiceAdd { .. } => GattsServiceAdd::DESCRIPTOR,
            CommandCall::GattsCharacteristicAdd { .. } => GattsCharacteristicAdd::DESCRIPTOR,
            CommandCall::GattsDescriptorAdd { .. } => GattsDescriptorAdd::DESCRIPTOR,
        }
    }

    /// Encode the request packet into `buf`, returning its length.
    ///
    /// Missing mandatory arguments fail with [`CodecError::NullArgument`]
    /// and leave `buf` untouched.
    pub fn encode(&self, buf: &mut [u8]) -> CodecResult<usize> {
        debug!(command = self.descriptor().name, capacity = buf.len(), "encoding call");
        match self {
            CommandCall::GapConnParamUpdate {
                conn_handle,
                conn_params,
            } => encode_request(
                &GapConnParamUpdate {
                    conn_handle: required(conn_handle, "conn_handle")?,
                    conn_params: *conn_params,
                },
                buf,
            ),
            CommandCall::GapDisconnect {
                conn_handle,
                hci_status_code,
            } => encode_request(
                &GapDisconnect {
                    conn_handle: required(conn_handle, "conn_handle")?,
                    hci_status_code: required(hci_status_code, "hci_status_code")?,
                },
                buf,
            ),
            CommandCall::GapTxPowerSet { tx_power } => encode_request(
                &GapTxPowerSet {
                    tx_power: required(tx_power, "tx_power")?,
                },
                buf,
            ),
            CommandCall::GapPpcpSet { conn_params } => encode_request(
                &GapPpcpSet {
                    conn_params: *conn_params,
                },
                buf,
            ),
            CommandCall::GapPpcpGet { want_conn_params } => encode_request(
                &GapPpcpGet {
                    conn_params: OutputSlot(*want_conn_params),
                },
                buf,
            ),
            CommandCall::GattsServiceAdd {
                service_type,
                uuid,
                want_handle,
            } => encode_request(
                &GattsServiceAdd {
                    service_type: required(service_type, "service_type")?,
                    uuid: *uuid,
                    handle: OutputSlot(*want_handle),
                },
                buf,
            ),
            CommandCall::GattsCharacteristicAdd {
                service_handle,
                char_md,
                attr_char_value,
                want_handles,
            } => encode_request(
                &GattsCharacteristicAdd {
                    service_handle: required(service_handle, "service_handle")?,
                    char_md: char_md.clone(),
                    attr_char_value: attr_char_value.clone(),
                    handles: OutputSlot(*want_handles),
                },
                buf,
            ),
            CommandCall::GattsDescriptorAdd {
                char_handle,
                attr,
                want_handle,
            } => encode_request(
                &GattsDescriptorAdd {
                    char_handle: required(char_handle, "char_handle")?,
                    attr: attr.clone(),
                    handle: OutputSlot(*want_handle),
                },
                buf,
            ),
        }
    }
}

/// Success payload of a decoded response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyOutput {
    /// The call returns nothing beyond the envelope.
    Empty,
    /// Connection parameters.
    ConnParams(Option<ConnParams>),
    /// A single attribute handle.
    Handle(Option<u16>),
    /// Characteristic handles.
    CharHandles(Option<CharHandles>),
}

/// Serializable view of a decoded response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DecodedReply {
    /// The remote call succeeded.
    Success {
        /// Call name.
        command: &'static str,
        /// Decoded output fields.
        output: ReplyOutput,
    },
    /// The remote call was rejected.
    RemoteFailure {
        /// Call name.
        command: &'static str,
        /// Raw result code.
        result_code: u32,
        /// Symbolic name of the result code, when known.
        result_name: Option<&'static str>,
    },
}

fn decode_as<C, F>(packet: &[u8], wrap: F) -> BleResult<DecodedReply>
where
    C: Command,
    F: FnOnce(C::Output) -> ReplyOutput,
{
    let command = C::DESCRIPTOR.name;
    Ok(match decode_response::<C>(packet)? {
        Reply::Success(output) => DecodedReply::Success {
            command,
            output: wrap(output),
        },
        Reply::RemoteFailure(code) => DecodedReply::RemoteFailure {
            command,
            result_code: code.0,
            result_name: code.name(),
        },
    })
}

/// Decode a response packet for the named call.
pub fn decode_reply(name: &str, packet: &[u8]) -> BleResult<DecodedReply> {
    let descriptor =
        descriptor_by_name(name).ok_or_else(|| BleError::UnknownCommand(name.to_string()))?;
    decode_reply_for(descriptor, packet)
}

/// Decode a response packet, picking the call from its opcode byte.
pub fn decode_reply_any(packet: &[u8]) -> BleResult<DecodedReply> {
    let opcode = *packet.first().ok_or(CodecError::LengthMismatch {
        expected: 1,
        actual: 0,
    })?;
    let descriptor = descriptor_by_opcode(opcode).ok_or(BleError::UnknownOpcode(opcode))?;
    decode_reply_for(descriptor, packet)
}

fn decode_reply_for(descriptor: &CommandDescriptor, packet: &[u8]) -> BleResult<DecodedReply> {
    debug!(command = descriptor.name, len = packet.len(), "decoding reply");
    match descriptor.opcode {
        SD_BLE_GAP_CONN_PARAM_UPDATE => {
            decode_as::<GapConnParamUpdate, _>(packet, |_| ReplyOutput::Empty)
        }
        SD_BLE_GAP_DISCONNECT => decode_as::<GapDisconnect, _>(packet, |_| ReplyOutput::Empty),
        SD_BLE_GAP_TX_POWER_SET => decode_as::<GapTxPowerSet, _>(packet, |_| ReplyOutput::Empty),
        SD_BLE_GAP_PPCP_SET => decode_as::<GapPpcpSet, _>(packet, |_| ReplyOutput::Empty),
        SD_BLE_GAP_PPCP_GET => decode_as::<GapPpcpGet, _>(packet, ReplyOutput::ConnParams),
        SD_BLE_GATTS_SERVICE_ADD => decode_as::<GattsServiceAdd, _>(packet, ReplyOutput::Handle),
        SD_BLE_GATTS_CHARACTERISTIC_ADD => {
            decode_as::<GattsCharacteristicAdd, _>(packet, ReplyOutput::CharHandles)
        }
        SD_BLE_GATTS_DESCRIPTOR_ADD => {
            decode_as::<GattsDescriptorAdd, _>(packet, ReplyOutput::Handle)
        }
        other => Err(BleError::UnknownOpcode(other)),
    }
}
