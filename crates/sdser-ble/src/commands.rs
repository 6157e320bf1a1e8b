//! Remote calls that can be sent to the connectivity firmware.
//!
//! Each call is a struct holding its arguments. The [`Encode`] impl writes
//! them in declared order and the [`Command`] impl names the opcode and the
//! success payload; [`sdser_codec::encode_request`] and
//! [`sdser_codec::decode_response`] do the rest.

use sdser_codec::{
    CodecResult, Command, CommandDescriptor, Decode, Encode, OutputSlot, Reader, Writer,
};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::*;

/// Implements [`Encode`] for a call struct by encoding (and validating) the
/// listed fields in order.
macro_rules! encode_fields {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl Encode for $ty {
            fn encoded_len(&self) -> usize {
                0 $(+ self.$field.encoded_len())*
            }

            fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
                $(self.$field.encode(w)?;)*
                Ok(())
            }

            fn validate(&self) -> CodecResult<()> {
                $(self.$field.validate()?;)*
                Ok(())
            }
        }
    };
}

/// Implements [`Decode`] for a call struct by decoding the listed fields in
/// order. Used by the remote side and loopback tests.
macro_rules! decode_fields {
    ($ty:ident { $($field:ident),* $(,)? }) => {
        impl Decode for $ty {
            fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
                Ok($ty {
                    $($field: Decode::decode(r)?,)*
                })
            }
        }
    };
}

// ============================================================================
// GAP
// ============================================================================

/// Update connection parameters.
///
/// Request: `opcode | conn_handle:u16 | cond(ConnParams)`. Response: envelope
/// only. Without parameters the remote side uses the PPCP values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapConnParamUpdate {
    /// Connection handle.
    pub conn_handle: u16,
    /// New parameters; `None` selects the preferred ones.
    pub conn_params: Option<ConnParams>,
}

encode_fields!(GapConnParamUpdate { conn_handle, conn_params });
decode_fields!(GapConnParamUpdate { conn_handle, conn_params });

impl Command for GapConnParamUpdate {
    const DESCRIPTOR: CommandDescriptor =
        CommandDescriptor::new("gap_conn_param_update", SD_BLE_GAP_CONN_PARAM_UPDATE);
    type Output = ();
}

/// Disconnect.
///
/// Request: `opcode | conn_handle:u16 | hci_status_code:u8`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapDisconnect {
    /// Connection handle.
    pub conn_handle: u16,
    /// HCI status code sent to the peer.
    pub hci_status_code: u8,
}

encode_fields!(GapDisconnect { conn_handle, hci_status_code });
decode_fields!(GapDisconnect { conn_handle, hci_status_code });

impl Command for GapDisconnect {
    const DESCRIPTOR: CommandDescriptor =
        CommandDescriptor::new("gap_disconnect", SD_BLE_GAP_DISCONNECT);
    type Output = ();
}

/// Set radio transmit power.
///
/// Request: `opcode | tx_power:i8`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapTxPowerSet {
    /// Transmit power in dBm.
    pub tx_power: i8,
}

encode_fields!(GapTxPowerSet { tx_power });
decode_fields!(GapTxPowerSet { tx_power });

impl Command for GapTxPowerSet {
    const DESCRIPTOR: CommandDescriptor =
        CommandDescriptor::new("gap_tx_power_set", SD_BLE_GAP_TX_POWER_SET);
    type Output = ();
}

/// Set the peripheral preferred connection parameters.
///
/// Request: `opcode | cond(ConnParams)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapPpcpSet {
    /// Preferred parameters.
    pub conn_params: Option<ConnParams>,
}

encode_fields!(GapPpcpSet { conn_params });
decode_fields!(GapPpcpSet { conn_params });

impl Command for GapPpcpSet {
    const DESCRIPTOR: CommandDescriptor = CommandDescriptor::new("gap_ppcp_set", SD_BLE_GAP_PPCP_SET);
    type Output = ();
}

/// Read the peripheral preferred connection parameters.
///
/// Request: `opcode | cond(slot)`. Response on success: `cond(ConnParams)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapPpcpGet {
    /// Whether the caller wants the parameters back.
    pub conn_params: OutputSlot,
}

encode_fields!(GapPpcpGet { conn_params });
decode_fields!(GapPpcpGet { conn_params });

impl Command for GapPpcpGet {
    const DESCRIPTOR: CommandDescriptor = CommandDescriptor::new("gap_ppcp_get", SD_BLE_GAP_PPCP_GET);
    type Output = Option<ConnParams>;
}

// ============================================================================
// GATTS
// ============================================================================

/// Add a service declaration.
///
/// Request: `opcode | type:u8 | cond(Uuid) | cond(slot)`. Response on
/// success: `cond(handle:u16)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GattsServiceAdd {
    /// `BLE_GATTS_SRVC_TYPE_PRIMARY` or `BLE_GATTS_SRVC_TYPE_SECONDARY`.
    pub service_type: u8,
    /// Service UUID.
    pub uuid: Option<Uuid>,
    /// Whether the caller wants the service handle back.
    pub handle: OutputSlot,
}

encode_fields!(GattsServiceAdd { service_type, uuid, handle });
decode_fields!(GattsServiceAdd { service_type, uuid, handle });

impl Command for GattsServiceAdd {
    const DESCRIPTOR: CommandDescriptor =
        CommandDescriptor::new("gatts_service_add", SD_BLE_GATTS_SERVICE_ADD);
    type Output = Option<u16>;
}

/// Add a characteristic to a service.
///
/// Request:
///
/// ```text
/// opcode | service_handle:u16 | cond(CharMd) | cond(Attr) | cond(slot)
/// ```
///
/// Response on success: `cond(CharHandles)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GattsCharacteristicAdd {
    /// Handle of the service the characteristic belongs to.
    pub service_handle: u16,
    /// Characteristic metadata.
    pub char_md: Option<CharMd>,
    /// Characteristic value attribute.
    pub attr_char_value: Option<Attr>,
    /// Whether the caller wants the assigned handles back.
    pub handles: OutputSlot,
}

encode_fields!(GattsCharacteristicAdd {
    service_handle,
    char_md,
    attr_char_value,
    handles,
});
decode_fields!(GattsCharacteristicAdd {
    service_handle,
    char_md,
    attr_char_value,
    handles,
});

impl Command for GattsCharacteristicAdd {
    const DESCRIPTOR: CommandDescriptor =
        CommandDescriptor::new("gatts_characteristic_add", SD_BLE_GATTS_CHARACTERISTIC_ADD);
    type Output = Option<CharHandles>;
}

/// Add a descriptor to the last added characteristic.
///
/// Request: `opcode | char_handle:u16 | cond(Attr) | cond(slot)`. Response
/// on success: `cond(handle:u16)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GattsDescriptorAdd {
    /// Handle of the characteristic the descriptor belongs to.
    pub char_handle: u16,
    /// Descriptor attribute.
    pub attr: Option<Attr>,
    /// Whether the caller wants the descriptor handle back.
    pub handle: OutputSlot,
}

encode_fields!(GattsDescriptorAdd { char_handle, attr, handle });
decode_fields!(GattsDescriptorAdd { char_handle, attr, handle });

impl Command for GattsDescriptorAdd {
    const DESCRIPTOR: CommandDescriptor =
        CommandDescriptor::new("gatts_descriptor_add", SD_BLE_GATTS_DESCRIPTOR_ADD);
    type Output = Option<u16>;
}

// ============================================================================
// Registry
// ============================================================================

/// Every call this crate knows, in opcode order.
pub const COMMANDS: &[CommandDescriptor] = &[
    GapConnParamUpdate::DESCRIPTOR,
    GapDisconnect::DESCRIPTOR,
    GapTxPowerSet::DESCRIPTOR,
    GapPpcpSet::DESCRIPTOR,
    GapPpcpGet::DESCRIPTOR,
    GattsServiceAdd::DESCRIPTOR,
    GattsCharacteristicAdd::DESCRIPTOR,
    GattsDescriptorAdd::DESCRIPTOR,
];

/// Look up a call by name.
pub fn descriptor_by_name(name: &str) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|d| d.name == name)
}

/// Look up a call by opcode.
pub fn descriptor_by_opcode(opcode: u8) -> Option<&'static CommandDescriptor> {
    COMMANDS.iter().find(|d| d.opcode == opcode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdser_codec::{encode_request, from_slice, request_to_vec, to_vec, CodecError};

    #[test]
    fn test_conn_param_update_absent_params() {
        let mut buf = [0u8; 4];
        let cmd = GapConnParamUpdate {
            conn_handle: 0x0010,
            conn_params: None,
        };
        let len = encode_request(&cmd, &mut buf).unwrap();
        assert_eq!(len, 4);
        assert_eq!(buf, [SD_BLE_GAP_CONN_PARAM_UPDATE, 0x10, 0x00, 0x00]);
    }

    #[test]
    fn test_conn_param_update_capacity_three() {
        let mut buf = [0xEEu8; 3];
        let cmd = GapConnParamUpdate {
            conn_handle: 0x0010,
            conn_params: None,
        };
        let err = encode_request(&cmd, &mut buf).unwrap_err();
        assert!(matches!(err, CodecError::BufferTooSmall { needed: 4, capacity: 3, .. }));
        assert_eq!(buf, [0xEE; 3]);
    }

    #[test]
    fn test_disconnect_layout() {
        let cmd = GapDisconnect {
            conn_handle: 0x0001,
            hci_status_code: BLE_HCI_REMOTE_USER_TERMINATED_CONNECTION,
        };
        assert_eq!(
            request_to_vec(&cmd).unwrap(),
            vec![SD_BLE_GAP_DISCONNECT, 0x01, 0x00, 0x13]
        );
    }

    #[test]
    fn test_tx_power_layout() {
        let cmd = GapTxPowerSet { tx_power: -8 };
        assert_eq!(request_to_vec(&cmd).unwrap(), vec![SD_BLE_GAP_TX_POWER_SET, 0xF8]);
    }

    #[test]
    fn test_ppcp_get_layout() {
        let cmd = GapPpcpGet {
            conn_params: OutputSlot::WANTED,
        };
        assert_eq!(request_to_vec(&cmd).unwrap(), vec![SD_BLE_GAP_PPCP_GET, 0x01]);
    }

    #[test]
    fn test_service_add_layout() {
        let cmd = GattsServiceAdd {
            service_type: BLE_GATTS_SRVC_TYPE_PRIMARY,
            uuid: Some(Uuid::ble(0x180F)),
            handle: OutputSlot::WANTED,
        };
        assert_eq!(
            request_to_vec(&cmd).unwrap(),
            vec![SD_BLE_GATTS_SERVICE_ADD, 0x01, 0x01, 0x0F, 0x18, 0x01, 0x01]
        );
    }

    #[test]
    fn test_characteristic_add_all_absent() {
        let cmd = GattsCharacteristicAdd {
            service_handle: 0x000C,
            char_md: None,
            attr_char_value: None,
            handles: OutputSlot::UNWANTED,
        };
        assert_eq!(
            request_to_vec(&cmd).unwrap(),
            vec![SD_BLE_GATTS_CHARACTERISTIC_ADD, 0x0C, 0x00, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_call_struct_loopback() {
        let cmd = GattsDescriptorAdd {
            char_handle: 0x0011,
            attr: Some(Attr::with_value(Uuid::ble(0x2901), AttrMd::default(), b"Level".to_vec(), 5).unwrap()),
            handle: OutputSlot::WANTED,
        };
        let bytes = to_vec(&cmd).unwrap();
        assert_eq!(from_slice::<GattsDescriptorAdd>(&bytes).unwrap(), cmd);
    }

    #[test]
    fn test_registry() {
        assert_eq!(
            descriptor_by_name("gatts_characteristic_add").map(|d| d.opcode),
            Some(SD_BLE_GATTS_CHARACTERISTIC_ADD)
        );
        assert_eq!(
            descriptor_by_opcode(SD_BLE_GAP_CONN_PARAM_UPDATE).map(|d| d.name),
            Some("gap_conn_param_update")
        );
        assert!(descriptor_by_name("gap_scan_start").is_none());

        let mut opcodes: Vec<u8> = COMMANDS.iter().map(|d| d.opcode).collect();
        opcodes.dedup();
        assert_eq!(opcodes.len(), COMMANDS.len());
    }
}
