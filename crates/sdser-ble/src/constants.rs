//! Protocol constants
//!
//! Opcodes and attribute-table constants of the S130 v2 SoftDevice API as
//! exposed by the connectivity firmware.

// ============================================================================
// Service Call Ranges
// ============================================================================

/// First opcode of the GAP service calls.
pub const BLE_GAP_SVC_BASE: u8 = 0x70;
/// First opcode of the GATT client service calls.
pub const BLE_GATTC_SVC_BASE: u8 = 0x90;
/// First opcode of the GATT server service calls.
pub const BLE_GATTS_SVC_BASE: u8 = 0xA0;

// ============================================================================
// GAP Opcodes
// ============================================================================

/// Update connection parameters.
pub const SD_BLE_GAP_CONN_PARAM_UPDATE: u8 = BLE_GAP_SVC_BASE + 0x05;
/// Disconnect (GAP link termination).
pub const SD_BLE_GAP_DISCONNECT: u8 = BLE_GAP_SVC_BASE + 0x06;
/// Set the radio's transmit power.
pub const SD_BLE_GAP_TX_POWER_SET: u8 = BLE_GAP_SVC_BASE + 0x07;
/// Set GAP Peripheral Preferred Connection Parameters.
pub const SD_BLE_GAP_PPCP_SET: u8 = BLE_GAP_SVC_BASE + 0x0A;
/// Get GAP Peripheral Preferred Connection Parameters.
pub const SD_BLE_GAP_PPCP_GET: u8 = BLE_GAP_SVC_BASE + 0x0B;

// ============================================================================
// GATTS Opcodes
// ============================================================================

/// Add a service declaration to the attribute table.
pub const SD_BLE_GATTS_SERVICE_ADD: u8 = BLE_GATTS_SVC_BASE;
/// Add a characteristic declaration, value and descriptors.
pub const SD_BLE_GATTS_CHARACTERISTIC_ADD: u8 = BLE_GATTS_SVC_BASE + 0x02;
/// Add a descriptor to the most recently added characteristic.
pub const SD_BLE_GATTS_DESCRIPTOR_ADD: u8 = BLE_GATTS_SVC_BASE + 0x03;

// ============================================================================
// Attribute Table Constants
// ============================================================================

/// Invalid connection handle.
pub const BLE_CONN_HANDLE_INVALID: u16 = 0xFFFF;
/// Invalid attribute handle.
pub const BLE_GATT_HANDLE_INVALID: u16 = 0x0000;

/// Primary service.
pub const BLE_GATTS_SRVC_TYPE_PRIMARY: u8 = 0x01;
/// Secondary service.
pub const BLE_GATTS_SRVC_TYPE_SECONDARY: u8 = 0x02;

/// UUID type: 16-bit Bluetooth SIG UUID.
pub const BLE_UUID_TYPE_BLE: u8 = 0x01;
/// First vendor-specific UUID type.
pub const BLE_UUID_TYPE_VENDOR_BEGIN: u8 = 0x02;

/// Attribute value stored in the stack's memory.
pub const BLE_GATTS_VLOC_STACK: u8 = 0x01;
/// Attribute value stored in user memory.
pub const BLE_GATTS_VLOC_USER: u8 = 0x02;

/// Characteristic presentation format: unsigned 8-bit integer.
pub const BLE_GATT_CPF_FORMAT_UINT8: u8 = 0x04;
/// Characteristic presentation format: UTF-8 string.
pub const BLE_GATT_CPF_FORMAT_UTF8S: u8 = 0x19;
/// Bluetooth SIG namespace for presentation format descriptions.
pub const BLE_GATT_CPF_NAMESPACE_BTSIG: u8 = 0x01;

/// HCI status: remote user terminated connection.
pub const BLE_HCI_REMOTE_USER_TERMINATED_CONNECTION: u8 = 0x13;
/// HCI status: unacceptable connection interval.
pub const BLE_HCI_CONN_INTERVAL_UNACCEPTABLE: u8 = 0x3B;

// ============================================================================
// Connection Parameter Limits (1.25 ms / 10 ms units)
// ============================================================================

/// Lowest connection interval.
pub const BLE_GAP_CP_MIN_CONN_INTVL_MIN: u16 = 0x0006;
/// Highest connection interval.
pub const BLE_GAP_CP_MAX_CONN_INTVL_MAX: u16 = 0x0C80;
/// Highest slave latency.
pub const BLE_GAP_CP_SLAVE_LATENCY_MAX: u16 = 0x01F3;
/// Lowest supervision timeout.
pub const BLE_GAP_CP_CONN_SUP_TIMEOUT_MIN: u16 = 0x000A;
/// Highest supervision timeout.
pub const BLE_GAP_CP_CONN_SUP_TIMEOUT_MAX: u16 = 0x0C80;
