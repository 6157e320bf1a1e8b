//! Result codes reported by the remote SoftDevice.

use std::fmt;

use crate::codec::{Decode, Encode};
use crate::cursor::{Reader, Writer};
use crate::error::CodecResult;

/// Base of the generic error range.
pub const NRF_ERROR_BASE_NUM: u32 = 0x0;
/// Base of the SoftDevice-manager error range.
pub const NRF_ERROR_SDM_BASE_NUM: u32 = 0x1000;
/// Base of the SoC library error range.
pub const NRF_ERROR_SOC_BASE_NUM: u32 = 0x2000;
/// Base of the BLE stack error range.
pub const NRF_ERROR_STK_BASE_NUM: u32 = 0x3000;

/// A 32-bit status value carried in every response envelope.
///
/// Zero means success; every other value is a failure reported by the
/// remote side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResultCode(pub u32);

impl ResultCode {
    /// Success.
    pub const SUCCESS: ResultCode = ResultCode(NRF_ERROR_BASE_NUM);
    /// No handler for the supervisor call.
    pub const SVC_HANDLER_MISSING: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 1);
    /// The SoftDevice has not been enabled.
    pub const SOFTDEVICE_NOT_ENABLED: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 2);
    /// Internal error on the remote side.
    pub const INTERNAL: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 3);
    /// Out of memory.
    pub const NO_MEM: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 4);
    /// Requested item not found.
    pub const NOT_FOUND: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 5);
    /// Operation not supported.
    pub const NOT_SUPPORTED: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 6);
    /// A parameter was rejected.
    pub const INVALID_PARAM: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 7);
    /// Call not allowed in the current state.
    pub const INVALID_STATE: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 8);
    /// A length field was rejected.
    pub const INVALID_LENGTH: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 9);
    /// A flags field was rejected.
    pub const INVALID_FLAGS: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 10);
    /// Data was rejected.
    pub const INVALID_DATA: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 11);
    /// Data size exceeds the limit.
    pub const DATA_SIZE: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 12);
    /// Operation timed out.
    pub const TIMEOUT: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 13);
    /// A mandatory pointer was null.
    pub const NULL: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 14);
    /// Operation forbidden.
    pub const FORBIDDEN: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 15);
    /// Bad memory address.
    pub const INVALID_ADDR: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 16);
    /// Busy; retry later.
    pub const BUSY: ResultCode = ResultCode(NRF_ERROR_BASE_NUM + 17);
    /// The BLE stack has not been enabled.
    pub const BLE_NOT_ENABLED: ResultCode = ResultCode(NRF_ERROR_STK_BASE_NUM + 1);
    /// Unknown connection handle.
    pub const BLE_INVALID_CONN_HANDLE: ResultCode = ResultCode(NRF_ERROR_STK_BASE_NUM + 2);
    /// Unknown attribute handle.
    pub const BLE_INVALID_ATTR_HANDLE: ResultCode = ResultCode(NRF_ERROR_STK_BASE_NUM + 3);
    /// No transmit buffers available.
    pub const BLE_NO_TX_PACKETS: ResultCode = ResultCode(NRF_ERROR_STK_BASE_NUM + 4);

    /// Whether this is the success value.
    pub fn is_success(self) -> bool {
        self == ResultCode::SUCCESS
    }

    /// Symbolic name for well-known codes.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            ResultCode::SUCCESS => "NRF_SUCCESS",
            ResultCode::SVC_HANDLER_MISSING => "NRF_ERROR_SVC_HANDLER_MISSING",
            ResultCode::SOFTDEVICE_NOT_ENABLED => "NRF_ERROR_SOFTDEVICE_NOT_ENABLED",
            ResultCode::INTERNAL => "NRF_ERROR_INTERNAL",
            ResultCode::NO_MEM => "NRF_ERROR_NO_MEM",
            ResultCode::NOT_FOUND => "NRF_ERROR_NOT_FOUND",
            ResultCode::NOT_SUPPORTED => "NRF_ERROR_NOT_SUPPORTED",
            ResultCode::INVALID_PARAM => "NRF_ERROR_INVALID_PARAM",
            ResultCode::INVALID_STATE => "NRF_ERROR_INVALID_STATE",
            ResultCode::INVALID_LENGTH => "NRF_ERROR_INVALID_LENGTH",
            ResultCode::INVALID_FLAGS => "NRF_ERROR_INVALID_FLAGS",
            ResultCode::INVALID_DATA => "NRF_ERROR_INVALID_DATA",
            ResultCode::DATA_SIZE => "NRF_ERROR_DATA_SIZE",
            ResultCode::TIMEOUT => "NRF_ERROR_TIMEOUT",
            ResultCode::NULL => "NRF_ERROR_NULL",
            ResultCode::FORBIDDEN => "NRF_ERROR_FORBIDDEN",
            ResultCode::INVALID_ADDR => "NRF_ERROR_INVALID_ADDR",
            ResultCode::BUSY => "NRF_ERROR_BUSY",
            ResultCode::BLE_NOT_ENABLED => "BLE_ERROR_NOT_ENABLED",
            ResultCode::BLE_INVALID_CONN_HANDLE => "BLE_ERROR_INVALID_CONN_HANDLE",
            ResultCode::BLE_INVALID_ATTR_HANDLE => "BLE_ERROR_INVALID_ATTR_HANDLE",
            ResultCode::BLE_NO_TX_PACKETS => "BLE_ERROR_NO_TX_PACKETS",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ResultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:04X})", name, self.0),
            None => write!(f, "unknown result code (0x{:04X})", self.0),
        }
    }
}

impl From<u32> for ResultCode {
    fn from(code: u32) -> Self {
        ResultCode(code)
    }
}

impl From<ResultCode> for u32 {
    fn from(code: ResultCode) -> Self {
        code.0
    }
}

impl Encode for ResultCode {
    fn encoded_len(&self) -> usize {
        4
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.0.encode(w)
    }
}

impl Decode for ResultCode {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        u32::decode(r).map(ResultCode)
    }
}
