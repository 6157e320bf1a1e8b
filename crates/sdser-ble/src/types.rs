//! Compound argument types and their wire layouts.
//!
//! Every structure is written field by field in the order listed on its type,
//! with no padding and no field tags. Decoding visits the fields in the same
//! order.

use sdser_codec::{
    decode_cond, encode_cond, CodecError, CodecResult, Decode, Encode, Len16Data, Reader, Writer,
};
use serde::{Deserialize, Serialize};

use crate::constants::*;

// ============================================================================
// GAP
// ============================================================================

/// GAP connection parameters.
///
/// Wire order: `min_conn_interval:u16 | max_conn_interval:u16 |
/// slave_latency:u16 | conn_sup_timeout:u16`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnParams {
    /// Minimum connection interval in 1.25 ms units.
    pub min_conn_interval: u16,
    /// Maximum connection interval in 1.25 ms units.
    pub max_conn_interval: u16,
    /// Slave latency in number of connection events.
    pub slave_latency: u16,
    /// Supervision timeout in 10 ms units.
    pub conn_sup_timeout: u16,
}

impl ConnParams {
    /// Whether every field lies inside the Bluetooth Core limits.
    ///
    /// The codec never enforces this; the remote side does.
    pub fn is_within_limits(&self) -> bool {
        (BLE_GAP_CP_MIN_CONN_INTVL_MIN..=BLE_GAP_CP_MAX_CONN_INTVL_MAX)
            .contains(&self.min_conn_interval)
            && (self.min_conn_interval..=BLE_GAP_CP_MAX_CONN_INTVL_MAX)
                .contains(&self.max_conn_interval)
            && self.slave_latency <= BLE_GAP_CP_SLAVE_LATENCY_MAX
            && (BLE_GAP_CP_CONN_SUP_TIMEOUT_MIN..=BLE_GAP_CP_CONN_SUP_TIMEOUT_MAX)
                .contains(&self.conn_sup_timeout)
    }
}

impl Encode for ConnParams {
    fn encoded_len(&self) -> usize {
        8
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.min_conn_interval.encode(w)?;
        self.max_conn_interval.encode(w)?;
        self.slave_latency.encode(w)?;
        self.conn_sup_timeout.encode(w)
    }
}

impl Decode for ConnParams {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        Ok(ConnParams {
            min_conn_interval: u16::decode(r)?,
            max_conn_interval: u16::decode(r)?,
            slave_latency: u16::decode(r)?,
            conn_sup_timeout: u16::decode(r)?,
        })
    }
}

/// GAP connection security mode.
///
/// Wire format: one byte, `sm` in the low nibble and `lv` in the high nibble.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnSecMode {
    /// Security mode (1 or 2; 0 means no access).
    pub sm: u8,
    /// Level (1 to 4; 0 means no access).
    pub lv: u8,
}

impl ConnSecMode {
    /// No access rights.
    pub const NO_ACCESS: ConnSecMode = ConnSecMode { sm: 0, lv: 0 };
    /// Open link, no encryption required.
    pub const OPEN: ConnSecMode = ConnSecMode { sm: 1, lv: 1 };
    /// Encryption required, no MITM protection.
    pub const ENC_NO_MITM: ConnSecMode = ConnSecMode { sm: 1, lv: 2 };

    fn to_byte(self) -> u8 {
        self.sm | (self.lv << 4)
    }

    fn from_byte(byte: u8) -> Self {
        ConnSecMode {
            sm: byte & 0x0F,
            lv: byte >> 4,
        }
    }
}

impl Encode for ConnSecMode {
    fn encoded_len(&self) -> usize {
        1
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.validate()?;
        self.to_byte().encode(w)
    }

    fn validate(&self) -> CodecResult<()> {
        if self.sm > 0x0F {
            return Err(CodecError::invalid_argument(
                "conn_sec_mode.sm",
                format!("{} does not fit in 4 bits", self.sm),
            ));
        }
        if self.lv > 0x0F {
            return Err(CodecError::invalid_argument(
                "conn_sec_mode.lv",
                format!("{} does not fit in 4 bits", self.lv),
            ));
        }
        Ok(())
    }
}

impl Decode for ConnSecMode {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        u8::decode(r).map(ConnSecMode::from_byte)
    }
}

// ============================================================================
// UUID
// ============================================================================

/// Bluetooth UUID as seen by the SoftDevice.
///
/// Wire order: `uuid:u16 | type:u8`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Uuid {
    /// 16-bit UUID value (or octets 12-13 of a vendor base UUID).
    pub uuid: u16,
    /// UUID type (`BLE_UUID_TYPE_*`).
    #[serde(rename = "type", default = "default_uuid_type")]
    pub uuid_type: u8,
}

fn default_uuid_type() -> u8 {
    BLE_UUID_TYPE_BLE
}

impl Uuid {
    /// A Bluetooth SIG 16-bit UUID.
    pub fn ble(uuid: u16) -> Self {
        Uuid {
            uuid,
            uuid_type: BLE_UUID_TYPE_BLE,
        }
    }
}

impl Encode for Uuid {
    fn encoded_len(&self) -> usize {
        3
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.uuid.encode(w)?;
        self.uuid_type.encode(w)
    }
}

impl Decode for Uuid {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        Ok(Uuid {
            uuid: u16::decode(r)?,
            uuid_type: u8::decode(r)?,
        })
    }
}

// ============================================================================
// GATTS attribute metadata
// ============================================================================

/// Attribute metadata.
///
/// Wire order: `read_perm | write_perm | flags:u8`, where flags packs
/// `vlen` (bit 0), `vloc` (bits 1-2), `rd_auth` (bit 3) and `wr_auth` (bit 4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AttrMd {
    /// Read permissions.
    pub read_perm: ConnSecMode,
    /// Write permissions.
    pub write_perm: ConnSecMode,
    /// Variable length attribute.
    pub vlen: bool,
    /// Value location (`BLE_GATTS_VLOC_*`).
    pub vloc: u8,
    /// Read authorization and value will be requested from the application.
    pub rd_auth: bool,
    /// Write authorization will be requested from the application.
    pub wr_auth: bool,
}

impl Default for AttrMd {
    fn default() -> Self {
        AttrMd {
            read_perm: ConnSecMode::OPEN,
            write_perm: ConnSecMode::OPEN,
            vlen: false,
            vloc: BLE_GATTS_VLOC_STACK,
            rd_auth: false,
            wr_auth: false,
        }
    }
}

impl Encode for AttrMd {
    fn encoded_len(&self) -> usize {
        3
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.validate()?;
        self.read_perm.encode(w)?;
        self.write_perm.encode(w)?;
        let flags = u8::from(self.vlen)
            | (self.vloc << 1)
            | (u8::from(self.rd_auth) << 3)
            | (u8::from(self.wr_auth) << 4);
        flags.encode(w)
    }

    fn validate(&self) -> CodecResult<()> {
        self.read_perm.validate()?;
        self.write_perm.validate()?;
        if self.vloc > 0x03 {
            return Err(CodecError::invalid_argument(
                "attr_md.vloc",
                format!("{} does not fit in 2 bits", self.vloc),
            ));
        }
        Ok(())
    }
}

impl Decode for AttrMd {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        let read_perm = ConnSecMode::decode(r)?;
        let write_perm = ConnSecMode::decode(r)?;
        let flags = u8::decode(r)?;
        Ok(AttrMd {
            read_perm,
            write_perm,
            vlen: flags & 0x01 != 0,
            vloc: (flags >> 1) & 0x03,
            rd_auth: flags & 0x08 != 0,
            wr_auth: flags & 0x10 != 0,
        })
    }
}

/// Characteristic properties, packed into one byte from bit 0 upward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CharProps {
    /// Broadcasting of the value permitted.
    pub broadcast: bool,
    /// Reading the value permitted.
    pub read: bool,
    /// Writing the value with Write Command permitted.
    pub write_wo_resp: bool,
    /// Writing the value with Write Request permitted.
    pub write: bool,
    /// Notification of the value permitted.
    pub notify: bool,
    /// Indication of the value permitted.
    pub indicate: bool,
    /// Writing the value with Signed Write Command permitted.
    pub auth_signed_wr: bool,
}

impl CharProps {
    fn to_byte(self) -> u8 {
        [
            self.broadcast,
            self.read,
            self.write_wo_resp,
            self.write,
            self.notify,
            self.indicate,
            self.auth_signed_wr,
        ]
        .iter()
        .enumerate()
        .fold(0u8, |acc, (bit, &set)| acc | (u8::from(set) << bit))
    }

    fn from_byte(byte: u8) -> Self {
        let bit = |n: u8| byte & (1 << n) != 0;
        CharProps {
            broadcast: bit(0),
            read: bit(1),
            write_wo_resp: bit(2),
            write: bit(3),
            notify: bit(4),
            indicate: bit(5),
            auth_signed_wr: bit(6),
        }
    }
}

impl Encode for CharProps {
    fn encoded_len(&self) -> usize {
        1
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.to_byte().encode(w)
    }
}

impl Decode for CharProps {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        u8::decode(r).map(CharProps::from_byte)
    }
}

/// Extended characteristic properties: `reliable_wr` (bit 0), `wr_aux` (bit 1).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CharExtProps {
    /// Writing the value with Queued Write operations permitted.
    pub reliable_wr: bool,
    /// Writing the Characteristic User Description descriptor permitted.
    pub wr_aux: bool,
}

impl Encode for CharExtProps {
    fn encoded_len(&self) -> usize {
        1
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        (u8::from(self.reliable_wr) | (u8::from(self.wr_aux) << 1)).encode(w)
    }
}

impl Decode for CharExtProps {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        let byte = u8::decode(r)?;
        Ok(CharExtProps {
            reliable_wr: byte & 0x01 != 0,
            wr_aux: byte & 0x02 != 0,
        })
    }
}

/// Characteristic presentation format descriptor.
///
/// Wire order: `format:u8 | exponent:i8 | unit:u16 | name_space:u8 | desc:u16`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PresentationFormat {
    /// Format of the value (`BLE_GATT_CPF_FORMAT_*`).
    pub format: u8,
    /// Exponent for integer types.
    pub exponent: i8,
    /// Unit UUID from the Bluetooth SIG assigned numbers.
    pub unit: u16,
    /// Namespace of the description.
    pub name_space: u8,
    /// Namespace description.
    pub desc: u16,
}

impl Encode for PresentationFormat {
    fn encoded_len(&self) -> usize {
        7
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.format.encode(w)?;
        self.exponent.encode(w)?;
        self.unit.encode(w)?;
        self.name_space.encode(w)?;
        self.desc.encode(w)
    }
}

impl Decode for PresentationFormat {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        Ok(PresentationFormat {
            format: u8::decode(r)?,
            exponent: i8::decode(r)?,
            unit: u16::decode(r)?,
            name_space: u8::decode(r)?,
            desc: u16::decode(r)?,
        })
    }
}

/// Characteristic metadata.
///
/// Wire order:
///
/// ```text
/// char_props:1 | char_ext_props:1 | user_desc_max_size:u16 |
/// len16data(user_desc) | cond(presentation_format) |
/// cond(user_desc_md) | cond(cccd_md) | cond(sccd_md)
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CharMd {
    /// Characteristic properties.
    pub char_props: CharProps,
    /// Extended characteristic properties.
    pub char_ext_props: CharExtProps,
    /// Maximum size of the user description descriptor.
    pub user_desc_max_size: u16,
    /// Initial user description (length is sent even without the bytes).
    pub user_desc: Len16Data,
    /// Presentation format descriptor, if any.
    pub presentation_format: Option<PresentationFormat>,
    /// Metadata for the user description descriptor.
    pub user_desc_md: Option<AttrMd>,
    /// Metadata for the client characteristic configuration descriptor.
    pub cccd_md: Option<AttrMd>,
    /// Metadata for the server characteristic configuration descriptor.
    pub sccd_md: Option<AttrMd>,
}

impl Encode for CharMd {
    fn encoded_len(&self) -> usize {
        self.char_props.encoded_len()
            + self.char_ext_props.encoded_len()
            + self.user_desc_max_size.encoded_len()
            + self.user_desc.encoded_len()
            + self.presentation_format.encoded_len()
            + self.user_desc_md.encoded_len()
            + self.cccd_md.encoded_len()
            + self.sccd_md.encoded_len()
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.char_props.encode(w)?;
        self.char_ext_props.encode(w)?;
        self.user_desc_max_size.encode(w)?;
        self.user_desc.encode_checked("char_md.user_desc", w)?;
        self.presentation_format.encode(w)?;
        self.user_desc_md.encode(w)?;
        self.cccd_md.encode(w)?;
        self.sccd_md.encode(w)
    }

    fn validate(&self) -> CodecResult<()> {
        self.user_desc.check_len("char_md.user_desc")?;
        self.user_desc_md.validate()?;
        self.cccd_md.validate()?;
        self.sccd_md.validate()
    }
}

impl Decode for CharMd {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        Ok(CharMd {
            char_props: CharProps::decode(r)?,
            char_ext_props: CharExtProps::decode(r)?,
            user_desc_max_size: u16::decode(r)?,
            user_desc: Len16Data::decode(r)?,
            presentation_format: Option::decode(r)?,
            user_desc_md: Option::decode(r)?,
            cccd_md: Option::decode(r)?,
            sccd_md: Option::decode(r)?,
        })
    }
}

/// A GATT attribute.
///
/// Wire order:
///
/// ```text
/// cond(uuid) | cond(attr_md) | init_len:u16 | init_offs:u16 | max_len:u16 |
/// cond(value[init_len])
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Attr {
    /// Attribute UUID.
    pub uuid: Option<Uuid>,
    /// Attribute metadata.
    pub attr_md: Option<AttrMd>,
    /// Initial value length in bytes.
    pub init_len: u16,
    /// Initial value offset in bytes.
    pub init_offs: u16,
    /// Maximum value length in bytes.
    pub max_len: u16,
    /// Initial value; exactly `init_len` bytes when present.
    pub value: Option<Vec<u8>>,
}

impl Attr {
    /// An attribute with an initial value, `init_len` taken from it.
    pub fn with_value(uuid: Uuid, attr_md: AttrMd, value: Vec<u8>, max_len: u16) -> CodecResult<Self> {
        let init_len = u16::try_from(value.len()).map_err(|_| {
            CodecError::invalid_argument("attr.value", format!("{} bytes exceed u16 length", value.len()))
        })?;
        Ok(Attr {
            uuid: Some(uuid),
            attr_md: Some(attr_md),
            init_len,
            init_offs: 0,
            max_len,
            value: Some(value),
        })
    }

    fn check_value(&self) -> CodecResult<()> {
        match &self.value {
            Some(value) if value.len() != usize::from(self.init_len) => {
                Err(CodecError::invalid_argument(
                    "attr.value",
                    format!(
                        "init_len is {} but {} bytes supplied",
                        self.init_len,
                        value.len()
                    ),
                ))
            }
            _ => Ok(()),
        }
    }
}

impl Encode for Attr {
    fn encoded_len(&self) -> usize {
        self.uuid.encoded_len()
            + self.attr_md.encoded_len()
            + 6
            + 1
            + self.value.as_ref().map_or(0, Vec::len)
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.check_value()?;
        self.uuid.encode(w)?;
        self.attr_md.encode(w)?;
        self.init_len.encode(w)?;
        self.init_offs.encode(w)?;
        self.max_len.encode(w)?;
        encode_cond(w, self.value.as_deref(), |bytes, w| w.put_slice(bytes))
    }

    fn validate(&self) -> CodecResult<()> {
        self.check_value()?;
        self.attr_md.validate()
    }
}

impl Decode for Attr {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        let uuid = Option::decode(r)?;
        let attr_md = Option::decode(r)?;
        let init_len = u16::decode(r)?;
        let init_offs = u16::decode(r)?;
        let max_len = u16::decode(r)?;
        let value = decode_cond(r, |r| r.take(usize::from(init_len)).map(<[u8]>::to_vec))?;
        Ok(Attr {
            uuid,
            attr_md,
            init_len,
            init_offs,
            max_len,
            value,
        })
    }
}

/// Handles assigned to a newly added characteristic.
///
/// Wire order: `value_handle | user_desc_handle | cccd_handle | sccd_handle`,
/// all u16.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharHandles {
    /// Handle of the characteristic value.
    pub value_handle: u16,
    /// Handle of the user description descriptor, or `BLE_GATT_HANDLE_INVALID`.
    pub user_desc_handle: u16,
    /// Handle of the CCCD, or `BLE_GATT_HANDLE_INVALID`.
    pub cccd_handle: u16,
    /// Handle of the SCCD, or `BLE_GATT_HANDLE_INVALID`.
    pub sccd_handle: u16,
}

impl Encode for CharHandles {
    fn encoded_len(&self) -> usize {
        8
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.value_handle.encode(w)?;
        self.user_desc_handle.encode(w)?;
        self.cccd_handle.encode(w)?;
        self.sccd_handle.encode(w)
    }
}

impl Decode for CharHandles {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        Ok(CharHandles {
            value_handle: u16::decode(r)?,
            user_desc_handle: u16::decode(r)?,
            cccd_handle: u16::decode(r)?,
            sccd_handle: u16::decode(r)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdser_codec::{from_slice, to_vec};

    #[test]
    fn test_conn_params_layout() {
        let params = ConnParams {
            min_conn_interval: 0x0006,
            max_conn_interval: 0x000C,
            slave_latency: 0x0000,
            conn_sup_timeout: 0x01F4,
        };
        let bytes = to_vec(&params).unwrap();
        assert_eq!(bytes, vec![0x06, 0x00, 0x0C, 0x00, 0x00, 0x00, 0xF4, 0x01]);
        assert_eq!(from_slice::<ConnParams>(&bytes).unwrap(), params);
        assert!(params.is_within_limits());
    }

    #[test]
    fn test_conn_params_limits() {
        let params = ConnParams {
            min_conn_interval: 0x0010,
            max_conn_interval: 0x0008,
            slave_latency: 0,
            conn_sup_timeout: 400,
        };
        assert!(!params.is_within_limits());
    }

    #[test]
    fn test_conn_sec_mode_nibbles() {
        assert_eq!(to_vec(&ConnSecMode::OPEN).unwrap(), vec![0x11]);
        assert_eq!(to_vec(&ConnSecMode { sm: 2, lv: 1 }).unwrap(), vec![0x12]);
        assert_eq!(from_slice::<ConnSecMode>(&[0x21]).unwrap(), ConnSecMode::ENC_NO_MITM);
    }

    #[test]
    fn test_attr_md_flags() {
        let md = AttrMd {
            read_perm: ConnSecMode::OPEN,
            write_perm: ConnSecMode::NO_ACCESS,
            vlen: true,
            vloc: BLE_GATTS_VLOC_USER,
            rd_auth: false,
            wr_auth: true,
        };
        let bytes = to_vec(&md).unwrap();
        assert_eq!(bytes, vec![0x11, 0x00, 0b0001_0101]);
        assert_eq!(from_slice::<AttrMd>(&bytes).unwrap(), md);
    }

    #[test]
    fn test_conn_sec_mode_out_of_range() {
        let err = to_vec(&ConnSecMode { sm: 17, lv: 1 }).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidArgument {
                field: "conn_sec_mode.sm",
                ..
            }
        ));
        let err = ConnSecMode { sm: 1, lv: 0x10 }.validate().unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidArgument {
                field: "conn_sec_mode.lv",
                ..
            }
        ));
    }

    #[test]
    fn test_attr_md_out_of_range() {
        let md = AttrMd {
            vloc: 5,
            ..Default::default()
        };
        let err = to_vec(&md).unwrap_err();
        assert!(matches!(
            err,
            CodecError::InvalidArgument {
                field: "attr_md.vloc",
                ..
            }
        ));

        let md = AttrMd {
            read_perm: ConnSecMode { sm: 17, lv: 1 },
            ..Default::default()
        };
        assert!(matches!(
            md.validate(),
            Err(CodecError::InvalidArgument {
                field: "conn_sec_mode.sm",
                ..
            })
        ));

        let mut buf = [0xEEu8; 3];
        let err = md.encode(&mut Writer::new(&mut buf)).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument { .. }));
        assert_eq!(buf, [0xEE; 3]);
    }

    #[test]
    fn test_char_md_validate_reaches_nested_metadata() {
        let md = CharMd {
            cccd_md: Some(AttrMd {
                vloc: 4,
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(matches!(
            md.validate(),
            Err(CodecError::InvalidArgument {
                field: "attr_md.vloc",
                ..
            })
        ));

        let md = CharMd {
            user_desc: Len16Data {
                len: 2,
                data: Some(vec![b'x']),
            },
            ..Default::default()
        };
        assert!(matches!(
            md.validate(),
            Err(CodecError::InvalidArgument {
                field: "char_md.user_desc",
                ..
            })
        ));
    }

    #[test]
    fn test_char_props_bits() {
        let props = CharProps {
            read: true,
            notify: true,
            ..Default::default()
        };
        assert_eq!(to_vec(&props).unwrap(), vec![0b0001_0010]);
        assert_eq!(from_slice::<CharProps>(&[0b0001_0010]).unwrap(), props);
    }

    #[test]
    fn test_presentation_format_layout() {
        let pf = PresentationFormat {
            format: BLE_GATT_CPF_FORMAT_UINT8,
            exponent: -1,
            unit: 0x27AD,
            name_space: BLE_GATT_CPF_NAMESPACE_BTSIG,
            desc: 0x0001,
        };
        let bytes = to_vec(&pf).unwrap();
        assert_eq!(bytes, vec![0x04, 0xFF, 0xAD, 0x27, 0x01, 0x01, 0x00]);
        assert_eq!(from_slice::<PresentationFormat>(&bytes).unwrap(), pf);
    }

    #[test]
    fn test_minimal_char_md() {
        let md = CharMd::default();
        let bytes = to_vec(&md).unwrap();
        // props, ext props, max size, user desc len + marker, four absent conds
        assert_eq!(bytes, vec![0, 0, 0, 0, 0, 0, 0x00, 0x00, 0x00, 0x00, 0x00]);
        assert_eq!(md.encoded_len(), bytes.len());
        assert_eq!(from_slice::<CharMd>(&bytes).unwrap(), md);
    }

    #[test]
    fn test_attr_layout() {
        let attr = Attr::with_value(Uuid::ble(0x2A19), AttrMd::default(), vec![100], 1).unwrap();
        let bytes = to_vec(&attr).unwrap();
        assert_eq!(
            bytes,
            vec![
                0x01, 0x19, 0x2A, 0x01, // cond(uuid)
                0x01, 0x11, 0x11, 0x02, // cond(attr_md)
                0x01, 0x00, // init_len
                0x00, 0x00, // init_offs
                0x01, 0x00, // max_len
                0x01, 100, // cond(value)
            ]
        );
        assert_eq!(from_slice::<Attr>(&bytes).unwrap(), attr);
    }

    #[test]
    fn test_attr_value_length_disagreement() {
        let attr = Attr {
            init_len: 3,
            value: Some(vec![1]),
            ..Default::default()
        };
        let err = to_vec(&attr).unwrap_err();
        assert!(matches!(err, CodecError::InvalidArgument { field: "attr.value", .. }));
    }

    #[test]
    fn test_attr_decode_truncated_value() {
        // init_len says 4 but only 2 value bytes follow.
        let bytes = [0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x04, 0x00, 0x01, 0xAA, 0xBB];
        let err = from_slice::<Attr>(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::LengthMismatch { expected: 13, actual: 11 }));
    }

    #[test]
    fn test_char_handles_layout() {
        let handles = CharHandles {
            value_handle: 0x000E,
            user_desc_handle: 0,
            cccd_handle: 0x000F,
            sccd_handle: 0,
        };
        let bytes = to_vec(&handles).unwrap();
        assert_eq!(bytes, vec![0x0E, 0x00, 0x00, 0x00, 0x0F, 0x00, 0x00, 0x00]);
        assert_eq!(from_slice::<CharHandles>(&bytes).unwrap(), handles);
    }
}
