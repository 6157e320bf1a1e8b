//! Conditional fields.
//!
//! An optional argument is preceded by a one-byte presence marker. When the
//! marker is NOT_PRESENT nothing else follows, so absence costs exactly one
//! byte on the wire.
//!
//! ```text
//! absent:  | 0x00 |
//! present: | 0x01 | value ... |
//! ```

use crate::codec::{Decode, Encode};
use crate::cursor::{Reader, Writer};
use crate::error::{CodecError, CodecResult};

/// Marker byte for an omitted field.
pub const SER_FIELD_NOT_PRESENT: u8 = 0x00;
/// Marker byte for a field whose value follows.
pub const SER_FIELD_PRESENT: u8 = 0x01;

/// Decoded presence marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Presence {
    /// The field's value follows the marker.
    Present,
    /// The field was omitted.
    NotPresent,
}

impl Presence {
    /// Marker for an optional value.
    pub fn of<T>(value: &Option<T>) -> Self {
        Presence::from(value.is_some())
    }

    /// The marker byte.
    pub fn marker(self) -> u8 {
        match self {
            Presence::Present => SER_FIELD_PRESENT,
            Presence::NotPresent => SER_FIELD_NOT_PRESENT,
        }
    }

    /// Whether a value follows.
    pub fn is_present(self) -> bool {
        self == Presence::Present
    }
}

impl From<bool> for Presence {
    fn from(present: bool) -> Self {
        if present {
            Presence::Present
        } else {
            Presence::NotPresent
        }
    }
}

impl Encode for Presence {
    fn encoded_len(&self) -> usize {
        1
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.marker().encode(w)
    }
}

impl Decode for Presence {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        let offset = r.position();
        match u8::decode(r)? {
            SER_FIELD_PRESENT => Ok(Presence::Present),
            SER_FIELD_NOT_PRESENT => Ok(Presence::NotPresent),
            value => Err(CodecError::UnexpectedMarker { offset, value }),
        }
    }
}

/// Write a conditional field with a custom sub-encoder.
pub fn encode_cond<T, F>(w: &mut Writer<'_>, value: Option<&T>, encode: F) -> CodecResult<()>
where
    T: ?Sized,
    F: FnOnce(&T, &mut Writer<'_>) -> CodecResult<()>,
{
    match value {
        None => Presence::NotPresent.encode(w),
        Some(value) => {
            Presence::Present.encode(w)?;
            encode(value, w)
        }
    }
}

/// Read a conditional field with a custom sub-decoder.
pub fn decode_cond<T, F>(r: &mut Reader<'_>, decode: F) -> CodecResult<Option<T>>
where
    F: FnOnce(&mut Reader<'_>) -> CodecResult<T>,
{
    match Presence::decode(r)? {
        Presence::NotPresent => Ok(None),
        Presence::Present => decode(r).map(Some),
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encoded_len(&self) -> usize {
        1 + self.as_ref().map_or(0, Encode::encoded_len)
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        encode_cond(w, self.as_ref(), T::encode)
    }

    fn validate(&self) -> CodecResult<()> {
        self.as_ref().map_or(Ok(()), T::validate)
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        decode_cond(r, T::decode)
    }
}

/// A conditional field that never carries a value on the request side.
///
/// Calls that hand back allocated handles take an output slot: the caller
/// marks whether it wants the result, and the response then carries the
/// value as an ordinary conditional field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OutputSlot(pub bool);

impl OutputSlot {
    /// Ask for the output.
    pub const WANTED: OutputSlot = OutputSlot(true);
    /// Do not ask for the output.
    pub const UNWANTED: OutputSlot = OutputSlot(false);
}

impl Encode for OutputSlot {
    fn encoded_len(&self) -> usize {
        1
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        Presence::from(self.0).encode(w)
    }
}

impl Decode for OutputSlot {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        Ok(OutputSlot(Presence::decode(r)?.is_present()))
    }
}

/// A byte blob sent as `length:u16` followed by the bytes as a conditional
/// field.
///
/// The length goes on the wire even when the bytes are absent; the remote
/// side then only reserves room. When present, `data` must be exactly
/// `len` bytes long.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Len16Data {
    /// Declared length.
    pub len: u16,
    /// The bytes, if supplied.
    pub data: Option<Vec<u8>>,
}

impl Len16Data {
    /// A blob whose length is taken from the bytes.
    ///
    /// Fails if `data` does not fit a 16-bit length.
    pub fn from_bytes(field: &'static str, data: Vec<u8>) -> CodecResult<Self> {
        let len = u16::try_from(data.len()).map_err(|_| {
            CodecError::invalid_argument(field, format!("{} bytes exceed u16 length", data.len()))
        })?;
        Ok(Len16Data {
            len,
            data: Some(data),
        })
    }

    /// A length-only blob with no bytes.
    pub fn reserve_only(len: u16) -> Self {
        Len16Data { len, data: None }
    }

    /// Check that supplied bytes agree with the declared length.
    pub fn check_len(&self, field: &'static str) -> CodecResult<()> {
        match &self.data {
            Some(data) if data.len() != usize::from(self.len) => Err(CodecError::invalid_argument(
                field,
                format!("declared length {} but {} bytes supplied", self.len, data.len()),
            )),
            _ => Ok(()),
        }
    }

    /// Write the blob, checking the declared length against the bytes first.
    pub fn encode_checked(&self, field: &'static str, w: &mut Writer<'_>) -> CodecResult<()> {
        self.check_len(field)?;
        self.encode(w)
    }
}

impl Encode for Len16Data {
    fn encoded_len(&self) -> usize {
        2 + 1 + self.data.as_ref().map_or(0, Vec::len)
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        self.check_len("data")?;
        self.len.encode(w)?;
        encode_cond(w, self.data.as_deref(), |bytes, w| w.put_slice(bytes))
    }

    fn validate(&self) -> CodecResult<()> {
        self.check_len("data")
    }
}

impl Decode for Len16Data {
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
        let len = u16::decode(r)?;
        let data = decode_cond(r, |r| r.take(usize::from(len)).map(<[u8]>::to_vec))?;
        Ok(Len16Data { len, data })
    }
}
