//! Field codec traits and the fixed-width primitive codecs.
//!
//! All multi-byte integers are little-endian. A value's width is fixed by its
//! type; no range validation happens beyond that.

use bytes::{Buf, BufMut};

use crate::cursor::{Reader, Writer};
use crate::error::CodecResult;

/// A value that can be written to a packet.
pub trait Encode {
    /// Exact number of bytes [`Encode::encode`] will write.
    fn encoded_len(&self) -> usize;

    /// Write the value at the cursor.
    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()>;

    /// Check argument consistency without writing anything.
    ///
    /// Runs before the first byte of a packet is written, so a contract
    /// violation never leaves a partial packet behind.
    fn validate(&self) -> CodecResult<()> {
        Ok(())
    }
}

/// A value that can be read back from a packet.
pub trait Decode: Sized {
    /// Read the value at the cursor.
    fn decode(r: &mut Reader<'_>) -> CodecResult<Self>;
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encoded_len(&self) -> usize {
        (**self).encoded_len()
    }

    fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
        (**self).encode(w)
    }

    fn validate(&self) -> CodecResult<()> {
        (**self).validate()
    }
}

macro_rules! impl_primitive {
    ($ty:ty, $put:ident, $get:ident) => {
        impl Encode for $ty {
            fn encoded_len(&self) -> usize {
                std::mem::size_of::<$ty>()
            }

            fn encode(&self, w: &mut Writer<'_>) -> CodecResult<()> {
                let mut dst = w.reserve(std::mem::size_of::<$ty>())?;
                dst.$put(*self);
                Ok(())
            }
        }

        impl Decode for $ty {
            fn decode(r: &mut Reader<'_>) -> CodecResult<Self> {
                let mut src = r.take(std::mem::size_of::<$ty>())?;
                Ok(src.$get())
            }
        }
    };
}

impl_primitive!(u8, put_u8, get_u8);
impl_primitive!(i8, put_i8, get_i8);
impl_primitive!(u16, put_u16_le, get_u16_le);
impl_primitive!(u32, put_u32_le, get_u32_le);

/// The empty field list. Used as the output of calls whose response is the
/// bare envelope.
impl Encode for () {
    fn encoded_len(&self) -> usize {
        0
    }

    fn encode(&self, _w: &mut Writer<'_>) -> CodecResult<()> {
        Ok(())
    }
}

impl Decode for () {
    fn decode(_r: &mut Reader<'_>) -> CodecResult<Self> {
        Ok(())
    }
}

/// Encode a value into a freshly allocated buffer of exactly its size.
pub fn to_vec<T: Encode + ?Sized>(value: &T) -> CodecResult<Vec<u8>> {
    value.validate()?;
    let mut buf = vec![0u8; value.encoded_len()];
    let mut w = Writer::new(&mut buf);
    value.encode(&mut w)?;
    let len = w.finish();
    buf.truncate(len);
    Ok(buf)
}

/// Decode a value that must occupy the whole of `bytes`.
pub fn from_slice<T: Decode>(bytes: &[u8]) -> CodecResult<T> {
    let mut r = Reader::new(bytes);
    let value = T::decode(&mut r)?;
    r.finish()?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_u16_little_endian() {
        assert_eq!(to_vec(&0x01F4u16).unwrap(), vec![0xF4, 0x01]);
        assert_eq!(from_slice::<u16>(&[0x10, 0x00]).unwrap(), 0x0010);
    }

    #[test]
    fn test_u32_little_endian() {
        assert_eq!(
            to_vec(&0xDEADBEEFu32).unwrap(),
            vec![0xEF, 0xBE, 0xAD, 0xDE]
        );
        assert_eq!(from_slice::<u32>(&[7, 0, 0, 0]).unwrap(), 7);
    }

    #[test]
    fn test_i8_twos_complement() {
        assert_eq!(to_vec(&-4i8).unwrap(), vec![0xFC]);
        assert_eq!(from_slice::<i8>(&[0xEC]).unwrap(), -20);
    }

    #[test]
    fn test_cursor_advances_by_width() {
        let mut buf = [0u8; 7];
        let mut w = Writer::new(&mut buf);
        0xAAu8.encode(&mut w).unwrap();
        assert_eq!(w.position(), 1);
        0xBBCCu16.encode(&mut w).unwrap();
        assert_eq!(w.position(), 3);
        0x11223344u32.encode(&mut w).unwrap();
        assert_eq!(w.finish(), 7);
        assert_eq!(buf, [0xAA, 0xCC, 0xBB, 0x44, 0x33, 0x22, 0x11]);
    }

    #[test]
    fn test_encode_without_room() {
        let mut buf = [0u8; 3];
        let mut w = Writer::new(&mut buf);
        0u16.encode(&mut w).unwrap();
        let err = 0u16.encode(&mut w).unwrap_err();
        assert!(matches!(err, CodecError::BufferTooSmall { offset: 2, needed: 2, .. }));
    }

    #[test]
    fn test_decode_short_buffer() {
        let err = from_slice::<u32>(&[1, 2, 3]).unwrap_err();
        assert_eq!(
            err,
            CodecError::LengthMismatch {
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_from_slice_rejects_trailing() {
        let err = from_slice::<u16>(&[1, 2, 3]).unwrap_err();
        assert!(matches!(err, CodecError::LengthMismatch { expected: 2, actual: 3 }));
    }
}
