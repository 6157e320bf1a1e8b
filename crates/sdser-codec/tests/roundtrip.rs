//! Property tests for the primitive and conditional codecs.

use proptest::prelude::*;
use sdser_codec::{from_slice, to_vec, CodecError, Len16Data, Presence, Reader, Writer};
use sdser_codec::{Decode, Encode};

proptest! {
    #[test]
    fn prop_u16_roundtrip(value: u16) {
        let bytes = to_vec(&value).unwrap();
        prop_assert_eq!(bytes.len(), 2);
        prop_assert_eq!(from_slice::<u16>(&bytes).unwrap(), value);
    }

    #[test]
    fn prop_u32_roundtrip(value: u32) {
        let bytes = to_vec(&value).unwrap();
        prop_assert_eq!(bytes, value.to_le_bytes().to_vec());
    }

    #[test]
    fn prop_optional_roundtrip(value: Option<u32>) {
        let bytes = to_vec(&value).unwrap();
        prop_assert_eq!(bytes.len(), value.encoded_len());
        prop_assert_eq!(from_slice::<Option<u32>>(&bytes).unwrap(), value);
    }

    #[test]
    fn prop_len16_data_roundtrip(data in proptest::option::of(proptest::collection::vec(any::<u8>(), 0..64))) {
        let blob = match data {
            Some(bytes) => Len16Data::from_bytes("blob", bytes).unwrap(),
            None => Len16Data::reserve_only(17),
        };
        let bytes = to_vec(&blob).unwrap();
        prop_assert_eq!(from_slice::<Len16Data>(&bytes).unwrap(), blob);
    }

    #[test]
    fn prop_marker_bytes(marker: u8) {
        let result = from_slice::<Presence>(&[marker]);
        match marker {
            0x00 => {
                prop_assert_eq!(result.unwrap(), Presence::NotPresent);
            }
            0x01 => {
                prop_assert_eq!(result.unwrap(), Presence::Present);
            }
            value => {
                prop_assert_eq!(
                    result.unwrap_err(),
                    CodecError::UnexpectedMarker { offset: 0, value }
                );
            }
        }
    }

    #[test]
    fn prop_short_capacity_fails(capacity in 0usize..6) {
        // u16 + Some(u32) needs 7 bytes.
        let mut buf = vec![0u8; capacity];
        let mut w = Writer::new(&mut buf);
        let result = 0xABCDu16
            .encode(&mut w)
            .and_then(|_| Some(0x01020304u32).encode(&mut w));
        let is_too_small = matches!(result, Err(CodecError::BufferTooSmall { .. }));
        prop_assert!(is_too_small);
    }
}

#[test]
fn test_sequence_of_fields() {
    let mut buf = [0u8; 16];
    let mut w = Writer::new(&mut buf);
    7u8.encode(&mut w).unwrap();
    None::<u16>.encode(&mut w).unwrap();
    Some(0x0203u16).encode(&mut w).unwrap();
    let len = w.finish();
    assert_eq!(&buf[..len], &[7, 0x00, 0x01, 0x03, 0x02]);

    let mut r = Reader::new(&buf[..len]);
    assert_eq!(u8::decode(&mut r).unwrap(), 7);
    assert_eq!(Option::<u16>::decode(&mut r).unwrap(), None);
    assert_eq!(Option::<u16>::decode(&mut r).unwrap(), Some(0x0203));
    assert_eq!(r.finish().unwrap(), 5);
}
