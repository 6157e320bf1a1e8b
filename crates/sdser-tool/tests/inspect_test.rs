//! Integration tests for the inspection operations.

use std::path::PathBuf;

use sdser_ble::{DecodedReply, ReplyOutput};
use sdser_codec::CodecError;
use sdser_tool::{decode_packet, encode_call, load_call, parse_call, ToolConfig, ToolError};

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("sdser-{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).expect("write temp file");
    path
}

const CHARACTERISTIC_YAML: &str = "\
command: gatts_characteristic_add
service_handle: 12
char_md:
  char_props:
    read: true
    notify: true
  cccd_md: {}
attr_char_value:
  uuid:
    uuid: 10777
  attr_md: {}
  init_len: 1
  max_len: 1
  value: [100]
want_handles: true
";

#[test]
fn test_encode_yaml_call_file() {
    let path = write_temp("char.yaml", CHARACTERISTIC_YAML);
    let call = load_call(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let encoded = encode_call(&call, ToolConfig::default().capacity).unwrap();
    assert_eq!(encoded.command, "gatts_characteristic_add");
    assert_eq!(encoded.opcode, 0xA2);
    let expected = [
        "a20c00",
        "011200000000000000000111110200",
        "0101192a01011111020100000001000164",
        "01",
    ]
    .concat();
    assert_eq!(encoded.hex, expected);
    assert_eq!(encoded.len, expected.len() / 2);
}

#[test]
fn test_encode_json_call_file() {
    let path = write_temp(
        "update.json",
        r#"{
            "command": "gap_conn_param_update",
            "conn_handle": 16,
            "conn_params": {
                "min_conn_interval": 6,
                "max_conn_interval": 12,
                "slave_latency": 0,
                "conn_sup_timeout": 500
            }
        }"#,
    );
    let call = load_call(&path).unwrap();
    std::fs::remove_file(&path).ok();

    let encoded = encode_call(&call, 512).unwrap();
    assert_eq!(encoded.len, 12);
    assert_eq!(encoded.hex, "7510000106000c000000f401");
}

#[test]
fn test_missing_mandatory_argument() {
    let call = parse_call("command: gatts_descriptor_add\nwant_handle: true\n", false).unwrap();
    let err = encode_call(&call, 512).unwrap_err();
    assert!(matches!(
        err,
        ToolError::Codec(CodecError::NullArgument {
            field: "char_handle"
        })
    ));
}

#[test]
fn test_unknown_command_in_call_file() {
    let err = parse_call("command: gap_scan_start\n", false).unwrap_err();
    assert!(matches!(err, ToolError::Yaml(_)));
}

#[test]
fn test_decode_remote_failure() {
    let reply = decode_packet(Some("gap_conn_param_update"), "75 07 00 00 00").unwrap();
    assert_eq!(
        reply,
        DecodedReply::RemoteFailure {
            command: "gap_conn_param_update",
            result_code: 7,
            result_name: Some("NRF_ERROR_INVALID_PARAM"),
        }
    );
}

#[test]
fn test_decode_trailing_byte() {
    let err = decode_packet(Some("gap_conn_param_update"), "750700000000").unwrap_err();
    assert!(matches!(
        err,
        ToolError::Ble(sdser_ble::BleError::Codec(CodecError::LengthMismatch {
            expected: 5,
            actual: 6
        }))
    ));
}

#[test]
fn test_decode_by_opcode() {
    let reply = decode_packet(None, "a2 00000000 01 0e00 0000 0f00 0000").unwrap();
    match reply {
        DecodedReply::Success {
            command,
            output: ReplyOutput::CharHandles(Some(handles)),
        } => {
            assert_eq!(command, "gatts_characteristic_add");
            assert_eq!(handles.value_handle, 0x000E);
            assert_eq!(handles.cccd_handle, 0x000F);
        }
        other => panic!("unexpected reply: {other:?}"),
    }
}

#[test]
fn test_decode_opcode_mismatch() {
    let err = decode_packet(Some("gap_disconnect"), "7500000000").unwrap_err();
    assert!(matches!(
        err,
        ToolError::Ble(sdser_ble::BleError::Codec(CodecError::OpcodeMismatch {
            expected: 0x76,
            actual: 0x75
        }))
    ));
}
