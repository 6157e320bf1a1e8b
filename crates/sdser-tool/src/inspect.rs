//! Encode, decode and list operations behind the `sdser` subcommands.

use std::path::Path;

use sdser_ble::{decode_reply, decode_reply_any, CommandCall, DecodedReply, COMMANDS};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::OutputFormat;
use crate::error::{ToolError, ToolResult};

/// An encoded request packet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncodedRequest {
    /// Call name.
    pub command: &'static str,
    /// Opcode byte.
    pub opcode: u8,
    /// Packet length in bytes.
    pub len: usize,
    /// Packet bytes as lowercase hex.
    pub hex: String,
}

/// A registry entry as printed by `sdser list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandInfo {
    pub name: &'static str,
    pub opcode: String,
}

/// Parse a call description. JSON when `json` is set, YAML otherwise.
pub fn parse_call(text: &str, json: bool) -> ToolResult<CommandCall> {
    if json {
        Ok(serde_json::from_str(text)?)
    } else {
        Ok(serde_yaml::from_str(text)?)
    }
}

/// Load a call description from a file; a `.json` extension selects JSON.
pub fn load_call<P: AsRef<Path>>(path: P) -> ToolResult<CommandCall> {
    let path = path.as_ref();
    let json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let text = std::fs::read_to_string(path)?;
    debug!(path = %path.display(), json, "loaded call file");
    parse_call(&text, json)
}

/// Encode `call` into a buffer of `capacity` bytes.
pub fn encode_call(call: &CommandCall, capacity: usize) -> ToolResult<EncodedRequest> {
    let descriptor = call.descriptor();
    let mut buf = vec![0u8; capacity];
    let len = call.encode(&mut buf)?;
    buf.truncate(len);
    info!(command = descriptor.name, len, "encoded request");
    Ok(EncodedRequest {
        command: descriptor.name,
        opcode: descriptor.opcode,
        len,
        hex: hex::encode(&buf),
    })
}

/// Parse packet bytes from hex, ignoring whitespace, `:` separators and a
/// leading `0x`.
pub fn parse_hex(text: &str) -> ToolResult<Vec<u8>> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let digits: String = body
        .chars()
        .filter(|c| !c.is_whitespace() && *c != ':')
        .collect();
    Ok(hex::decode(digits)?)
}

/// Decode a hex response packet. Without a command name the call is picked
/// from the opcode byte.
pub fn decode_packet(command: Option<&str>, packet_hex: &str) -> ToolResult<DecodedReply> {
    let packet = parse_hex(packet_hex)?;
    let reply = match command {
        Some(name) => decode_reply(name, &packet)?,
        None => decode_reply_any(&packet)?,
    };
    if let DecodedReply::RemoteFailure {
        command,
        result_code,
        ..
    } = &reply
    {
        info!(command, result_code, "response carries a remote failure");
    }
    Ok(reply)
}

/// Every known call.
pub fn list_commands() -> Vec<CommandInfo> {
    COMMANDS
        .iter()
        .map(|d| CommandInfo {
            name: d.name,
            opcode: format!("0x{:02X}", d.opcode),
        })
        .collect()
}

/// Render a result in the configured format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> ToolResult<String> {
    let text = match format {
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Yaml => serde_yaml::to_string(value)?,
    };
    Ok(text)
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` takes precedence over `level`; `verbose` forces `debug`.
pub fn init_logging(level: &str, verbose: bool) -> ToolResult<()> {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ToolError::Logging(e.to_string()))
}
