//! The generic command engine.
//!
//! A remote call is declared by implementing [`Command`]: a descriptor
//! (name + opcode), the argument list as an [`Encode`] value and the success
//! payload as a [`Decode`] type. [`encode_request`] and [`decode_response`]
//! supply the control flow shared by every call.
//!
//! ```text
//! request:  | opcode:1 | arguments ...                 |
//! response: | opcode:1 | result_code:4 | payload ...   |   (payload only on success)
//! ```

use tracing::{debug, trace};

use crate::codec::{Decode, Encode};
use crate::cursor::{Reader, Writer};
use crate::error::{CodecError, CodecResult};
use crate::result::ResultCode;

/// Size of the response envelope: opcode echo plus result code.
pub const RESPONSE_HEADER_SIZE: usize = 1 + 4;

/// Static identity of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandDescriptor {
    /// Logical call name, e.g. `gap_conn_param_update`.
    pub name: &'static str,
    /// Opcode byte that tags request and response packets.
    pub opcode: u8,
}

impl CommandDescriptor {
    /// Create a descriptor.
    pub const fn new(name: &'static str, opcode: u8) -> Self {
        CommandDescriptor { name, opcode }
    }
}

/// A remote call declared by its schema.
///
/// The implementing type holds the call's arguments; its [`Encode`] impl
/// writes them in declared order (without the opcode).
pub trait Command: Encode {
    /// Name and opcode of the call.
    const DESCRIPTOR: CommandDescriptor;

    /// Payload that follows a successful result code.
    type Output: Decode;

    /// Total size of the request packet, opcode included.
    fn request_len(&self) -> usize {
        1 + self.encoded_len()
    }
}

/// Outcome of a well-formed response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply<T> {
    /// The remote side accepted the call.
    Success(T),
    /// The remote side rejected the call; the packet carried no payload.
    RemoteFailure(ResultCode),
}

impl<T> Reply<T> {
    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Reply::Success(_))
    }

    /// The result code carried by the envelope.
    pub fn result_code(&self) -> ResultCode {
        match self {
            Reply::Success(_) => ResultCode::SUCCESS,
            Reply::RemoteFailure(code) => *code,
        }
    }

    /// Map the success payload.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Reply<U> {
        match self {
            Reply::Success(value) => Reply::Success(f(value)),
            Reply::RemoteFailure(code) => Reply::RemoteFailure(code),
        }
    }

    /// Convert into a `Result` with the remote failure as the error.
    pub fn into_result(self) -> Result<T, ResultCode> {
        match self {
            Reply::Success(value) => Ok(value),
            Reply::RemoteFailure(code) => Err(code),
        }
    }
}

/// Encode the request packet for `command` into `buf`.
///
/// Returns the number of bytes written; the caller transmits exactly that
/// many. Arguments are validated and the whole packet is checked against the
/// capacity before the first byte is written, so on
/// [`CodecError::InvalidArgument`] or [`CodecError::BufferTooSmall`] the
/// buffer is left untouched.
pub fn encode_request<C: Command>(command: &C, buf: &mut [u8]) -> CodecResult<usize> {
    command.validate()?;
    let mut w = Writer::new(buf);
    w.ensure(command.request_len())?;

    C::DESCRIPTOR.opcode.encode(&mut w)?;
    command.encode(&mut w)?;

    let len = w.finish();
    trace!(
        command = C::DESCRIPTOR.name,
        opcode = C::DESCRIPTOR.opcode,
        len,
        "encoded request"
    );
    Ok(len)
}

/// Encode the request packet for `command` into a new vector.
pub fn request_to_vec<C: Command>(command: &C) -> CodecResult<Vec<u8>> {
    let mut buf = vec![0u8; command.request_len()];
    let len = encode_request(command, &mut buf)?;
    buf.truncate(len);
    Ok(buf)
}

/// Read the response envelope and check the opcode echo.
///
/// Leaves the reader positioned at the first payload byte.
pub fn decode_envelope(r: &mut Reader<'_>, opcode: u8) -> CodecResult<ResultCode> {
    let actual = u8::decode(r)?;
    if actual != opcode {
        return Err(CodecError::OpcodeMismatch {
            expected: opcode,
            actual,
        });
    }
    ResultCode::decode(r)
}

/// Decode the response packet for call `C`.
///
/// A packet with a failure result code must consist of the envelope alone.
/// Any byte left over after the declared fields is a
/// [`CodecError::LengthMismatch`].
pub fn decode_response<C: Command>(packet: &[u8]) -> CodecResult<Reply<C::Output>> {
    let mut r = Reader::new(packet);
    let result_code = decode_envelope(&mut r, C::DESCRIPTOR.opcode)?;

    if !result_code.is_success() {
        r.finish()?;
        debug!(
            command = C::DESCRIPTOR.name,
            result = %result_code,
            "remote call failed"
        );
        return Ok(Reply::RemoteFailure(result_code));
    }

    let output = C::Output::decode(&mut r)?;
    let len = r.finish()?;
    trace!(
        command = C::DESCRIPTOR.name,
        opcode = C::DESCRIPTOR.opcode,
        len,
        "decoded response"
    );
    Ok(Reply::Success(output))
}

/// Encode a response packet for call `C`.
///
/// This is the remote side's half of the format. Hosts use it to build
/// fixtures and loopback peers.
pub fn encode_response<C: Command>(
    reply: &Reply<C::Output>,
    buf: &mut [u8],
) -> CodecResult<usize>
where
    C::Output: Encode,
{
    let mut w = Writer::new(buf);
    match reply {
        Reply::Success(output) => {
            output.validate()?;
            w.ensure(RESPONSE_HEADER_SIZE + output.encoded_len())?;
            C::DESCRIPTOR.opcode.encode(&mut w)?;
            ResultCode::SUCCESS.encode(&mut w)?;
            output.encode(&mut w)?;
        }
        Reply::RemoteFailure(code) => {
            w.ensure(RESPONSE_HEADER_SIZE)?;
            C::DESCRIPTOR.opcode.encode(&mut w)?;
            code.encode(&mut w)?;
        }
    }
    Ok(w.finish())
}
