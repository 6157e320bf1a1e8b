//! Bounds-checked cursors over caller-owned packet buffers.
//!
//! All byte access in the codec goes through [`Writer`] and [`Reader`]. The
//! only way to move either cursor is to reserve (or take) a run of bytes,
//! which is checked against the buffer first. A failed check leaves the
//! cursor and the buffer untouched.

use crate::error::{CodecError, CodecResult};

/// Write cursor over a mutable destination buffer.
///
/// The buffer's length is its capacity. The writer borrows it exclusively for
/// the duration of one encode pass.
#[derive(Debug)]
pub struct Writer<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> Writer<'a> {
    /// Start writing at the beginning of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Writer { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total capacity of the destination buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Check that `n` more bytes fit, without writing anything.
    pub fn ensure(&self, n: usize) -> CodecResult<()> {
        match self.pos.checked_add(n) {
            Some(end) if end <= self.buf.len() => Ok(()),
            _ => Err(CodecError::BufferTooSmall {
                offset: self.pos,
                needed: n,
                capacity: self.buf.len(),
            }),
        }
    }

    /// Reserve the next `n` bytes and advance past them.
    ///
    /// The caller must fill the returned slice completely.
    pub fn reserve(&mut self, n: usize) -> CodecResult<&mut [u8]> {
        self.ensure(n)?;
        let start = self.pos;
        self.pos += n;
        Ok(&mut self.buf[start..start + n])
    }

    /// Copy `data` to the cursor.
    pub fn put_slice(&mut self, data: &[u8]) -> CodecResult<()> {
        self.reserve(data.len())?.copy_from_slice(data);
        Ok(())
    }

    /// Finish the pass and return the number of bytes written.
    pub fn finish(self) -> usize {
        self.pos
    }
}

/// Read cursor over an immutable packet.
///
/// The slice's length is the declared packet length. A decode pass must end
/// with [`Reader::finish`], which rejects unread trailing bytes.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Start reading at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Reader { buf, pos: 0 }
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// Take the next `n` bytes and advance past them.
    pub fn take(&mut self, n: usize) -> CodecResult<&'a [u8]> {
        match self.pos.checked_add(n) {
            Some(end) if end <= self.buf.len() => {
                let bytes = &self.buf[self.pos..end];
                self.pos = end;
                Ok(bytes)
            }
            _ => Err(CodecError::LengthMismatch {
                expected: self.pos.saturating_add(n),
                actual: self.buf.len(),
            }),
        }
    }

    /// Look at the next byte without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.buf.get(self.pos).copied()
    }

    /// End the pass. Fails unless every byte of the packet was consumed.
    pub fn finish(self) -> CodecResult<usize> {
        if self.pos == self.buf.len() {
            Ok(self.pos)
        } else {
            Err(CodecError::LengthMismatch {
                expected: self.pos,
                actual: self.buf.len(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_within_capacity() {
        let mut buf = [0u8; 4];
        let mut w = Writer::new(&mut buf);
        w.reserve(3).unwrap().copy_from_slice(&[1, 2, 3]);
        assert_eq!(w.position(), 3);
        assert_eq!(w.remaining(), 1);
        assert_eq!(w.finish(), 3);
        assert_eq!(buf, [1, 2, 3, 0]);
    }

    #[test]
    fn test_reserve_overflow_leaves_cursor() {
        let mut buf = [0xEEu8; 3];
        let mut w = Writer::new(&mut buf);
        w.put_slice(&[0xAA, 0xBB]).unwrap();
        let err = w.reserve(2).unwrap_err();
        assert_eq!(
            err,
            CodecError::BufferTooSmall {
                offset: 2,
                needed: 2,
                capacity: 3
            }
        );
        assert_eq!(w.position(), 2);
        assert_eq!(buf, [0xAA, 0xBB, 0xEE]);
    }

    #[test]
    fn test_ensure_does_not_write() {
        let mut buf = [0u8; 2];
        let w = Writer::new(&mut buf);
        assert!(w.ensure(2).is_ok());
        assert!(w.ensure(3).is_err());
        assert!(w.ensure(usize::MAX).is_err());
        assert_eq!(w.position(), 0);
    }

    #[test]
    fn test_take_and_finish() {
        let data = [1u8, 2, 3];
        let mut r = Reader::new(&data);
        assert_eq!(r.take(2).unwrap(), &[1, 2]);
        assert_eq!(r.peek(), Some(3));
        assert_eq!(r.take(1).unwrap(), &[3]);
        assert_eq!(r.peek(), None);
        assert_eq!(r.finish().unwrap(), 3);
    }

    #[test]
    fn test_take_past_end() {
        let data = [1u8, 2];
        let mut r = Reader::new(&data);
        r.take(1).unwrap();
        assert_eq!(
            r.take(2).unwrap_err(),
            CodecError::LengthMismatch {
                expected: 3,
                actual: 2
            }
        );
        assert_eq!(r.position(), 1);
    }

    #[test]
    fn test_finish_rejects_trailing_bytes() {
        let data = [1u8, 2, 3];
        let mut r = Reader::new(&data);
        r.take(2).unwrap();
        assert_eq!(
            r.finish().unwrap_err(),
            CodecError::LengthMismatch {
                expected: 2,
                actual: 3
            }
        );
    }
}
