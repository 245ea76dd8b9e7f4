//! CRLF line codec for tokio.
//!
//! Inbound lines are split on `\n`; a single trailing `\r` is stripped and
//! the bytes are decoded as UTF-8, replacing invalid sequences. Lines longer
//! than the limit are skipped rather than treated as fatal.
//!
//! Outbound strings are truncated at their first line ending and framed with
//! `\r\n`, so a caller can never smuggle a second command into one send.

use bytes::{BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::warn;

use crate::error::{ProtocolError, Result};

/// Line-based codec for CRLF-terminated protocol lines.
pub struct LineCodec {
    /// Index of next byte to check for newline
    next_index: usize,
    /// Maximum line length, terminator included
    max_len: usize,
    /// Dropping the rest of an overlong line
    discarding: bool,
}

impl LineCodec {
    /// Create a codec with the default limit ([`crate::MAX_LINE_LEN`]).
    pub fn new() -> Self {
        Self::with_max_len(crate::MAX_LINE_LEN)
    }

    /// Create a codec with a custom maximum line length.
    pub fn with_max_len(max_len: usize) -> Self {
        Self {
            next_index: 0,
            max_len,
            discarding: false,
        }
    }

    fn decode_line(line: &[u8]) -> String {
        let line = line.strip_suffix(b"\n").unwrap_or(line);
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        String::from_utf8_lossy(line).into_owned()
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder for LineCodec {
    type Item = String;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        loop {
            let Some(offset) = src[self.next_index..].iter().position(|b| *b == b'\n') else {
                if src.len() > self.max_len {
                    warn!(
                        len = src.len(),
                        limit = self.max_len,
                        "Discarding overlong partial line"
                    );
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                } else {
                    self.next_index = src.len();
                }
                return Ok(None);
            };

            let line = src.split_to(self.next_index + offset + 1);
            self.next_index = 0;

            if std::mem::take(&mut self.discarding) {
                continue;
            }
            if line.len() > self.max_len {
                warn!(len = line.len(), limit = self.max_len, "Skipping overlong line");
                continue;
            }

            return Ok(Some(Self::decode_line(&line)));
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<String>> {
        match self.decode(src)? {
            Some(line) => Ok(Some(line)),
            None => {
                // An unterminated tail at EOF is not a line.
                src.clear();
                self.next_index = 0;
                Ok(None)
            }
        }
    }
}

impl Encoder<&str> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, msg: &str, dst: &mut BytesMut) -> Result<()> {
        let line = match msg.find(&['\r', '\n'][..]) {
            Some(pos) => &msg[..pos],
            None => msg,
        };
        if line.len() + 2 > self.max_len {
            return Err(ProtocolError::MessageTooLong {
                actual: line.len() + 2,
                limit: self.max_len,
            });
        }
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
