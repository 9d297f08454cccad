//! Reads and writes the two on-wire framings: `0x00`-prefixed plaintext and
//! `0x01`-prefixed encrypted. The reader is a pure buffer transducer — feed
//! it whatever a socket read returned, get back zero or more whole frames,
//! with partial trailing bytes retained for the next call. No socket I/O
//! happens here; that's `session`'s job.

use bytes::{Buf, BytesMut};
use esphome_proto::codec::{read_varint, write_varint, WireError};
use thiserror::Error;

pub const DEFAULT_MAX_PLAINTEXT_FRAME: usize = 1 << 20;
pub const DEFAULT_MAX_CIPHERTEXT_FRAME: usize = 16 << 20;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame of {got} bytes exceeds the {max}-byte limit")]
    OversizeFrame { got: usize, max: usize },
    #[error("device requires an encrypted connection")]
    EncryptionRequired,
    #[error("device offered a plaintext frame on an encrypted connection")]
    EncryptionMismatch,
    #[error("unknown framing byte 0x{0:02x}")]
    UnknownFraming(u8),
    #[error("encrypted payload of {0} bytes is too short to carry a header")]
    TruncatedPayload(usize),
    #[error(transparent)]
    Wire(#[from] WireError),
}

/// One fully received frame, with the framing byte already stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedFrame {
    Plaintext { message_type: u32, body: Vec<u8> },
    Ciphertext(Vec<u8>),
}

/// Which framing a connection has committed to. Decided once, at connect
/// time, by whether a PSK is configured — never renegotiated mid-session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    Plaintext,
    Encrypted,
}

const FRAMING_PLAINTEXT: u8 = 0x00;
const FRAMING_ENCRYPTED: u8 = 0x01;

/// Resumable reader over a growable buffer. Holds whatever bytes have
/// arrived but don't yet form a whole frame.
pub struct FrameReader {
    buf: BytesMut,
    framing: Framing,
    max_plaintext: usize,
    max_ciphertext: usize,
}

impl FrameReader {
    pub fn new(framing: Framing) -> Self {
        Self {
            buf: BytesMut::new(),
            framing,
            max_plaintext: DEFAULT_MAX_PLAINTEXT_FRAME,
            max_ciphertext: DEFAULT_MAX_CIPHERTEXT_FRAME,
        }
    }

    pub fn with_limits(framing: Framing, max_plaintext: usize, max_ciphertext: usize) -> Self {
        Self { buf: BytesMut::new(), framing, max_plaintext, max_ciphertext }
    }

    /// Feed newly read socket bytes in; get back every whole frame that can
    /// now be parsed out of the accumulated buffer.
    pub fn push(&mut self, data: &[u8]) -> Result<Vec<DecodedFrame>, FrameError> {
        self.buf.extend_from_slice(data);

        let mut frames = Vec::new();
        loop {
            match self.try_parse_one()? {
                Some(frame) => frames.push(frame),
                None => return Ok(frames),
            }
        }
    }

    fn try_parse_one(&mut self) -> Result<Option<DecodedFrame>, FrameError> {
        let Some(&marker) = self.buf.first() else {
            return Ok(None);
        };

        match (self.framing, marker) {
            (Framing::Plaintext, FRAMING_PLAINTEXT) => self.try_parse_plaintext(),
            (Framing::Encrypted, FRAMING_ENCRYPTED) => self.try_parse_ciphertext(),
            (Framing::Plaintext, FRAMING_ENCRYPTED) => Err(FrameError::EncryptionRequired),
            (Framing::Encrypted, FRAMING_PLAINTEXT) => Err(FrameError::EncryptionMismatch),
            (_, other) => Err(FrameError::UnknownFraming(other)),
        }
    }

    fn try_parse_plaintext(&mut self) -> Result<Option<DecodedFrame>, FrameError> {
        let rest = &self.buf[1..];
        let (length, length_bytes) = match read_varint(rest) {
            Ok(v) => v,
            Err(WireError::TruncatedVarint) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let length = length as usize;
        if length > self.max_plaintext {
            return Err(FrameError::OversizeFrame { got: length, max: self.max_plaintext });
        }

        let after_length = &rest[length_bytes..];
        let (message_type, type_bytes) = match read_varint(after_length) {
            Ok(v) => v,
            Err(WireError::TruncatedVarint) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if after_length.len() - type_bytes < length {
            return Ok(None);
        }

        let body_start = type_bytes;
        let body = after_length[body_start..body_start + length].to_vec();
        let consumed = 1 + length_bytes + type_bytes + length;
        self.buf.advance(consumed);
        Ok(Some(DecodedFrame::Plaintext { message_type: message_type as u32, body }))
    }

    fn try_parse_ciphertext(&mut self) -> Result<Option<DecodedFrame>, FrameError> {
        if self.buf.len() < 3 {
            return Ok(None);
        }
        let size = u16::from_be_bytes([self.buf[1], self.buf[2]]) as usize;
        if size > self.max_ciphertext {
            return Err(FrameError::OversizeFrame { got: size, max: self.max_ciphertext });
        }
        if self.buf.len() < 3 + size {
            return Ok(None);
        }

        let ciphertext = self.buf[3..3 + size].to_vec();
        self.buf.advance(3 + size);
        Ok(Some(DecodedFrame::Ciphertext(ciphertext)))
    }
}

/// `0x00` + varint length + varint message_type + body.
pub fn encode_plaintext(message_type: u32, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(1 + body.len() + 10);
    out.push(FRAMING_PLAINTEXT);
    write_varint(&mut out, body.len() as u64);
    write_varint(&mut out, message_type as u64);
    out.extend_from_slice(body);
    out
}

/// `0x01` + big-endian 16-bit size + ciphertext.
pub fn encode_ciphertext(ciphertext: &[u8]) -> Result<Vec<u8>, FrameError> {
    let len = ciphertext.len();
    if len > u16::MAX as usize {
        return Err(FrameError::OversizeFrame { got: len, max: u16::MAX as usize });
    }
    let mut out = Vec::with_capacity(3 + len);
    out.push(FRAMING_ENCRYPTED);
    out.extend_from_slice(&(len as u16).to_be_bytes());
    out.extend_from_slice(ciphertext);
    Ok(out)
}

/// The plaintext carried *inside* an encrypted frame, before it's been
/// AEAD-encrypted: 2-byte BE `message_type`, 2-byte BE `payload_length`,
/// then the body.
pub fn encode_encrypted_payload(message_type: u32, body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(4 + body.len());
    out.extend_from_slice(&(message_type as u16).to_be_bytes());
    out.extend_from_slice(&(body.len() as u16).to_be_bytes());
    out.extend_from_slice(body);
    out
}

/// The inverse: split a decrypted encrypted-frame plaintext back into
/// `(message_type, body)`.
pub fn decode_encrypted_payload(plaintext: &[u8]) -> Result<(u32, Vec<u8>), FrameError> {
    if plaintext.len() < 4 {
        return Err(FrameError::TruncatedPayload(plaintext.len()));
    }
    let message_type = u16::from_be_bytes([plaintext[0], plaintext[1]]) as u32;
    let payload_length = u16::from_be_bytes([plaintext[2], plaintext[3]]) as usize;
    if plaintext.len() < 4 + payload_length {
        return Err(FrameError::TruncatedPayload(plaintext.len()));
    }
    Ok((message_type, plaintext[4..4 + payload_length].to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plaintext_roundtrip_single_push() {
        let frame = encode_plaintext(7, b"ping");
        let mut reader = FrameReader::new(Framing::Plaintext);
        let frames = reader.push(&frame).unwrap();
        assert_eq!(frames, vec![DecodedFrame::Plaintext { message_type: 7, body: b"ping".to_vec() }]);
    }

    #[test]
    fn plaintext_byte_by_byte_matches_bulk() {
        let frame = encode_plaintext(11, b"hello entity list");
        let mut reader = FrameReader::new(Framing::Plaintext);
        let mut collected = Vec::new();
        for byte in &frame {
            collected.extend(reader.push(&[*byte]).unwrap());
        }
        assert_eq!(collected, vec![DecodedFrame::Plaintext { message_type: 11, body: b"hello entity list".to_vec() }]);
    }

    #[test]
    fn ciphertext_roundtrip() {
        let frame = encode_ciphertext(b"sealed-bytes").unwrap();
        let mut reader = FrameReader::new(Framing::Encrypted);
        let frames = reader.push(&frame).unwrap();
        assert_eq!(frames, vec![DecodedFrame::Ciphertext(b"sealed-bytes".to_vec())]);
    }

    #[test]
    fn two_frames_in_one_push() {
        let mut combined = encode_plaintext(1, b"a");
        combined.extend(encode_plaintext(2, b"bb"));
        let mut reader = FrameReader::new(Framing::Plaintext);
        let frames = reader.push(&combined).unwrap();
        assert_eq!(frames.len(), 2);
    }

    #[test]
    fn encrypted_marker_on_plaintext_connection_is_encryption_required() {
        let mut reader = FrameReader::new(Framing::Plaintext);
        let result = reader.push(&[0x01, 0x00, 0x00]);
        assert_eq!(result, Err(FrameError::EncryptionRequired));
    }

    #[test]
    fn plaintext_marker_on_encrypted_connection_is_encryption_mismatch() {
        let mut reader = FrameReader::new(Framing::Encrypted);
        let result = reader.push(&[0x00, 0x00, 0x00]);
        assert_eq!(result, Err(FrameError::EncryptionMismatch));
    }

    #[test]
    fn oversize_plaintext_frame_is_rejected() {
        let mut reader = FrameReader::with_limits(Framing::Plaintext, 4, DEFAULT_MAX_CIPHERTEXT_FRAME);
        let frame = encode_plaintext(1, b"this body is too long");
        let result = reader.push(&frame);
        assert!(matches!(result, Err(FrameError::OversizeFrame { .. })));
    }

    #[test]
    fn encrypted_payload_roundtrip() {
        let payload = encode_encrypted_payload(26, b"state-bytes");
        let (message_type, body) = decode_encrypted_payload(&payload).unwrap();
        assert_eq!(message_type, 26);
        assert_eq!(body, b"state-bytes");
    }

    #[test]
    fn truncated_encrypted_payload_is_rejected() {
        assert_eq!(decode_encrypted_payload(&[0, 1]), Err(FrameError::TruncatedPayload(2)));
    }

    #[test]
    fn unknown_framing_byte_is_rejected() {
        let mut reader = FrameReader::new(Framing::Plaintext);
        let result = reader.push(&[0x07, 0x00]);
        assert_eq!(result, Err(FrameError::UnknownFraming(0x07)));
    }
}
