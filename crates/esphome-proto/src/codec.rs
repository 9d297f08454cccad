//! Varint and protobuf-lite wire codec.
//!
//! Schema-less: known message shapes are decoded field-by-field against a
//! `match` on field number, not generated from a `.proto` file. Unknown
//! field numbers are skipped, never fatal — `FieldReader` handles that.

use thiserror::Error;

/// Wire types as defined by Protocol Buffers. Groups (3/4) are never
/// produced; if encountered on read they are skipped like any other
/// length-delimited-shaped value would be, per `skip_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireType {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    Fixed32 = 5,
}

impl WireType {
    fn from_u64(value: u64) -> Result<Self, WireError> {
        match value {
            0 => Ok(Self::Varint),
            1 => Ok(Self::Fixed64),
            2 => Ok(Self::LengthDelimited),
            5 => Ok(Self::Fixed32),
            other => Err(WireError::UnknownWireType(other as u8)),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WireError {
    #[error("truncated varint")]
    TruncatedVarint,
    #[error("varint exceeds 10 bytes")]
    VarintTooLong,
    #[error("unknown wire type: {0}")]
    UnknownWireType(u8),
    #[error("buffer too short: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },
    #[error("length-delimited field length {0} overflows usize")]
    LengthOverflow(u64),
}

// ── Varint ───────────────────────────────────────────────────────────────────

/// Write `value` as a base-128 varint (7 bits per byte, LE, high bit =
/// continuation) and append it to `out`.
pub fn write_varint(out: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            break;
        }
        out.push(byte | 0x80);
    }
}

/// Read a varint from the front of `buf`, returning the value and the
/// number of bytes consumed.
pub fn read_varint(buf: &[u8]) -> Result<(u64, usize), WireError> {
    let mut value: u64 = 0;
    for (i, &byte) in buf.iter().enumerate().take(10) {
        value |= ((byte & 0x7f) as u64) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }
    if buf.len() < 10 {
        Err(WireError::TruncatedVarint)
    } else {
        Err(WireError::VarintTooLong)
    }
}

/// Zig-zag encode a signed 32-bit value for `sint32` fields.
pub fn zigzag_encode_32(v: i32) -> u32 {
    ((v << 1) ^ (v >> 31)) as u32
}

/// Zig-zag decode a `sint32` field back to its signed value.
pub fn zigzag_decode_32(v: u32) -> i32 {
    ((v >> 1) as i32) ^ -((v & 1) as i32)
}

/// Zig-zag encode a signed 64-bit value for `sint64` fields.
pub fn zigzag_encode_64(v: i64) -> u64 {
    ((v << 1) ^ (v >> 63)) as u64
}

/// Zig-zag decode a `sint64` field back to its signed value.
pub fn zigzag_decode_64(v: u64) -> i64 {
    ((v >> 1) as i64) ^ -((v & 1) as i64)
}

// ── Tag ──────────────────────────────────────────────────────────────────────

pub fn make_tag(field_number: u32, wire_type: WireType) -> u64 {
    ((field_number as u64) << 3) | (wire_type as u64)
}

fn split_tag(tag: u64) -> Result<(u32, WireType), WireError> {
    let wire_type = WireType::from_u64(tag & 0x7)?;
    Ok(((tag >> 3) as u32, wire_type))
}

// ── Field writers ────────────────────────────────────────────────────────────

/// Write a `varint`-wire-type field. Proto3 semantics: call only when the
/// value is semantically present (callers omit default-valued scalars).
pub fn write_varint_field(out: &mut Vec<u8>, field_number: u32, value: u64) {
    write_varint(out, make_tag(field_number, WireType::Varint));
    write_varint(out, value);
}

pub fn write_bool_field(out: &mut Vec<u8>, field_number: u32, value: bool) {
    write_varint_field(out, field_number, value as u64);
}

pub fn write_sint32_field(out: &mut Vec<u8>, field_number: u32, value: i32) {
    write_varint_field(out, field_number, zigzag_encode_32(value) as u64);
}

pub fn write_sint64_field(out: &mut Vec<u8>, field_number: u32, value: i64) {
    write_varint_field(out, field_number, zigzag_encode_64(value));
}

pub fn write_fixed32_field(out: &mut Vec<u8>, field_number: u32, value: u32) {
    write_varint(out, make_tag(field_number, WireType::Fixed32));
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn write_float_field(out: &mut Vec<u8>, field_number: u32, value: f32) {
    write_fixed32_field(out, field_number, value.to_bits());
}

pub fn write_fixed64_field(out: &mut Vec<u8>, field_number: u32, value: u64) {
    write_varint(out, make_tag(field_number, WireType::Fixed64));
    out.extend_from_slice(&value.to_le_bytes());
}

pub fn write_double_field(out: &mut Vec<u8>, field_number: u32, value: f64) {
    write_fixed64_field(out, field_number, value.to_bits());
}

pub fn write_bytes_field(out: &mut Vec<u8>, field_number: u32, value: &[u8]) {
    write_varint(out, make_tag(field_number, WireType::LengthDelimited));
    write_varint(out, value.len() as u64);
    out.extend_from_slice(value);
}

pub fn write_string_field(out: &mut Vec<u8>, field_number: u32, value: &str) {
    write_bytes_field(out, field_number, value.as_bytes());
}

// ── Field reader ─────────────────────────────────────────────────────────────

/// A raw, not-yet-interpreted field value. The caller reinterprets the bits
/// according to the known schema for the field number (e.g. `as_f32` for a
/// `float`, `zigzag_decode_32` for a `sint32`).
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue<'a> {
    Varint(u64),
    Fixed64([u8; 8]),
    Bytes(&'a [u8]),
    Fixed32([u8; 4]),
}

impl<'a> RawValue<'a> {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Varint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_u64().map(|v| v != 0)
    }

    pub fn as_i32(&self) -> Option<i32> {
        self.as_u64().map(|v| v as i32)
    }

    pub fn as_sint32(&self) -> Option<i32> {
        self.as_u64().map(|v| zigzag_decode_32(v as u32))
    }

    pub fn as_sint64(&self) -> Option<i64> {
        self.as_u64().map(zigzag_decode_64)
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Fixed32(b) => Some(f32::from_bits(u32::from_le_bytes(*b))),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Fixed64(b) => Some(f64::from_bits(u64::from_le_bytes(*b))),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&'a [u8]> {
        match self {
            Self::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.as_bytes().and_then(|b| std::str::from_utf8(b).ok())
    }
}

/// Iterates the `(field_number, RawValue)` pairs of a message body, one tag
/// at a time. A decoder for a known message is a `while let` loop over this
/// reader with a `match` on field number; unknown numbers fall through to
/// `Ok(None)` consumption and are simply skipped.
pub struct FieldReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Read the next field, or `Ok(None)` at end of buffer.
    pub fn next_field(&mut self) -> Result<Option<(u32, RawValue<'a>)>, WireError> {
        if self.pos >= self.buf.len() {
            return Ok(None);
        }
        let (tag, n) = read_varint(&self.buf[self.pos..])?;
        self.pos += n;
        let (field_number, wire_type) = split_tag(tag)?;

        let value = match wire_type {
            WireType::Varint => {
                let (v, n) = read_varint(&self.buf[self.pos..])?;
                self.pos += n;
                RawValue::Varint(v)
            }
            WireType::Fixed64 => {
                let bytes = self.take(8)?;
                let mut arr = [0u8; 8];
                arr.copy_from_slice(bytes);
                RawValue::Fixed64(arr)
            }
            WireType::Fixed32 => {
                let bytes = self.take(4)?;
                let mut arr = [0u8; 4];
                arr.copy_from_slice(bytes);
                RawValue::Fixed32(arr)
            }
            WireType::LengthDelimited => {
                let (len, n) = read_varint(&self.buf[self.pos..])?;
                self.pos += n;
                let len = usize::try_from(len).map_err(|_| WireError::LengthOverflow(len))?;
                RawValue::Bytes(self.take(len)?)
            }
        };

        Ok(Some((field_number, value)))
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8], WireError> {
        if self.pos + n > self.buf.len() {
            return Err(WireError::Truncated {
                need: n,
                have: self.buf.len() - self.pos,
            });
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn varint_roundtrip_known_values() {
        for v in [0u64, 1, 127, 128, (1 << 14) - 1, 1 << 14, (1 << 56) - 1, u64::MAX] {
            let mut buf = Vec::new();
            write_varint(&mut buf, v);
            let (decoded, consumed) = read_varint(&buf).unwrap();
            assert_eq!(decoded, v);
            assert_eq!(consumed, buf.len());
        }
    }

    #[test]
    fn varint_max_is_ten_bytes() {
        let mut buf = Vec::new();
        write_varint(&mut buf, u64::MAX);
        assert_eq!(buf.len(), 10);
    }

    #[test]
    fn truncated_varint_errors() {
        let buf = [0x80u8, 0x80];
        assert_eq!(read_varint(&buf), Err(WireError::TruncatedVarint));
    }

    #[test]
    fn zigzag_roundtrip() {
        for v in [0i32, -1, 1, i32::MIN, i32::MAX] {
            assert_eq!(zigzag_decode_32(zigzag_encode_32(v)), v);
        }
        for v in [0i64, -1, 1, i64::MIN, i64::MAX] {
            assert_eq!(zigzag_decode_64(zigzag_encode_64(v)), v);
        }
    }

    #[test]
    fn field_reader_skips_unknown_field_numbers() {
        let mut buf = Vec::new();
        write_varint_field(&mut buf, 99, 42); // unknown field
        write_string_field(&mut buf, 1, "hello");

        let mut reader = FieldReader::new(&buf);
        let (fnum, val) = reader.next_field().unwrap().unwrap();
        assert_eq!(fnum, 99);
        assert_eq!(val.as_u64(), Some(42));

        let (fnum, val) = reader.next_field().unwrap().unwrap();
        assert_eq!(fnum, 1);
        assert_eq!(val.as_str(), Some("hello"));

        assert!(reader.next_field().unwrap().is_none());
    }

    #[test]
    fn float_and_double_roundtrip() {
        let mut buf = Vec::new();
        write_float_field(&mut buf, 1, 22.5f32);
        write_double_field(&mut buf, 2, -3.5f64);

        let mut reader = FieldReader::new(&buf);
        let (_, v1) = reader.next_field().unwrap().unwrap();
        assert_eq!(v1.as_f32(), Some(22.5));
        let (_, v2) = reader.next_field().unwrap().unwrap();
        assert_eq!(v2.as_f64(), Some(-3.5));
    }

    #[test]
    fn bool_field_roundtrip() {
        let mut buf = Vec::new();
        write_bool_field(&mut buf, 1, true);
        write_bool_field(&mut buf, 2, false);

        let mut reader = FieldReader::new(&buf);
        let (_, v1) = reader.next_field().unwrap().unwrap();
        assert_eq!(v1.as_bool(), Some(true));
        let (_, v2) = reader.next_field().unwrap().unwrap();
        assert_eq!(v2.as_bool(), Some(false));
    }

    #[test]
    fn length_delimited_truncation_errors() {
        let mut buf = Vec::new();
        write_varint(&mut buf, make_tag(1, WireType::LengthDelimited));
        write_varint(&mut buf, 10); // claims 10 bytes, provides none
        let mut reader = FieldReader::new(&buf);
        assert!(reader.next_field().is_err());
    }

    #[test]
    fn unknown_wire_type_errors() {
        let mut buf = Vec::new();
        write_varint(&mut buf, make_tag(1, WireType::Varint) & !0x7 | 3); // group start, type 3
        let mut reader = FieldReader::new(&buf);
        assert!(matches!(
            reader.next_field(),
            Err(WireError::UnknownWireType(3))
        ));
    }
}
