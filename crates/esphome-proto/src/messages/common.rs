//! Encoding/decoding of the `EntityInfo` fields every `ListEntities<Kind>Response`
//! carries, factored out so each kind's decoder only adds its own fields.
//! Field numbers 1-8 are reserved for these common fields; kind-specific
//! fields start at 10.

use crate::codec::{
    write_bool_field, write_string_field, write_varint_field, FieldReader, RawValue,
};
use crate::entity::{EntityCategory, EntityInfo};

pub const FIELD_OBJECT_ID: u32 = 1;
pub const FIELD_KEY: u32 = 2;
pub const FIELD_NAME: u32 = 3;
pub const FIELD_UNIQUE_ID: u32 = 4;
pub const FIELD_ICON: u32 = 5;
pub const FIELD_DISABLED_BY_DEFAULT: u32 = 6;
pub const FIELD_ENTITY_CATEGORY: u32 = 7;
pub const FIELD_DEVICE_ID: u32 = 8;

/// First field number a kind-specific decoder may use.
pub const FIRST_KIND_FIELD: u32 = 10;

pub fn encode_entity_info(out: &mut Vec<u8>, info: &EntityInfo) {
    if info.key != 0 {
        write_varint_field(out, FIELD_KEY, info.key as u64);
    }
    if !info.object_id.is_empty() {
        write_string_field(out, FIELD_OBJECT_ID, &info.object_id);
    }
    if !info.name.is_empty() {
        write_string_field(out, FIELD_NAME, &info.name);
    }
    if !info.unique_id.is_empty() {
        write_string_field(out, FIELD_UNIQUE_ID, &info.unique_id);
    }
    if !info.icon.is_empty() {
        write_string_field(out, FIELD_ICON, &info.icon);
    }
    if info.disabled_by_default {
        write_bool_field(out, FIELD_DISABLED_BY_DEFAULT, true);
    }
    if info.entity_category != EntityCategory::None {
        write_varint_field(out, FIELD_ENTITY_CATEGORY, entity_category_to_u32(info.entity_category) as u64);
    }
    if let Some(device_id) = info.device_id {
        write_varint_field(out, FIELD_DEVICE_ID, device_id as u64);
    }
}

fn entity_category_to_u32(c: EntityCategory) -> u32 {
    match c {
        EntityCategory::None => 0,
        EntityCategory::Config => 1,
        EntityCategory::Diagnostic => 2,
    }
}

fn entity_category_from_u32(v: u32) -> EntityCategory {
    match v {
        1 => EntityCategory::Config,
        2 => EntityCategory::Diagnostic,
        _ => EntityCategory::None,
    }
}

/// Accumulates the common fields while a kind-specific decoder's `while let`
/// loop runs; call `apply` for every field before checking whether it was a
/// kind-specific one.
#[derive(Default)]
pub struct EntityInfoBuilder {
    key: u32,
    object_id: String,
    name: String,
    unique_id: String,
    icon: String,
    disabled_by_default: bool,
    entity_category: EntityCategory,
    device_id: Option<u32>,
}

impl EntityInfoBuilder {
    /// Returns `true` if `field_number` was one of the common fields and has
    /// been consumed; `false` means the caller should handle it.
    pub fn apply(&mut self, field_number: u32, value: &RawValue<'_>) -> bool {
        match field_number {
            FIELD_KEY => {
                self.key = value.as_u64().unwrap_or(0) as u32;
                true
            }
            FIELD_OBJECT_ID => {
                self.object_id = value.as_str().unwrap_or_default().to_string();
                true
            }
            FIELD_NAME => {
                self.name = value.as_str().unwrap_or_default().to_string();
                true
            }
            FIELD_UNIQUE_ID => {
                self.unique_id = value.as_str().unwrap_or_default().to_string();
                true
            }
            FIELD_ICON => {
                self.icon = value.as_str().unwrap_or_default().to_string();
                true
            }
            FIELD_DISABLED_BY_DEFAULT => {
                self.disabled_by_default = value.as_bool().unwrap_or(false);
                true
            }
            FIELD_ENTITY_CATEGORY => {
                self.entity_category = entity_category_from_u32(value.as_u64().unwrap_or(0) as u32);
                true
            }
            FIELD_DEVICE_ID => {
                let id = value.as_u64().unwrap_or(0) as u32;
                self.device_id = if id == 0 { None } else { Some(id) };
                true
            }
            _ => false,
        }
    }

    pub fn finish(self) -> EntityInfo {
        EntityInfo {
            key: self.key,
            object_id: self.object_id,
            name: self.name,
            unique_id: self.unique_id,
            device_id: self.device_id,
            icon: self.icon,
            entity_category: self.entity_category,
            disabled_by_default: self.disabled_by_default,
        }
    }
}

/// Reads `key` (field 1) out of a state/command message body — every such
/// message is `{ key: u32, ...kind-specific fields starting at field 2 }`.
pub fn decode_key(reader: &mut FieldReader<'_>) -> Result<(u32, Vec<(u32, RawValueOwned)>), crate::codec::WireError> {
    let mut key = 0u32;
    let mut rest = Vec::new();
    while let Some((field_number, value)) = reader.next_field()? {
        if field_number == 1 {
            key = value.as_u64().unwrap_or(0) as u32;
        } else {
            rest.push((field_number, RawValueOwned::from(value)));
        }
    }
    Ok((key, rest))
}

/// An owned copy of `RawValue` so `decode_key` can hand back fields after the
/// borrow on the original buffer that produced them would otherwise expire.
#[derive(Debug, Clone)]
pub enum RawValueOwned {
    Varint(u64),
    Fixed64([u8; 8]),
    Bytes(Vec<u8>),
    Fixed32([u8; 4]),
}

impl From<RawValue<'_>> for RawValueOwned {
    fn from(value: RawValue<'_>) -> Self {
        match value {
            RawValue::Varint(v) => RawValueOwned::Varint(v),
            RawValue::Fixed64(b) => RawValueOwned::Fixed64(b),
            RawValue::Bytes(b) => RawValueOwned::Bytes(b.to_vec()),
            RawValue::Fixed32(b) => RawValueOwned::Fixed32(b),
        }
    }
}

impl RawValueOwned {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Varint(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_u64().map(|v| v != 0)
    }

    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Self::Fixed32(b) => Some(f32::from_bits(u32::from_le_bytes(*b))),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Bytes(b) => std::str::from_utf8(b).ok(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::FieldReader;

    #[test]
    fn entity_info_roundtrip_through_builder() {
        let info = EntityInfo {
            key: 42,
            object_id: "relay".to_string(),
            name: "Relay".to_string(),
            unique_id: "uid-relay".to_string(),
            device_id: Some(7),
            icon: "mdi:toggle".to_string(),
            entity_category: EntityCategory::Diagnostic,
            disabled_by_default: true,
        };

        let mut buf = Vec::new();
        encode_entity_info(&mut buf, &info);

        let mut builder = EntityInfoBuilder::default();
        let mut reader = FieldReader::new(&buf);
        while let Some((fnum, value)) = reader.next_field().unwrap() {
            assert!(builder.apply(fnum, &value));
        }
        assert_eq!(builder.finish(), info);
    }

    #[test]
    fn zero_device_id_decodes_to_none() {
        let info = EntityInfo {
            key: 1,
            object_id: "x".to_string(),
            name: String::new(),
            unique_id: String::new(),
            device_id: None,
            icon: String::new(),
            entity_category: EntityCategory::None,
            disabled_by_default: false,
        };
        let mut buf = Vec::new();
        encode_entity_info(&mut buf, &info);
        // device_id is None, so omitted entirely per proto3 default semantics.
        let mut builder = EntityInfoBuilder::default();
        let mut reader = FieldReader::new(&buf);
        while let Some((fnum, value)) = reader.next_field().unwrap() {
            builder.apply(fnum, &value);
        }
        assert_eq!(builder.finish().device_id, None);
    }
}
