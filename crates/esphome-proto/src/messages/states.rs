//! Per-entity-kind state push messages. Every one of these starts with a
//! `key` (field 1) identifying which entity the state belongs to, followed by
//! kind-specific fields; `common::decode_key` peels the key off and hands
//! back the remaining fields for the kind-specific match.

use crate::codec::{write_bool_field, write_float_field, write_string_field, write_varint_field, FieldReader, WireError};
use crate::messages::types::{AlarmControlPanelState as AlarmState, ClimateAction, ClimateFanMode, ClimateMode, ClimatePreset, ClimateSwingMode, CoverOperation, FanDirection, LockEntityState, MediaPlayerState as MediaState, ValveOperation};

use super::common::decode_key;

macro_rules! field_u64 {
    ($rest:expr, $field:expr) => {
        $rest.iter().find(|(f, _)| *f == $field).and_then(|(_, v)| v.as_u64())
    };
}

macro_rules! field_f32 {
    ($rest:expr, $field:expr) => {
        $rest.iter().find(|(f, _)| *f == $field).and_then(|(_, v)| v.as_f32())
    };
}

macro_rules! field_bool {
    ($rest:expr, $field:expr) => {
        $rest.iter().find(|(f, _)| *f == $field).and_then(|(_, v)| v.as_bool())
    };
}

macro_rules! field_str {
    ($rest:expr, $field:expr) => {
        $rest.iter().find(|(f, _)| *f == $field).and_then(|(_, v)| v.as_str()).unwrap_or_default().to_string()
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BinarySensorState {
    pub key: u32,
    pub state: bool,
    pub missing_state: bool,
}

impl BinarySensorState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        if self.state {
            write_bool_field(&mut out, 2, true);
        }
        if self.missing_state {
            write_bool_field(&mut out, 3, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            state: field_bool!(rest, 2).unwrap_or(false),
            missing_state: field_bool!(rest, 3).unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoverState {
    pub key: u32,
    pub position: f32,
    pub tilt: f32,
    pub current_operation: CoverOperation,
}

impl CoverState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_float_field(&mut out, 2, self.position);
        write_float_field(&mut out, 3, self.tilt);
        write_varint_field(&mut out, 4, self.current_operation.as_u32() as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            position: field_f32!(rest, 2).unwrap_or(0.0),
            tilt: field_f32!(rest, 3).unwrap_or(0.0),
            current_operation: CoverOperation::from_u32(field_u64!(rest, 4).unwrap_or(0) as u32),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FanState {
    pub key: u32,
    pub state: bool,
    pub oscillating: bool,
    pub speed_level: i32,
    pub direction: FanDirection,
}

impl FanState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        if self.state {
            write_bool_field(&mut out, 2, true);
        }
        if self.oscillating {
            write_bool_field(&mut out, 3, true);
        }
        write_varint_field(&mut out, 4, self.direction.as_u32() as u64);
        write_varint_field(&mut out, 5, self.speed_level as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            state: field_bool!(rest, 2).unwrap_or(false),
            oscillating: field_bool!(rest, 3).unwrap_or(false),
            direction: FanDirection::from_u32(field_u64!(rest, 4).unwrap_or(0) as u32),
            speed_level: field_u64!(rest, 5).unwrap_or(0) as i32,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightState {
    pub key: u32,
    pub state: bool,
    pub brightness: f32,
    pub color_mode: u32,
    pub color_brightness: f32,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub white: f32,
    pub color_temperature: f32,
    pub cold_white: f32,
    pub warm_white: f32,
    pub effect: String,
}

impl LightState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        if self.state {
            write_bool_field(&mut out, 2, true);
        }
        write_float_field(&mut out, 3, self.brightness);
        write_varint_field(&mut out, 4, self.color_mode as u64);
        write_float_field(&mut out, 5, self.color_brightness);
        write_float_field(&mut out, 6, self.red);
        write_float_field(&mut out, 7, self.green);
        write_float_field(&mut out, 8, self.blue);
        write_float_field(&mut out, 9, self.white);
        write_float_field(&mut out, 10, self.color_temperature);
        write_float_field(&mut out, 11, self.cold_white);
        write_float_field(&mut out, 12, self.warm_white);
        write_string_field(&mut out, 13, &self.effect);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            state: field_bool!(rest, 2).unwrap_or(false),
            brightness: field_f32!(rest, 3).unwrap_or(0.0),
            color_mode: field_u64!(rest, 4).unwrap_or(0) as u32,
            color_brightness: field_f32!(rest, 5).unwrap_or(0.0),
            red: field_f32!(rest, 6).unwrap_or(0.0),
            green: field_f32!(rest, 7).unwrap_or(0.0),
            blue: field_f32!(rest, 8).unwrap_or(0.0),
            white: field_f32!(rest, 9).unwrap_or(0.0),
            color_temperature: field_f32!(rest, 10).unwrap_or(0.0),
            cold_white: field_f32!(rest, 11).unwrap_or(0.0),
            warm_white: field_f32!(rest, 12).unwrap_or(0.0),
            effect: field_str!(rest, 13),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorState {
    pub key: u32,
    pub state: f32,
    pub missing_state: bool,
}

impl SensorState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_float_field(&mut out, 2, self.state);
        if self.missing_state {
            write_bool_field(&mut out, 3, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            state: field_f32!(rest, 2).unwrap_or(0.0),
            missing_state: field_bool!(rest, 3).unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwitchState {
    pub key: u32,
    pub state: bool,
}

impl SwitchState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        if self.state {
            write_bool_field(&mut out, 2, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self { key, state: field_bool!(rest, 2).unwrap_or(false) })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextSensorState {
    pub key: u32,
    pub state: String,
    pub missing_state: bool,
}

impl TextSensorState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_string_field(&mut out, 2, &self.state);
        if self.missing_state {
            write_bool_field(&mut out, 3, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self { key, state: field_str!(rest, 2), missing_state: field_bool!(rest, 3).unwrap_or(false) })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClimateState {
    pub key: u32,
    pub mode: ClimateMode,
    pub current_temperature: f32,
    pub target_temperature: f32,
    pub target_temperature_low: f32,
    pub target_temperature_high: f32,
    pub action: ClimateAction,
    pub fan_mode: ClimateFanMode,
    pub swing_mode: ClimateSwingMode,
    pub preset: ClimatePreset,
}

impl ClimateState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_varint_field(&mut out, 2, self.mode.as_u32() as u64);
        write_float_field(&mut out, 3, self.current_temperature);
        write_float_field(&mut out, 4, self.target_temperature);
        write_float_field(&mut out, 5, self.target_temperature_low);
        write_float_field(&mut out, 6, self.target_temperature_high);
        write_varint_field(&mut out, 7, self.action.as_u32() as u64);
        write_varint_field(&mut out, 8, self.fan_mode.as_u32() as u64);
        write_varint_field(&mut out, 9, self.swing_mode.as_u32() as u64);
        write_varint_field(&mut out, 10, self.preset.as_u32() as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            mode: ClimateMode::from_u32(field_u64!(rest, 2).unwrap_or(0) as u32),
            current_temperature: field_f32!(rest, 3).unwrap_or(0.0),
            target_temperature: field_f32!(rest, 4).unwrap_or(0.0),
            target_temperature_low: field_f32!(rest, 5).unwrap_or(0.0),
            target_temperature_high: field_f32!(rest, 6).unwrap_or(0.0),
            action: ClimateAction::from_u32(field_u64!(rest, 7).unwrap_or(0) as u32),
            fan_mode: ClimateFanMode::from_u32(field_u64!(rest, 8).unwrap_or(0) as u32),
            swing_mode: ClimateSwingMode::from_u32(field_u64!(rest, 9).unwrap_or(0) as u32),
            preset: ClimatePreset::from_u32(field_u64!(rest, 10).unwrap_or(0) as u32),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumberState {
    pub key: u32,
    pub state: f32,
    pub missing_state: bool,
}

impl NumberState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_float_field(&mut out, 2, self.state);
        if self.missing_state {
            write_bool_field(&mut out, 3, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            state: field_f32!(rest, 2).unwrap_or(0.0),
            missing_state: field_bool!(rest, 3).unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectState {
    pub key: u32,
    pub state: String,
    pub missing_state: bool,
}

impl SelectState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_string_field(&mut out, 2, &self.state);
        if self.missing_state {
            write_bool_field(&mut out, 3, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self { key, state: field_str!(rest, 2), missing_state: field_bool!(rest, 3).unwrap_or(false) })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LockState {
    pub key: u32,
    pub state: LockEntityState,
}

impl LockState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_varint_field(&mut out, 2, self.state.as_u32() as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self { key, state: LockEntityState::from_u32(field_u64!(rest, 2).unwrap_or(0) as u32) })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MediaPlayerStateMessage {
    pub key: u32,
    pub state: MediaState,
    pub volume: f32,
    pub muted: bool,
}

impl MediaPlayerStateMessage {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_varint_field(&mut out, 2, self.state.as_u32() as u64);
        write_float_field(&mut out, 3, self.volume);
        if self.muted {
            write_bool_field(&mut out, 4, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            state: MediaState::from_u32(field_u64!(rest, 2).unwrap_or(0) as u32),
            volume: field_f32!(rest, 3).unwrap_or(0.0),
            muted: field_bool!(rest, 4).unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlarmControlPanelStateMessage {
    pub key: u32,
    pub state: AlarmState,
}

impl AlarmControlPanelStateMessage {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_varint_field(&mut out, 2, self.state.as_u32() as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self { key, state: AlarmState::from_u32(field_u64!(rest, 2).unwrap_or(0) as u32) })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextState {
    pub key: u32,
    pub state: String,
    pub missing_state: bool,
}

impl TextState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_string_field(&mut out, 2, &self.state);
        if self.missing_state {
            write_bool_field(&mut out, 3, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self { key, state: field_str!(rest, 2), missing_state: field_bool!(rest, 3).unwrap_or(false) })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DateState {
    pub key: u32,
    pub missing_state: bool,
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl DateState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        if self.missing_state {
            write_bool_field(&mut out, 2, true);
        }
        write_varint_field(&mut out, 3, self.year as u64);
        write_varint_field(&mut out, 4, self.month as u64);
        write_varint_field(&mut out, 5, self.day as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            missing_state: field_bool!(rest, 2).unwrap_or(false),
            year: field_u64!(rest, 3).unwrap_or(0) as u32,
            month: field_u64!(rest, 4).unwrap_or(0) as u32,
            day: field_u64!(rest, 5).unwrap_or(0) as u32,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeState {
    pub key: u32,
    pub missing_state: bool,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        if self.missing_state {
            write_bool_field(&mut out, 2, true);
        }
        write_varint_field(&mut out, 3, self.hour as u64);
        write_varint_field(&mut out, 4, self.minute as u64);
        write_varint_field(&mut out, 5, self.second as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            missing_state: field_bool!(rest, 2).unwrap_or(false),
            hour: field_u64!(rest, 3).unwrap_or(0) as u32,
            minute: field_u64!(rest, 4).unwrap_or(0) as u32,
            second: field_u64!(rest, 5).unwrap_or(0) as u32,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DateTimeState {
    pub key: u32,
    pub missing_state: bool,
    pub epoch_seconds: u32,
}

impl DateTimeState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        if self.missing_state {
            write_bool_field(&mut out, 2, true);
        }
        write_varint_field(&mut out, 3, self.epoch_seconds as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            missing_state: field_bool!(rest, 2).unwrap_or(false),
            epoch_seconds: field_u64!(rest, 3).unwrap_or(0) as u32,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValveState {
    pub key: u32,
    pub position: f32,
    pub current_operation: ValveOperation,
}

impl ValveState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_float_field(&mut out, 2, self.position);
        write_varint_field(&mut out, 3, self.current_operation.as_u32() as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            position: field_f32!(rest, 2).unwrap_or(0.0),
            current_operation: ValveOperation::from_u32(field_u64!(rest, 3).unwrap_or(0) as u32),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateState {
    pub key: u32,
    pub missing_state: bool,
    pub in_progress: bool,
    pub has_progress: bool,
    pub progress: f32,
    pub current_version: String,
    pub latest_version: String,
    pub title: String,
    pub release_summary: String,
    pub release_url: String,
}

impl UpdateState {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        if self.missing_state {
            write_bool_field(&mut out, 2, true);
        }
        if self.in_progress {
            write_bool_field(&mut out, 3, true);
        }
        if self.has_progress {
            write_bool_field(&mut out, 4, true);
        }
        write_float_field(&mut out, 5, self.progress);
        write_string_field(&mut out, 6, &self.current_version);
        write_string_field(&mut out, 7, &self.latest_version);
        write_string_field(&mut out, 8, &self.title);
        write_string_field(&mut out, 9, &self.release_summary);
        write_string_field(&mut out, 10, &self.release_url);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self {
            key,
            missing_state: field_bool!(rest, 2).unwrap_or(false),
            in_progress: field_bool!(rest, 3).unwrap_or(false),
            has_progress: field_bool!(rest, 4).unwrap_or(false),
            progress: field_f32!(rest, 5).unwrap_or(0.0),
            current_version: field_str!(rest, 6),
            latest_version: field_str!(rest, 7),
            title: field_str!(rest, 8),
            release_summary: field_str!(rest, 9),
            release_url: field_str!(rest, 10),
        })
    }
}

/// A device-initiated `event` entity firing (`EventResponse`): a key and the
/// event type string that just occurred, not a continuous state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EventResponse {
    pub key: u32,
    pub event_type: String,
}

impl EventResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_string_field(&mut out, 2, &self.event_type);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        Ok(Self { key, event_type: field_str!(rest, 2) })
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CameraImageResponse {
    pub key: u32,
    pub data: Vec<u8>,
    pub done: bool,
}

impl CameraImageResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        crate::codec::write_bytes_field(&mut out, 2, &self.data);
        if self.done {
            write_bool_field(&mut out, 3, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let (key, rest) = decode_key(&mut FieldReader::new(body))?;
        let data = rest
            .iter()
            .find(|(f, _)| *f == 2)
            .map(|(_, v)| match v {
                super::common::RawValueOwned::Bytes(b) => b.clone(),
                _ => Vec::new(),
            })
            .unwrap_or_default();
        Ok(Self { key, data, done: field_bool!(rest, 3).unwrap_or(false) })
    }
}
