//! Client-to-device command requests. Many fields here are optional in the
//! sense that the client must say explicitly whether it is setting them —
//! ESPHome does this with a paired `has_<field>` bool rather than a wrapper
//! type, so a command can legally touch only one axis of a light or climate
//! entity. We mirror that convention field-for-field.

use crate::codec::{write_bool_field, write_float_field, write_string_field, write_varint_field, FieldReader, WireError};
use crate::messages::types::{AlarmControlPanelCommand, ClimateFanMode, ClimateMode, ClimatePreset, ClimateSwingMode, FanDirection, LockCommand, MediaPlayerCommand, UpdateCommand};

macro_rules! has_then {
    ($out:expr, $has_field:expr, $has:expr, $write:expr) => {
        if $has {
            write_bool_field($out, $has_field, true);
            $write;
        }
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CoverCommandRequest {
    pub key: u32,
    pub has_position: bool,
    pub position: f32,
    pub has_tilt: bool,
    pub tilt: f32,
    pub stop: bool,
}

impl CoverCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        has_then!(&mut out, 2, self.has_position, write_float_field(&mut out, 3, self.position));
        has_then!(&mut out, 4, self.has_tilt, write_float_field(&mut out, 5, self.tilt));
        if self.stop {
            write_bool_field(&mut out, 6, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.has_position = value.as_bool().unwrap_or(false),
                3 => msg.position = value.as_f32().unwrap_or(0.0),
                4 => msg.has_tilt = value.as_bool().unwrap_or(false),
                5 => msg.tilt = value.as_f32().unwrap_or(0.0),
                6 => msg.stop = value.as_bool().unwrap_or(false),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FanCommandRequest {
    pub key: u32,
    pub has_state: bool,
    pub state: bool,
    pub has_speed_level: bool,
    pub speed_level: i32,
    pub has_oscillating: bool,
    pub oscillating: bool,
    pub has_direction: bool,
    pub direction: FanDirection,
}

impl FanCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        has_then!(&mut out, 2, self.has_state, write_bool_field(&mut out, 3, self.state));
        has_then!(&mut out, 4, self.has_speed_level, write_varint_field(&mut out, 7, self.speed_level as u64));
        has_then!(&mut out, 8, self.has_oscillating, write_bool_field(&mut out, 9, self.oscillating));
        has_then!(&mut out, 10, self.has_direction, write_varint_field(&mut out, 11, self.direction.as_u32() as u64));
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.has_state = value.as_bool().unwrap_or(false),
                3 => msg.state = value.as_bool().unwrap_or(false),
                4 => msg.has_speed_level = value.as_bool().unwrap_or(false),
                7 => msg.speed_level = value.as_i32().unwrap_or(0),
                8 => msg.has_oscillating = value.as_bool().unwrap_or(false),
                9 => msg.oscillating = value.as_bool().unwrap_or(false),
                10 => msg.has_direction = value.as_bool().unwrap_or(false),
                11 => msg.direction = FanDirection::from_u32(value.as_u64().unwrap_or(0) as u32),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LightCommandRequest {
    pub key: u32,
    pub has_state: bool,
    pub state: bool,
    pub has_brightness: bool,
    pub brightness: f32,
    pub has_color_mode: bool,
    pub color_mode: u32,
    pub has_rgb: bool,
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub has_white: bool,
    pub white: f32,
    pub has_color_temperature: bool,
    pub color_temperature: f32,
    pub has_transition_length: bool,
    pub transition_length: u32,
    pub has_flash_length: bool,
    pub flash_length: u32,
    pub has_effect: bool,
    pub effect: String,
}

impl LightCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        has_then!(&mut out, 2, self.has_state, write_bool_field(&mut out, 3, self.state));
        has_then!(&mut out, 4, self.has_brightness, write_float_field(&mut out, 5, self.brightness));
        has_then!(&mut out, 22, self.has_color_mode, write_varint_field(&mut out, 23, self.color_mode as u64));
        if self.has_rgb {
            write_bool_field(&mut out, 6, true);
            write_float_field(&mut out, 7, self.red);
            write_float_field(&mut out, 8, self.green);
            write_float_field(&mut out, 9, self.blue);
        }
        has_then!(&mut out, 10, self.has_white, write_float_field(&mut out, 11, self.white));
        has_then!(&mut out, 12, self.has_color_temperature, write_float_field(&mut out, 13, self.color_temperature));
        has_then!(&mut out, 14, self.has_transition_length, write_varint_field(&mut out, 15, self.transition_length as u64));
        has_then!(&mut out, 16, self.has_flash_length, write_varint_field(&mut out, 17, self.flash_length as u64));
        has_then!(&mut out, 18, self.has_effect, write_string_field(&mut out, 19, &self.effect));
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.has_state = value.as_bool().unwrap_or(false),
                3 => msg.state = value.as_bool().unwrap_or(false),
                4 => msg.has_brightness = value.as_bool().unwrap_or(false),
                5 => msg.brightness = value.as_f32().unwrap_or(0.0),
                6 => msg.has_rgb = value.as_bool().unwrap_or(false),
                7 => msg.red = value.as_f32().unwrap_or(0.0),
                8 => msg.green = value.as_f32().unwrap_or(0.0),
                9 => msg.blue = value.as_f32().unwrap_or(0.0),
                10 => msg.has_white = value.as_bool().unwrap_or(false),
                11 => msg.white = value.as_f32().unwrap_or(0.0),
                12 => msg.has_color_temperature = value.as_bool().unwrap_or(false),
                13 => msg.color_temperature = value.as_f32().unwrap_or(0.0),
                14 => msg.has_transition_length = value.as_bool().unwrap_or(false),
                15 => msg.transition_length = value.as_u64().unwrap_or(0) as u32,
                16 => msg.has_flash_length = value.as_bool().unwrap_or(false),
                17 => msg.flash_length = value.as_u64().unwrap_or(0) as u32,
                18 => msg.has_effect = value.as_bool().unwrap_or(false),
                19 => msg.effect = value.as_str().unwrap_or_default().to_string(),
                22 => msg.has_color_mode = value.as_bool().unwrap_or(false),
                23 => msg.color_mode = value.as_u64().unwrap_or(0) as u32,
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SwitchCommandRequest {
    pub key: u32,
    pub state: bool,
}

impl SwitchCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        if self.state {
            write_bool_field(&mut out, 2, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.state = value.as_bool().unwrap_or(false),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClimateCommandRequest {
    pub key: u32,
    pub has_mode: bool,
    pub mode: ClimateMode,
    pub has_target_temperature: bool,
    pub target_temperature: f32,
    pub has_target_temperature_low: bool,
    pub target_temperature_low: f32,
    pub has_target_temperature_high: bool,
    pub target_temperature_high: f32,
    pub has_fan_mode: bool,
    pub fan_mode: ClimateFanMode,
    pub has_swing_mode: bool,
    pub swing_mode: ClimateSwingMode,
    pub has_preset: bool,
    pub preset: ClimatePreset,
}

impl ClimateCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        has_then!(&mut out, 2, self.has_mode, write_varint_field(&mut out, 3, self.mode.as_u32() as u64));
        has_then!(&mut out, 4, self.has_target_temperature, write_float_field(&mut out, 5, self.target_temperature));
        has_then!(&mut out, 6, self.has_target_temperature_low, write_float_field(&mut out, 7, self.target_temperature_low));
        has_then!(&mut out, 8, self.has_target_temperature_high, write_float_field(&mut out, 9, self.target_temperature_high));
        has_then!(&mut out, 10, self.has_fan_mode, write_varint_field(&mut out, 11, self.fan_mode.as_u32() as u64));
        has_then!(&mut out, 12, self.has_swing_mode, write_varint_field(&mut out, 13, self.swing_mode.as_u32() as u64));
        has_then!(&mut out, 14, self.has_preset, write_varint_field(&mut out, 15, self.preset.as_u32() as u64));
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.has_mode = value.as_bool().unwrap_or(false),
                3 => msg.mode = ClimateMode::from_u32(value.as_u64().unwrap_or(0) as u32),
                4 => msg.has_target_temperature = value.as_bool().unwrap_or(false),
                5 => msg.target_temperature = value.as_f32().unwrap_or(0.0),
                6 => msg.has_target_temperature_low = value.as_bool().unwrap_or(false),
                7 => msg.target_temperature_low = value.as_f32().unwrap_or(0.0),
                8 => msg.has_target_temperature_high = value.as_bool().unwrap_or(false),
                9 => msg.target_temperature_high = value.as_f32().unwrap_or(0.0),
                10 => msg.has_fan_mode = value.as_bool().unwrap_or(false),
                11 => msg.fan_mode = ClimateFanMode::from_u32(value.as_u64().unwrap_or(0) as u32),
                12 => msg.has_swing_mode = value.as_bool().unwrap_or(false),
                13 => msg.swing_mode = ClimateSwingMode::from_u32(value.as_u64().unwrap_or(0) as u32),
                14 => msg.has_preset = value.as_bool().unwrap_or(false),
                15 => msg.preset = ClimatePreset::from_u32(value.as_u64().unwrap_or(0) as u32),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NumberCommandRequest {
    pub key: u32,
    pub state: f32,
}

impl NumberCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_float_field(&mut out, 2, self.state);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.state = value.as_f32().unwrap_or(0.0),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectCommandRequest {
    pub key: u32,
    pub state: String,
}

impl SelectCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_string_field(&mut out, 2, &self.state);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.state = value.as_str().unwrap_or_default().to_string(),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LockCommandRequest {
    pub key: u32,
    pub command: LockCommand,
    pub has_code: bool,
}

impl LockCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_varint_field(&mut out, 2, self.command.as_u32() as u64);
        if self.has_code {
            write_bool_field(&mut out, 3, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.command = LockCommand::from_u32(value.as_u64().unwrap_or(0) as u32),
                3 => msg.has_code = value.as_bool().unwrap_or(false),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ButtonCommandRequest {
    pub key: u32,
}

impl ButtonCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            if field == 1 {
                msg.key = value.as_u64().unwrap_or(0) as u32;
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MediaPlayerCommandRequest {
    pub key: u32,
    pub has_command: bool,
    pub command: MediaPlayerCommand,
    pub has_volume: bool,
    pub volume: f32,
    pub has_media_url: bool,
}

impl MediaPlayerCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        has_then!(&mut out, 2, self.has_command, write_varint_field(&mut out, 3, self.command.as_u32() as u64));
        has_then!(&mut out, 4, self.has_volume, write_float_field(&mut out, 5, self.volume));
        if self.has_media_url {
            write_bool_field(&mut out, 6, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.has_command = value.as_bool().unwrap_or(false),
                3 => msg.command = MediaPlayerCommand::from_u32(value.as_u64().unwrap_or(0) as u32),
                4 => msg.has_volume = value.as_bool().unwrap_or(false),
                5 => msg.volume = value.as_f32().unwrap_or(0.0),
                6 => msg.has_media_url = value.as_bool().unwrap_or(false),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AlarmControlPanelCommandRequest {
    pub key: u32,
    pub command: AlarmControlPanelCommand,
}

impl AlarmControlPanelCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_varint_field(&mut out, 2, self.command.as_u32() as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.command = AlarmControlPanelCommand::from_u32(value.as_u64().unwrap_or(0) as u32),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextCommandRequest {
    pub key: u32,
    pub state: String,
}

impl TextCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_string_field(&mut out, 2, &self.state);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.state = value.as_str().unwrap_or_default().to_string(),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DateCommandRequest {
    pub key: u32,
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

impl DateCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_varint_field(&mut out, 2, self.year as u64);
        write_varint_field(&mut out, 3, self.month as u64);
        write_varint_field(&mut out, 4, self.day as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.year = value.as_u64().unwrap_or(0) as u32,
                3 => msg.month = value.as_u64().unwrap_or(0) as u32,
                4 => msg.day = value.as_u64().unwrap_or(0) as u32,
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeCommandRequest {
    pub key: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl TimeCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_varint_field(&mut out, 2, self.hour as u64);
        write_varint_field(&mut out, 3, self.minute as u64);
        write_varint_field(&mut out, 4, self.second as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.hour = value.as_u64().unwrap_or(0) as u32,
                3 => msg.minute = value.as_u64().unwrap_or(0) as u32,
                4 => msg.second = value.as_u64().unwrap_or(0) as u32,
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DateTimeCommandRequest {
    pub key: u32,
    pub epoch_seconds: u32,
}

impl DateTimeCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_varint_field(&mut out, 2, self.epoch_seconds as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.epoch_seconds = value.as_u64().unwrap_or(0) as u32,
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ValveCommandRequest {
    pub key: u32,
    pub has_position: bool,
    pub position: f32,
    pub stop: bool,
}

impl ValveCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        has_then!(&mut out, 2, self.has_position, write_float_field(&mut out, 3, self.position));
        if self.stop {
            write_bool_field(&mut out, 4, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.has_position = value.as_bool().unwrap_or(false),
                3 => msg.position = value.as_f32().unwrap_or(0.0),
                4 => msg.stop = value.as_bool().unwrap_or(false),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UpdateCommandRequest {
    pub key: u32,
    pub command: UpdateCommand,
}

impl UpdateCommandRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        write_varint_field(&mut out, 2, self.command.as_u32() as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.command = UpdateCommand::from_u32(value.as_u64().unwrap_or(0) as u32),
                _ => {}
            }
        }
        Ok(msg)
    }
}

/// A service call (`ExecuteServiceRequest`): the key of the `ServiceInfo`
/// entity plus its arguments encoded positionally, matching the order the
/// entity declared them in.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecuteServiceRequest {
    pub key: u32,
    pub bool_args: Vec<bool>,
    pub int_args: Vec<i32>,
    pub float_args: Vec<f32>,
    pub string_args: Vec<String>,
}

impl ExecuteServiceRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.key as u64);
        for v in &self.bool_args {
            write_bool_field(&mut out, 2, *v);
        }
        for v in &self.int_args {
            write_varint_field(&mut out, 3, *v as u64);
        }
        for v in &self.float_args {
            write_float_field(&mut out, 4, *v);
        }
        for v in &self.string_args {
            write_string_field(&mut out, 5, v);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.key = value.as_u64().unwrap_or(0) as u32,
                2 => msg.bool_args.push(value.as_bool().unwrap_or(false)),
                3 => msg.int_args.push(value.as_i32().unwrap_or(0)),
                4 => msg.float_args.push(value.as_f32().unwrap_or(0.0)),
                5 => msg.string_args.push(value.as_str().unwrap_or_default().to_string()),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cover_command_only_sets_position_when_has_position() {
        let msg = CoverCommandRequest { key: 1, has_position: true, position: 0.75, has_tilt: false, tilt: 0.0, stop: false };
        let decoded = CoverCommandRequest::decode(&msg.encode()).unwrap();
        assert_eq!(decoded, msg);
        assert!(!decoded.has_tilt);
    }

    #[test]
    fn light_command_rgb_roundtrip() {
        let msg = LightCommandRequest {
            key: 4,
            has_state: true,
            state: true,
            has_rgb: true,
            red: 1.0,
            green: 0.5,
            blue: 0.0,
            ..Default::default()
        };
        let decoded = LightCommandRequest::decode(&msg.encode()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn execute_service_request_roundtrip_with_mixed_arg_types() {
        let msg = ExecuteServiceRequest {
            key: 2,
            bool_args: vec![true],
            int_args: vec![3, -1],
            float_args: vec![1.5],
            string_args: vec!["hi".to_string()],
        };
        let decoded = ExecuteServiceRequest::decode(&msg.encode()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn lock_command_roundtrip() {
        let msg = LockCommandRequest { key: 8, command: LockCommand::Unlock, has_code: false };
        assert_eq!(LockCommandRequest::decode(&msg.encode()).unwrap(), msg);
    }
}
