//! `ListEntities<Kind>Response` encode/decode, one function pair per entity
//! kind. Every decoder runs the common `EntityInfoBuilder` alongside its own
//! kind-specific fields (numbered from `FIRST_KIND_FIELD`); an unrecognized
//! field number captured by neither is simply dropped, per C1's unknown-field
//! rule.

use crate::codec::{
    write_bool_field, write_float_field, write_string_field, write_varint_field, FieldReader,
    WireError,
};
use crate::entity::*;

use super::common::{encode_entity_info, EntityInfoBuilder, FIRST_KIND_FIELD as F0};

fn color_mode_to_u32(m: ColorMode) -> u32 {
    match m {
        ColorMode::Unknown => 0,
        ColorMode::OnOff => 1,
        ColorMode::Brightness => 2,
        ColorMode::White => 3,
        ColorMode::ColorTemperature => 4,
        ColorMode::ColdWarmWhite => 5,
        ColorMode::Rgb => 6,
        ColorMode::RgbWhite => 7,
        ColorMode::RgbColorTemperature => 8,
        ColorMode::RgbColdWarmWhite => 9,
    }
}

fn color_mode_from_u32(v: u32) -> ColorMode {
    match v {
        1 => ColorMode::OnOff,
        2 => ColorMode::Brightness,
        3 => ColorMode::White,
        4 => ColorMode::ColorTemperature,
        5 => ColorMode::ColdWarmWhite,
        6 => ColorMode::Rgb,
        7 => ColorMode::RgbWhite,
        8 => ColorMode::RgbColorTemperature,
        9 => ColorMode::RgbColdWarmWhite,
        _ => ColorMode::Unknown,
    }
}

fn state_class_to_u32(s: StateClass) -> u32 {
    match s {
        StateClass::None => 0,
        StateClass::Measurement => 1,
        StateClass::Total => 2,
        StateClass::TotalIncreasing => 3,
    }
}

fn state_class_from_u32(v: u32) -> StateClass {
    match v {
        1 => StateClass::Measurement,
        2 => StateClass::Total,
        3 => StateClass::TotalIncreasing,
        _ => StateClass::None,
    }
}

fn number_mode_to_u32(m: NumberMode) -> u32 {
    match m {
        NumberMode::Auto => 0,
        NumberMode::Box => 1,
        NumberMode::Slider => 2,
    }
}

fn number_mode_from_u32(v: u32) -> NumberMode {
    match v {
        1 => NumberMode::Box,
        2 => NumberMode::Slider,
        _ => NumberMode::Auto,
    }
}

fn text_mode_to_u32(m: TextMode) -> u32 {
    match m {
        TextMode::Text => 0,
        TextMode::Password => 1,
    }
}

fn text_mode_from_u32(v: u32) -> TextMode {
    match v {
        1 => TextMode::Password,
        _ => TextMode::Text,
    }
}

fn service_arg_kind_to_u32(k: ServiceArgKind) -> u32 {
    match k {
        ServiceArgKind::Bool => 0,
        ServiceArgKind::Int => 1,
        ServiceArgKind::Float => 2,
        ServiceArgKind::String => 3,
        ServiceArgKind::BoolArray => 4,
        ServiceArgKind::IntArray => 5,
        ServiceArgKind::FloatArray => 6,
        ServiceArgKind::StringArray => 7,
    }
}

fn service_arg_kind_from_u32(v: u32) -> ServiceArgKind {
    match v {
        1 => ServiceArgKind::Int,
        2 => ServiceArgKind::Float,
        3 => ServiceArgKind::String,
        4 => ServiceArgKind::BoolArray,
        5 => ServiceArgKind::IntArray,
        6 => ServiceArgKind::FloatArray,
        7 => ServiceArgKind::StringArray,
        _ => ServiceArgKind::Bool,
    }
}

pub fn encode_binary_sensor(e: &BinarySensorInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_string_field(&mut out, F0, &e.device_class);
    if e.is_status_binary_sensor {
        write_bool_field(&mut out, F0 + 1, true);
    }
    out
}

pub fn decode_binary_sensor(body: &[u8]) -> Result<BinarySensorInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut device_class = String::new();
    let mut is_status_binary_sensor = false;
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => device_class = value.as_str().unwrap_or_default().to_string(),
            f if f == F0 + 1 => is_status_binary_sensor = value.as_bool().unwrap_or(false),
            _ => {}
        }
    }
    Ok(BinarySensorInfo { info: builder.finish(), device_class, is_status_binary_sensor })
}

pub fn encode_sensor(e: &SensorInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_string_field(&mut out, F0, &e.device_class);
    write_string_field(&mut out, F0 + 1, &e.unit_of_measurement);
    write_varint_field(&mut out, F0 + 2, e.accuracy_decimals as u64);
    if e.force_update {
        write_bool_field(&mut out, F0 + 3, true);
    }
    write_varint_field(&mut out, F0 + 4, state_class_to_u32(e.state_class) as u64);
    out
}

pub fn decode_sensor(body: &[u8]) -> Result<SensorInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = SensorInfo {
        info: EntityInfo::default(),
        device_class: String::new(),
        unit_of_measurement: String::new(),
        accuracy_decimals: 0,
        force_update: false,
        state_class: StateClass::None,
    };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.device_class = value.as_str().unwrap_or_default().to_string(),
            f if f == F0 + 1 => e.unit_of_measurement = value.as_str().unwrap_or_default().to_string(),
            f if f == F0 + 2 => e.accuracy_decimals = value.as_i32().unwrap_or(0),
            f if f == F0 + 3 => e.force_update = value.as_bool().unwrap_or(false),
            f if f == F0 + 4 => e.state_class = state_class_from_u32(value.as_u64().unwrap_or(0) as u32),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_text_sensor(e: &TextSensorInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_string_field(&mut out, F0, &e.device_class);
    out
}

pub fn decode_text_sensor(body: &[u8]) -> Result<TextSensorInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut device_class = String::new();
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        if field == F0 {
            device_class = value.as_str().unwrap_or_default().to_string();
        }
    }
    Ok(TextSensorInfo { info: builder.finish(), device_class })
}

pub fn encode_switch(e: &SwitchInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_string_field(&mut out, F0, &e.device_class);
    if e.assumed_state {
        write_bool_field(&mut out, F0 + 1, true);
    }
    out
}

pub fn decode_switch(body: &[u8]) -> Result<SwitchInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut device_class = String::new();
    let mut assumed_state = false;
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => device_class = value.as_str().unwrap_or_default().to_string(),
            f if f == F0 + 1 => assumed_state = value.as_bool().unwrap_or(false),
            _ => {}
        }
    }
    Ok(SwitchInfo { info: builder.finish(), device_class, assumed_state })
}

pub fn encode_light(e: &LightInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    for mode in &e.supported_color_modes {
        write_varint_field(&mut out, F0, color_mode_to_u32(*mode) as u64);
    }
    write_float_field(&mut out, F0 + 1, e.min_mireds);
    write_float_field(&mut out, F0 + 2, e.max_mireds);
    for effect in &e.effects {
        write_string_field(&mut out, F0 + 3, effect);
    }
    out
}

pub fn decode_light(body: &[u8]) -> Result<LightInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = LightInfo {
        info: EntityInfo::default(),
        supported_color_modes: Vec::new(),
        min_mireds: 0.0,
        max_mireds: 0.0,
        effects: Vec::new(),
    };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.supported_color_modes.push(color_mode_from_u32(value.as_u64().unwrap_or(0) as u32)),
            f if f == F0 + 1 => e.min_mireds = value.as_f32().unwrap_or(0.0),
            f if f == F0 + 2 => e.max_mireds = value.as_f32().unwrap_or(0.0),
            f if f == F0 + 3 => e.effects.push(value.as_str().unwrap_or_default().to_string()),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_cover(e: &CoverInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_string_field(&mut out, F0, &e.device_class);
    if e.assumed_state {
        write_bool_field(&mut out, F0 + 1, true);
    }
    if e.supports_position {
        write_bool_field(&mut out, F0 + 2, true);
    }
    if e.supports_tilt {
        write_bool_field(&mut out, F0 + 3, true);
    }
    if e.supports_stop {
        write_bool_field(&mut out, F0 + 4, true);
    }
    out
}

pub fn decode_cover(body: &[u8]) -> Result<CoverInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = CoverInfo {
        info: EntityInfo::default(),
        device_class: String::new(),
        assumed_state: false,
        supports_position: false,
        supports_tilt: false,
        supports_stop: false,
    };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.device_class = value.as_str().unwrap_or_default().to_string(),
            f if f == F0 + 1 => e.assumed_state = value.as_bool().unwrap_or(false),
            f if f == F0 + 2 => e.supports_position = value.as_bool().unwrap_or(false),
            f if f == F0 + 3 => e.supports_tilt = value.as_bool().unwrap_or(false),
            f if f == F0 + 4 => e.supports_stop = value.as_bool().unwrap_or(false),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_fan(e: &FanInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    if e.supports_oscillation {
        write_bool_field(&mut out, F0, true);
    }
    if e.supports_speed {
        write_bool_field(&mut out, F0 + 1, true);
    }
    if e.supports_direction {
        write_bool_field(&mut out, F0 + 2, true);
    }
    write_varint_field(&mut out, F0 + 3, e.supported_speed_count as u64);
    out
}

pub fn decode_fan(body: &[u8]) -> Result<FanInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = FanInfo {
        info: EntityInfo::default(),
        supports_oscillation: false,
        supports_speed: false,
        supports_direction: false,
        supported_speed_count: 0,
    };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.supports_oscillation = value.as_bool().unwrap_or(false),
            f if f == F0 + 1 => e.supports_speed = value.as_bool().unwrap_or(false),
            f if f == F0 + 2 => e.supports_direction = value.as_bool().unwrap_or(false),
            f if f == F0 + 3 => e.supported_speed_count = value.as_i32().unwrap_or(0),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_lock(e: &LockInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    if e.supports_open {
        write_bool_field(&mut out, F0, true);
    }
    if e.assumed_state {
        write_bool_field(&mut out, F0 + 1, true);
    }
    if e.requires_code {
        write_bool_field(&mut out, F0 + 2, true);
    }
    write_string_field(&mut out, F0 + 3, &e.code_format);
    out
}

pub fn decode_lock(body: &[u8]) -> Result<LockInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = LockInfo {
        info: EntityInfo::default(),
        supports_open: false,
        assumed_state: false,
        requires_code: false,
        code_format: String::new(),
    };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.supports_open = value.as_bool().unwrap_or(false),
            f if f == F0 + 1 => e.assumed_state = value.as_bool().unwrap_or(false),
            f if f == F0 + 2 => e.requires_code = value.as_bool().unwrap_or(false),
            f if f == F0 + 3 => e.code_format = value.as_str().unwrap_or_default().to_string(),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_button(e: &ButtonInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_string_field(&mut out, F0, &e.device_class);
    out
}

pub fn decode_button(body: &[u8]) -> Result<ButtonInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut device_class = String::new();
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        if field == F0 {
            device_class = value.as_str().unwrap_or_default().to_string();
        }
    }
    Ok(ButtonInfo { info: builder.finish(), device_class })
}

pub fn encode_number(e: &NumberInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_float_field(&mut out, F0, e.min_value);
    write_float_field(&mut out, F0 + 1, e.max_value);
    write_float_field(&mut out, F0 + 2, e.step);
    write_string_field(&mut out, F0 + 3, &e.unit_of_measurement);
    write_varint_field(&mut out, F0 + 4, number_mode_to_u32(e.mode) as u64);
    write_string_field(&mut out, F0 + 5, &e.device_class);
    out
}

pub fn decode_number(body: &[u8]) -> Result<NumberInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = NumberInfo {
        info: EntityInfo::default(),
        min_value: 0.0,
        max_value: 0.0,
        step: 0.0,
        unit_of_measurement: String::new(),
        mode: NumberMode::Auto,
        device_class: String::new(),
    };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.min_value = value.as_f32().unwrap_or(0.0),
            f if f == F0 + 1 => e.max_value = value.as_f32().unwrap_or(0.0),
            f if f == F0 + 2 => e.step = value.as_f32().unwrap_or(0.0),
            f if f == F0 + 3 => e.unit_of_measurement = value.as_str().unwrap_or_default().to_string(),
            f if f == F0 + 4 => e.mode = number_mode_from_u32(value.as_u64().unwrap_or(0) as u32),
            f if f == F0 + 5 => e.device_class = value.as_str().unwrap_or_default().to_string(),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_select(e: &SelectInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    for option in &e.options {
        write_string_field(&mut out, F0, option);
    }
    out
}

pub fn decode_select(body: &[u8]) -> Result<SelectInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut options = Vec::new();
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        if field == F0 {
            options.push(value.as_str().unwrap_or_default().to_string());
        }
    }
    Ok(SelectInfo { info: builder.finish(), options })
}

pub fn encode_climate(e: &ClimateInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    if e.supports_current_temperature {
        write_bool_field(&mut out, F0, true);
    }
    if e.supports_two_point_target_temperature {
        write_bool_field(&mut out, F0 + 1, true);
    }
    for mode in &e.supported_modes {
        write_string_field(&mut out, F0 + 2, mode);
    }
    write_float_field(&mut out, F0 + 3, e.visual_min_temperature);
    write_float_field(&mut out, F0 + 4, e.visual_max_temperature);
    write_float_field(&mut out, F0 + 5, e.visual_target_temperature_step);
    for mode in &e.supported_fan_modes {
        write_string_field(&mut out, F0 + 6, mode);
    }
    for mode in &e.supported_swing_modes {
        write_string_field(&mut out, F0 + 7, mode);
    }
    for preset in &e.supported_presets {
        write_string_field(&mut out, F0 + 8, preset);
    }
    out
}

pub fn decode_climate(body: &[u8]) -> Result<ClimateInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = ClimateInfo {
        info: EntityInfo::default(),
        supports_current_temperature: false,
        supports_two_point_target_temperature: false,
        supported_modes: Vec::new(),
        visual_min_temperature: 0.0,
        visual_max_temperature: 0.0,
        visual_target_temperature_step: 0.0,
        supported_fan_modes: Vec::new(),
        supported_swing_modes: Vec::new(),
        supported_presets: Vec::new(),
    };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.supports_current_temperature = value.as_bool().unwrap_or(false),
            f if f == F0 + 1 => e.supports_two_point_target_temperature = value.as_bool().unwrap_or(false),
            f if f == F0 + 2 => e.supported_modes.push(value.as_str().unwrap_or_default().to_string()),
            f if f == F0 + 3 => e.visual_min_temperature = value.as_f32().unwrap_or(0.0),
            f if f == F0 + 4 => e.visual_max_temperature = value.as_f32().unwrap_or(0.0),
            f if f == F0 + 5 => e.visual_target_temperature_step = value.as_f32().unwrap_or(0.0),
            f if f == F0 + 6 => e.supported_fan_modes.push(value.as_str().unwrap_or_default().to_string()),
            f if f == F0 + 7 => e.supported_swing_modes.push(value.as_str().unwrap_or_default().to_string()),
            f if f == F0 + 8 => e.supported_presets.push(value.as_str().unwrap_or_default().to_string()),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_text(e: &TextInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_varint_field(&mut out, F0, e.min_length as u64);
    write_varint_field(&mut out, F0 + 1, e.max_length as u64);
    write_string_field(&mut out, F0 + 2, &e.pattern);
    write_varint_field(&mut out, F0 + 3, text_mode_to_u32(e.mode) as u64);
    out
}

pub fn decode_text(body: &[u8]) -> Result<TextInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = TextInfo {
        info: EntityInfo::default(),
        min_length: 0,
        max_length: 0,
        pattern: String::new(),
        mode: TextMode::Text,
    };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.min_length = value.as_u64().unwrap_or(0) as u32,
            f if f == F0 + 1 => e.max_length = value.as_u64().unwrap_or(0) as u32,
            f if f == F0 + 2 => e.pattern = value.as_str().unwrap_or_default().to_string(),
            f if f == F0 + 3 => e.mode = text_mode_from_u32(value.as_u64().unwrap_or(0) as u32),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_media_player(e: &MediaPlayerInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    if e.supports_pause {
        write_bool_field(&mut out, F0, true);
    }
    out
}

pub fn decode_media_player(body: &[u8]) -> Result<MediaPlayerInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut supports_pause = false;
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        if field == F0 {
            supports_pause = value.as_bool().unwrap_or(false);
        }
    }
    Ok(MediaPlayerInfo { info: builder.finish(), supports_pause })
}

pub fn encode_camera(e: &CameraInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    out
}

pub fn decode_camera(body: &[u8]) -> Result<CameraInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        builder.apply(field, &value);
    }
    Ok(CameraInfo { info: builder.finish() })
}

pub fn encode_alarm_control_panel(e: &AlarmControlPanelInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_varint_field(&mut out, F0, e.supported_features as u64);
    if e.requires_code {
        write_bool_field(&mut out, F0 + 1, true);
    }
    if e.requires_code_to_arm {
        write_bool_field(&mut out, F0 + 2, true);
    }
    out
}

pub fn decode_alarm_control_panel(body: &[u8]) -> Result<AlarmControlPanelInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = AlarmControlPanelInfo {
        info: EntityInfo::default(),
        supported_features: 0,
        requires_code: false,
        requires_code_to_arm: false,
    };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.supported_features = value.as_u64().unwrap_or(0) as u32,
            f if f == F0 + 1 => e.requires_code = value.as_bool().unwrap_or(false),
            f if f == F0 + 2 => e.requires_code_to_arm = value.as_bool().unwrap_or(false),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_date(e: &DateInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    out
}

pub fn decode_date(body: &[u8]) -> Result<DateInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        builder.apply(field, &value);
    }
    Ok(DateInfo { info: builder.finish() })
}

pub fn encode_time(e: &TimeInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    out
}

pub fn decode_time(body: &[u8]) -> Result<TimeInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        builder.apply(field, &value);
    }
    Ok(TimeInfo { info: builder.finish() })
}

pub fn encode_datetime(e: &DateTimeInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    out
}

pub fn decode_datetime(body: &[u8]) -> Result<DateTimeInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        builder.apply(field, &value);
    }
    Ok(DateTimeInfo { info: builder.finish() })
}

pub fn encode_event(e: &EventInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_string_field(&mut out, F0, &e.device_class);
    for event_type in &e.event_types {
        write_string_field(&mut out, F0 + 1, event_type);
    }
    out
}

pub fn decode_event(body: &[u8]) -> Result<EventInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = EventInfo { info: EntityInfo::default(), device_class: String::new(), event_types: Vec::new() };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.device_class = value.as_str().unwrap_or_default().to_string(),
            f if f == F0 + 1 => e.event_types.push(value.as_str().unwrap_or_default().to_string()),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_update(e: &UpdateInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_string_field(&mut out, F0, &e.device_class);
    out
}

pub fn decode_update(body: &[u8]) -> Result<UpdateInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut device_class = String::new();
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        if field == F0 {
            device_class = value.as_str().unwrap_or_default().to_string();
        }
    }
    Ok(UpdateInfo { info: builder.finish(), device_class })
}

pub fn encode_valve(e: &ValveInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    write_string_field(&mut out, F0, &e.device_class);
    if e.assumed_state {
        write_bool_field(&mut out, F0 + 1, true);
    }
    if e.supports_position {
        write_bool_field(&mut out, F0 + 2, true);
    }
    if e.supports_stop {
        write_bool_field(&mut out, F0 + 3, true);
    }
    out
}

pub fn decode_valve(body: &[u8]) -> Result<ValveInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut e = ValveInfo {
        info: EntityInfo::default(),
        device_class: String::new(),
        assumed_state: false,
        supports_position: false,
        supports_stop: false,
    };
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        match field {
            f if f == F0 => e.device_class = value.as_str().unwrap_or_default().to_string(),
            f if f == F0 + 1 => e.assumed_state = value.as_bool().unwrap_or(false),
            f if f == F0 + 2 => e.supports_position = value.as_bool().unwrap_or(false),
            f if f == F0 + 3 => e.supports_stop = value.as_bool().unwrap_or(false),
            _ => {}
        }
    }
    e.info = builder.finish();
    Ok(e)
}

pub fn encode_service(e: &ServiceInfo) -> Vec<u8> {
    let mut out = Vec::new();
    encode_entity_info(&mut out, &e.info);
    for arg in &e.args {
        let mut arg_buf = Vec::new();
        write_string_field(&mut arg_buf, 1, &arg.name);
        write_varint_field(&mut arg_buf, 2, service_arg_kind_to_u32(arg.kind) as u64);
        crate::codec::write_bytes_field(&mut out, F0, &arg_buf);
    }
    out
}

pub fn decode_service(body: &[u8]) -> Result<ServiceInfo, WireError> {
    let mut builder = EntityInfoBuilder::default();
    let mut args = Vec::new();
    let mut reader = FieldReader::new(body);
    while let Some((field, value)) = reader.next_field()? {
        if builder.apply(field, &value) {
            continue;
        }
        if field == F0 {
            if let Some(bytes) = value.as_bytes() {
                let mut name = String::new();
                let mut kind = ServiceArgKind::Bool;
                let mut arg_reader = FieldReader::new(bytes);
                while let Some((arg_field, arg_value)) = arg_reader.next_field()? {
                    match arg_field {
                        1 => name = arg_value.as_str().unwrap_or_default().to_string(),
                        2 => kind = service_arg_kind_from_u32(arg_value.as_u64().unwrap_or(0) as u32),
                        _ => {}
                    }
                }
                args.push(ServiceArg { name, kind });
            }
        }
    }
    Ok(ServiceInfo { info: builder.finish(), args })
}
