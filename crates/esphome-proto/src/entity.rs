//! The entity data model: a tagged variant over every entity kind ESPHome's
//! native API exposes, plus the fields common to all of them.

/// Fields every entity carries regardless of kind.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EntityInfo {
    pub key: u32,
    pub object_id: String,
    pub name: String,
    pub unique_id: String,
    pub device_id: Option<u32>,
    pub icon: String,
    pub entity_category: EntityCategory,
    pub disabled_by_default: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntityCategory {
    #[default]
    None,
    Config,
    Diagnostic,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinarySensorInfo {
    pub info: EntityInfo,
    pub device_class: String,
    pub is_status_binary_sensor: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SensorInfo {
    pub info: EntityInfo,
    pub device_class: String,
    pub unit_of_measurement: String,
    pub accuracy_decimals: i32,
    pub force_update: bool,
    pub state_class: StateClass,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateClass {
    #[default]
    None,
    Measurement,
    Total,
    TotalIncreasing,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextSensorInfo {
    pub info: EntityInfo,
    pub device_class: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwitchInfo {
    pub info: EntityInfo,
    pub device_class: String,
    pub assumed_state: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LightInfo {
    pub info: EntityInfo,
    pub supported_color_modes: Vec<ColorMode>,
    pub min_mireds: f32,
    pub max_mireds: f32,
    pub effects: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Unknown,
    OnOff,
    Brightness,
    White,
    ColorTemperature,
    ColdWarmWhite,
    Rgb,
    RgbWhite,
    RgbColorTemperature,
    RgbColdWarmWhite,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoverInfo {
    pub info: EntityInfo,
    pub device_class: String,
    pub assumed_state: bool,
    pub supports_position: bool,
    pub supports_tilt: bool,
    pub supports_stop: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FanInfo {
    pub info: EntityInfo,
    pub supports_oscillation: bool,
    pub supports_speed: bool,
    pub supports_direction: bool,
    pub supported_speed_count: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LockInfo {
    pub info: EntityInfo,
    pub supports_open: bool,
    pub assumed_state: bool,
    pub requires_code: bool,
    pub code_format: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ButtonInfo {
    pub info: EntityInfo,
    pub device_class: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumberInfo {
    pub info: EntityInfo,
    pub min_value: f32,
    pub max_value: f32,
    pub step: f32,
    pub unit_of_measurement: String,
    pub mode: NumberMode,
    pub device_class: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NumberMode {
    #[default]
    Auto,
    Box,
    Slider,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectInfo {
    pub info: EntityInfo,
    pub options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClimateInfo {
    pub info: EntityInfo,
    pub supports_current_temperature: bool,
    pub supports_two_point_target_temperature: bool,
    pub supported_modes: Vec<String>,
    pub visual_min_temperature: f32,
    pub visual_max_temperature: f32,
    pub visual_target_temperature_step: f32,
    pub supported_fan_modes: Vec<String>,
    pub supported_swing_modes: Vec<String>,
    pub supported_presets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextInfo {
    pub info: EntityInfo,
    pub min_length: u32,
    pub max_length: u32,
    pub pattern: String,
    pub mode: TextMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextMode {
    #[default]
    Text,
    Password,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaPlayerInfo {
    pub info: EntityInfo,
    pub supports_pause: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraInfo {
    pub info: EntityInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlarmControlPanelInfo {
    pub info: EntityInfo,
    pub supported_features: u32,
    pub requires_code: bool,
    pub requires_code_to_arm: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateInfo {
    pub info: EntityInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeInfo {
    pub info: EntityInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateTimeInfo {
    pub info: EntityInfo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventInfo {
    pub info: EntityInfo,
    pub device_class: String,
    pub event_types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpdateInfo {
    pub info: EntityInfo,
    pub device_class: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValveInfo {
    pub info: EntityInfo,
    pub device_class: String,
    pub assumed_state: bool,
    pub supports_position: bool,
    pub supports_stop: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceInfo {
    pub info: EntityInfo,
    pub args: Vec<ServiceArg>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceArg {
    pub name: String,
    pub kind: ServiceArgKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceArgKind {
    Bool,
    Int,
    Float,
    String,
    BoolArray,
    IntArray,
    FloatArray,
    StringArray,
}

/// The tagged union over every entity kind a device can publish. Each
/// variant's payload is the kind-specific descriptor, which embeds the
/// common `EntityInfo`.
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    BinarySensor(BinarySensorInfo),
    Sensor(SensorInfo),
    TextSensor(TextSensorInfo),
    Switch(SwitchInfo),
    Light(LightInfo),
    Cover(CoverInfo),
    Fan(FanInfo),
    Lock(LockInfo),
    Button(ButtonInfo),
    Number(NumberInfo),
    Select(SelectInfo),
    Climate(ClimateInfo),
    Text(TextInfo),
    MediaPlayer(MediaPlayerInfo),
    Camera(CameraInfo),
    AlarmControlPanel(AlarmControlPanelInfo),
    Date(DateInfo),
    Time(TimeInfo),
    DateTime(DateTimeInfo),
    Event(EventInfo),
    Update(UpdateInfo),
    Valve(ValveInfo),
    Service(ServiceInfo),
}

impl Entity {
    pub fn info(&self) -> &EntityInfo {
        match self {
            Entity::BinarySensor(e) => &e.info,
            Entity::Sensor(e) => &e.info,
            Entity::TextSensor(e) => &e.info,
            Entity::Switch(e) => &e.info,
            Entity::Light(e) => &e.info,
            Entity::Cover(e) => &e.info,
            Entity::Fan(e) => &e.info,
            Entity::Lock(e) => &e.info,
            Entity::Button(e) => &e.info,
            Entity::Number(e) => &e.info,
            Entity::Select(e) => &e.info,
            Entity::Climate(e) => &e.info,
            Entity::Text(e) => &e.info,
            Entity::MediaPlayer(e) => &e.info,
            Entity::Camera(e) => &e.info,
            Entity::AlarmControlPanel(e) => &e.info,
            Entity::Date(e) => &e.info,
            Entity::Time(e) => &e.info,
            Entity::DateTime(e) => &e.info,
            Entity::Event(e) => &e.info,
            Entity::Update(e) => &e.info,
            Entity::Valve(e) => &e.info,
            Entity::Service(e) => &e.info,
        }
    }

    pub fn key(&self) -> u32 {
        self.info().key
    }

    /// Lowercase type tag used to derive the registry's string id,
    /// `"<type>-<object_id>"`.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Entity::BinarySensor(_) => "binary_sensor",
            Entity::Sensor(_) => "sensor",
            Entity::TextSensor(_) => "text_sensor",
            Entity::Switch(_) => "switch",
            Entity::Light(_) => "light",
            Entity::Cover(_) => "cover",
            Entity::Fan(_) => "fan",
            Entity::Lock(_) => "lock",
            Entity::Button(_) => "button",
            Entity::Number(_) => "number",
            Entity::Select(_) => "select",
            Entity::Climate(_) => "climate",
            Entity::Text(_) => "text",
            Entity::MediaPlayer(_) => "media_player",
            Entity::Camera(_) => "camera",
            Entity::AlarmControlPanel(_) => "alarm_control_panel",
            Entity::Date(_) => "date",
            Entity::Time(_) => "time",
            Entity::DateTime(_) => "datetime",
            Entity::Event(_) => "event",
            Entity::Update(_) => "update",
            Entity::Valve(_) => "valve",
            Entity::Service(_) => "service",
        }
    }

    /// `"<type>-<object_id>"`, the registry's derived string id.
    pub fn string_id(&self) -> String {
        format!("{}-{}", self.type_tag(), self.info().object_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(key: u32, object_id: &str) -> EntityInfo {
        EntityInfo {
            key,
            object_id: object_id.to_string(),
            name: object_id.to_string(),
            unique_id: format!("unique-{object_id}"),
            device_id: None,
            icon: String::new(),
            entity_category: EntityCategory::None,
            disabled_by_default: false,
        }
    }

    #[test]
    fn string_id_is_lowercase_type_dash_object_id() {
        let switch = Entity::Switch(SwitchInfo {
            info: info(10, "relay"),
            device_class: String::new(),
            assumed_state: false,
        });
        assert_eq!(switch.string_id(), "switch-relay");
        assert_eq!(switch.key(), 10);
    }

    #[test]
    fn sensor_string_id() {
        let sensor = Entity::Sensor(SensorInfo {
            info: info(11, "temp"),
            device_class: String::new(),
            unit_of_measurement: "°C".to_string(),
            accuracy_decimals: 1,
            force_update: false,
            state_class: StateClass::Measurement,
        });
        assert_eq!(sensor.string_id(), "sensor-temp");
    }
}
