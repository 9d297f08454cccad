//! The single typed event sum the session loop emits to consumers. One
//! dispatch point, one enum — the systems-language replacement for the
//! source protocol's dynamic event-emitter (see the design notes on
//! event-emitter → typed channels).

use esphome_proto::entity::Entity;
use esphome_proto::messages::{
    AlarmControlPanelStateMessage, BinarySensorState, CameraImageResponse, ClimateState,
    CoverState, DateState, DateTimeState, DeviceInfoResponse, EventResponse, FanState, LightState,
    LockState, MediaPlayerStateMessage, NumberState, SelectState, SensorState,
    SubscribeLogsResponse, SwitchState, TextSensorState, TextState, TimeState, UpdateState,
    ValveState,
};

use crate::error::ClientError;

/// One per-kind state or event push, nested inside [`ClientEvent::Telemetry`].
#[derive(Debug, Clone, PartialEq)]
pub enum EntityState {
    BinarySensor(BinarySensorState),
    Cover(CoverState),
    Fan(FanState),
    Light(LightState),
    Sensor(SensorState),
    Switch(SwitchState),
    TextSensor(TextSensorState),
    Climate(ClimateState),
    Number(NumberState),
    Select(SelectState),
    Lock(LockState),
    MediaPlayer(MediaPlayerStateMessage),
    AlarmControlPanel(AlarmControlPanelStateMessage),
    Text(TextState),
    Date(DateState),
    Time(TimeState),
    DateTime(DateTimeState),
    Valve(ValveState),
    Update(UpdateState),
    Event(EventResponse),
    Camera(CameraImageResponse),
}

impl EntityState {
    pub fn key(&self) -> u32 {
        match self {
            EntityState::BinarySensor(s) => s.key,
            EntityState::Cover(s) => s.key,
            EntityState::Fan(s) => s.key,
            EntityState::Light(s) => s.key,
            EntityState::Sensor(s) => s.key,
            EntityState::Switch(s) => s.key,
            EntityState::TextSensor(s) => s.key,
            EntityState::Climate(s) => s.key,
            EntityState::Number(s) => s.key,
            EntityState::Select(s) => s.key,
            EntityState::Lock(s) => s.key,
            EntityState::MediaPlayer(s) => s.key,
            EntityState::AlarmControlPanel(s) => s.key,
            EntityState::Text(s) => s.key,
            EntityState::Date(s) => s.key,
            EntityState::Time(s) => s.key,
            EntityState::DateTime(s) => s.key,
            EntityState::Valve(s) => s.key,
            EntityState::Update(s) => s.key,
            EntityState::Event(s) => s.key,
            EntityState::Camera(s) => s.key,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisconnectReason {
    Requested,
    SocketError(String),
    PingTimeout,
    ProtocolError(String),
}

#[derive(Debug, Clone)]
pub enum ClientEvent {
    Connected { encrypted: bool },
    Disconnected { reason: DisconnectReason },
    Error(std::sync::Arc<ClientError>),
    DeviceInfo(DeviceInfoResponse),
    Entities(Vec<Entity>),
    Telemetry(EntityState),
    Log(SubscribeLogsResponse),
    Heartbeat,
    TimeSync,
}
