//! Maps numeric message-type ids to decoders. A `match` over a small,
//! closed id space rather than a runtime table of trait objects — the
//! compiler flags a missing arm, and an id with no arm here is simply
//! unknown, never fatal.

use esphome_proto::entity as ent;
use esphome_proto::messages as msg;
use esphome_proto::messages::ids;

use crate::events::{ClientEvent, EntityState};

/// One discovery response, routed separately from [`ClientEvent`] so the
/// session can fold it into the registry before deciding whether to also
/// surface an `entities` snapshot event.
#[derive(Debug, Clone, PartialEq)]
pub enum DiscoveryItem {
    Entity(ent::Entity),
    Done,
}

/// What the router produced for one decoded frame: a discovery item (goes
/// to the registry), a consumer-facing event, a session-lifecycle message
/// the caller still needs to act on, or nothing (unknown id).
#[derive(Debug, Clone)]
pub enum RoutedMessage {
    Discovery(DiscoveryItem),
    Event(ClientEvent),
    Hello(msg::HelloResponse),
    Connect(msg::ConnectResponse),
    DeviceInfo(msg::DeviceInfoResponse),
    Ping,
    GetTime(msg::GetTimeRequest),
    Disconnect,
}

/// Decode one frame body given its message-type id. Returns `None` for an
/// id this router doesn't know about — never fatal; the caller decides how
/// (or whether) to log the drop, since this free function has no `Logger`.
pub fn route(message_type: u32, body: &[u8]) -> Result<Option<RoutedMessage>, esphome_proto::codec::WireError> {
    use ids::*;

    let routed = match message_type {
        HELLO_RESPONSE => RoutedMessage::Hello(msg::HelloResponse::decode(body)?),
        CONNECT_RESPONSE => RoutedMessage::Connect(msg::ConnectResponse::decode(body)?),
        DEVICE_INFO_RESPONSE => RoutedMessage::DeviceInfo(msg::DeviceInfoResponse::decode(body)?),
        PING_REQUEST => RoutedMessage::Ping,
        PING_RESPONSE => RoutedMessage::Event(ClientEvent::Heartbeat),
        GET_TIME_REQUEST => RoutedMessage::GetTime(msg::GetTimeRequest::decode(body)?),
        DISCONNECT_REQUEST => RoutedMessage::Disconnect,
        DISCONNECT_RESPONSE => RoutedMessage::Disconnect,

        LIST_ENTITIES_DONE_RESPONSE => RoutedMessage::Discovery(DiscoveryItem::Done),
        LIST_ENTITIES_BINARY_SENSOR_RESPONSE => {
            discovery(ent::Entity::BinarySensor(msg::entities::decode_binary_sensor(body)?))
        }
        LIST_ENTITIES_COVER_RESPONSE => discovery(ent::Entity::Cover(msg::entities::decode_cover(body)?)),
        LIST_ENTITIES_FAN_RESPONSE => discovery(ent::Entity::Fan(msg::entities::decode_fan(body)?)),
        LIST_ENTITIES_LIGHT_RESPONSE => discovery(ent::Entity::Light(msg::entities::decode_light(body)?)),
        LIST_ENTITIES_SENSOR_RESPONSE => discovery(ent::Entity::Sensor(msg::entities::decode_sensor(body)?)),
        LIST_ENTITIES_SWITCH_RESPONSE => discovery(ent::Entity::Switch(msg::entities::decode_switch(body)?)),
        LIST_ENTITIES_TEXT_SENSOR_RESPONSE => {
            discovery(ent::Entity::TextSensor(msg::entities::decode_text_sensor(body)?))
        }
        LIST_ENTITIES_LOCK_RESPONSE => discovery(ent::Entity::Lock(msg::entities::decode_lock(body)?)),
        LIST_ENTITIES_BUTTON_RESPONSE => discovery(ent::Entity::Button(msg::entities::decode_button(body)?)),
        LIST_ENTITIES_NUMBER_RESPONSE => discovery(ent::Entity::Number(msg::entities::decode_number(body)?)),
        LIST_ENTITIES_SELECT_RESPONSE => discovery(ent::Entity::Select(msg::entities::decode_select(body)?)),
        LIST_ENTITIES_CLIMATE_RESPONSE => discovery(ent::Entity::Climate(msg::entities::decode_climate(body)?)),
        LIST_ENTITIES_TEXT_RESPONSE => discovery(ent::Entity::Text(msg::entities::decode_text(body)?)),
        LIST_ENTITIES_MEDIA_PLAYER_RESPONSE => {
            discovery(ent::Entity::MediaPlayer(msg::entities::decode_media_player(body)?))
        }
        LIST_ENTITIES_CAMERA_RESPONSE => discovery(ent::Entity::Camera(msg::entities::decode_camera(body)?)),
        LIST_ENTITIES_ALARM_CONTROL_PANEL_RESPONSE => {
            discovery(ent::Entity::AlarmControlPanel(msg::entities::decode_alarm_control_panel(body)?))
        }
        LIST_ENTITIES_DATE_RESPONSE => discovery(ent::Entity::Date(msg::entities::decode_date(body)?)),
        LIST_ENTITIES_TIME_RESPONSE => discovery(ent::Entity::Time(msg::entities::decode_time(body)?)),
        LIST_ENTITIES_DATETIME_RESPONSE => discovery(ent::Entity::DateTime(msg::entities::decode_datetime(body)?)),
        LIST_ENTITIES_EVENT_RESPONSE => discovery(ent::Entity::Event(msg::entities::decode_event(body)?)),
        LIST_ENTITIES_UPDATE_RESPONSE => discovery(ent::Entity::Update(msg::entities::decode_update(body)?)),
        LIST_ENTITIES_VALVE_RESPONSE => discovery(ent::Entity::Valve(msg::entities::decode_valve(body)?)),
        LIST_ENTITIES_SERVICES_RESPONSE => discovery(ent::Entity::Service(msg::entities::decode_service(body)?)),

        BINARY_SENSOR_STATE_RESPONSE => telemetry(EntityState::BinarySensor(msg::BinarySensorState::decode(body)?)),
        COVER_STATE_RESPONSE => telemetry(EntityState::Cover(msg::CoverState::decode(body)?)),
        FAN_STATE_RESPONSE => telemetry(EntityState::Fan(msg::FanState::decode(body)?)),
        LIGHT_STATE_RESPONSE => telemetry(EntityState::Light(msg::LightState::decode(body)?)),
        SENSOR_STATE_RESPONSE => telemetry(EntityState::Sensor(msg::SensorState::decode(body)?)),
        SWITCH_STATE_RESPONSE => telemetry(EntityState::Switch(msg::SwitchState::decode(body)?)),
        TEXT_SENSOR_STATE_RESPONSE => telemetry(EntityState::TextSensor(msg::TextSensorState::decode(body)?)),
        CLIMATE_STATE_RESPONSE => telemetry(EntityState::Climate(msg::ClimateState::decode(body)?)),
        NUMBER_STATE_RESPONSE => telemetry(EntityState::Number(msg::NumberState::decode(body)?)),
        SELECT_STATE_RESPONSE => telemetry(EntityState::Select(msg::SelectState::decode(body)?)),
        LOCK_STATE_RESPONSE => telemetry(EntityState::Lock(msg::LockState::decode(body)?)),
        MEDIA_PLAYER_STATE_RESPONSE => {
            telemetry(EntityState::MediaPlayer(msg::MediaPlayerStateMessage::decode(body)?))
        }
        ALARM_CONTROL_PANEL_STATE_RESPONSE => {
            telemetry(EntityState::AlarmControlPanel(msg::AlarmControlPanelStateMessage::decode(body)?))
        }
        TEXT_STATE_RESPONSE => telemetry(EntityState::Text(msg::TextState::decode(body)?)),
        DATE_STATE_RESPONSE => telemetry(EntityState::Date(msg::DateState::decode(body)?)),
        TIME_STATE_RESPONSE => telemetry(EntityState::Time(msg::TimeState::decode(body)?)),
        DATETIME_STATE_RESPONSE => telemetry(EntityState::DateTime(msg::DateTimeState::decode(body)?)),
        VALVE_STATE_RESPONSE => telemetry(EntityState::Valve(msg::ValveState::decode(body)?)),
        UPDATE_STATE_RESPONSE => telemetry(EntityState::Update(msg::UpdateState::decode(body)?)),
        EVENT_RESPONSE => telemetry(EntityState::Event(msg::EventResponse::decode(body)?)),
        CAMERA_IMAGE_RESPONSE => telemetry(EntityState::Camera(msg::CameraImageResponse::decode(body)?)),

        SUBSCRIBE_LOGS_RESPONSE => RoutedMessage::Event(ClientEvent::Log(msg::SubscribeLogsResponse::decode(body)?)),

        // Unknown to this router: the caller logs and drops it, since only
        // the caller holds the `Logger` this session was built with.
        _other => return Ok(None),
    };

    Ok(Some(routed))
}

fn discovery(entity: ent::Entity) -> RoutedMessage {
    RoutedMessage::Discovery(DiscoveryItem::Entity(entity))
}

fn telemetry(state: EntityState) -> RoutedMessage {
    RoutedMessage::Event(ClientEvent::Telemetry(state))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_message_id_is_dropped_not_fatal() {
        let routed = route(9999, &[]).unwrap();
        assert!(routed.is_none());
    }

    #[test]
    fn switch_state_routes_to_telemetry_event() {
        let state = msg::SwitchState { key: 10, state: true };
        let routed = route(ids::SWITCH_STATE_RESPONSE, &state.encode()).unwrap().unwrap();
        match routed {
            RoutedMessage::Event(ClientEvent::Telemetry(EntityState::Switch(decoded))) => {
                assert_eq!(decoded, state);
            }
            other => panic!("expected switch telemetry, got {other:?}"),
        }
    }

    #[test]
    fn list_entities_done_routes_to_discovery_done() {
        let routed = route(ids::LIST_ENTITIES_DONE_RESPONSE, &[]).unwrap().unwrap();
        assert!(matches!(routed, RoutedMessage::Discovery(DiscoveryItem::Done)));
    }

    #[test]
    fn ping_request_is_routed_so_session_can_answer() {
        let routed = route(ids::PING_REQUEST, &[]).unwrap().unwrap();
        assert!(matches!(routed, RoutedMessage::Ping));
    }
}
