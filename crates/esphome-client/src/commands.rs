//! Encodes client-to-device command requests. One function per controllable
//! entity kind, each pairing the wire-level request struct from
//! `esphome_proto::messages` with its stable message-type id — the mirror
//! image of `router`'s decode side. Every command method on the public
//! surface ends up here before the session frames and writes the bytes.

use esphome_proto::messages as msg;
use esphome_proto::messages::ids;

/// A message-type id paired with its encoded body, ready for `frame`.
pub type Encoded = (u32, Vec<u8>);

pub fn switch_command(req: &msg::SwitchCommandRequest) -> Encoded {
    (ids::SWITCH_COMMAND_REQUEST, req.encode())
}

pub fn light_command(req: &msg::LightCommandRequest) -> Encoded {
    (ids::LIGHT_COMMAND_REQUEST, req.encode())
}

pub fn cover_command(req: &msg::CoverCommandRequest) -> Encoded {
    (ids::COVER_COMMAND_REQUEST, req.encode())
}

pub fn fan_command(req: &msg::FanCommandRequest) -> Encoded {
    (ids::FAN_COMMAND_REQUEST, req.encode())
}

pub fn lock_command(req: &msg::LockCommandRequest) -> Encoded {
    (ids::LOCK_COMMAND_REQUEST, req.encode())
}

pub fn button_command(req: &msg::ButtonCommandRequest) -> Encoded {
    (ids::BUTTON_COMMAND_REQUEST, req.encode())
}

pub fn number_command(req: &msg::NumberCommandRequest) -> Encoded {
    (ids::NUMBER_COMMAND_REQUEST, req.encode())
}

pub fn select_command(req: &msg::SelectCommandRequest) -> Encoded {
    (ids::SELECT_COMMAND_REQUEST, req.encode())
}

pub fn climate_command(req: &msg::ClimateCommandRequest) -> Encoded {
    (ids::CLIMATE_COMMAND_REQUEST, req.encode())
}

pub fn text_command(req: &msg::TextCommandRequest) -> Encoded {
    (ids::TEXT_COMMAND_REQUEST, req.encode())
}

pub fn media_player_command(req: &msg::MediaPlayerCommandRequest) -> Encoded {
    (ids::MEDIA_PLAYER_COMMAND_REQUEST, req.encode())
}

pub fn alarm_control_panel_command(req: &msg::AlarmControlPanelCommandRequest) -> Encoded {
    (ids::ALARM_CONTROL_PANEL_COMMAND_REQUEST, req.encode())
}

pub fn date_command(req: &msg::DateCommandRequest) -> Encoded {
    (ids::DATE_COMMAND_REQUEST, req.encode())
}

pub fn time_command(req: &msg::TimeCommandRequest) -> Encoded {
    (ids::TIME_COMMAND_REQUEST, req.encode())
}

pub fn datetime_command(req: &msg::DateTimeCommandRequest) -> Encoded {
    (ids::DATETIME_COMMAND_REQUEST, req.encode())
}

pub fn valve_command(req: &msg::ValveCommandRequest) -> Encoded {
    (ids::VALVE_COMMAND_REQUEST, req.encode())
}

pub fn update_command(req: &msg::UpdateCommandRequest) -> Encoded {
    (ids::UPDATE_COMMAND_REQUEST, req.encode())
}

pub fn execute_service(req: &msg::ExecuteServiceRequest) -> Encoded {
    (ids::EXECUTE_SERVICE_REQUEST, req.encode())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn switch_command_carries_the_switch_command_request_id() {
        let req = msg::SwitchCommandRequest { key: 10, state: true };
        let (message_type, body) = switch_command(&req);
        assert_eq!(message_type, ids::SWITCH_COMMAND_REQUEST);
        assert_eq!(msg::SwitchCommandRequest::decode(&body).unwrap(), req);
    }

    #[test]
    fn climate_command_roundtrips_through_the_encoded_body() {
        let req = msg::ClimateCommandRequest {
            key: 3,
            has_target_temperature: true,
            target_temperature: 21.5,
            ..Default::default()
        };
        let (message_type, body) = climate_command(&req);
        assert_eq!(message_type, ids::CLIMATE_COMMAND_REQUEST);
        assert_eq!(msg::ClimateCommandRequest::decode(&body).unwrap(), req);
    }
}
