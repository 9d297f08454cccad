//! Stable numeric message-type identifiers. These are the IDs that travel in
//! the frame header (see `esphome_client::frame`) and that the router in
//! `esphome_client::router` matches on; an ID with no arm here is unknown and
//! is logged at debug and dropped, never treated as fatal.

pub const HELLO_REQUEST: u32 = 1;
pub const HELLO_RESPONSE: u32 = 2;
pub const CONNECT_REQUEST: u32 = 3;
pub const CONNECT_RESPONSE: u32 = 4;
pub const DISCONNECT_REQUEST: u32 = 5;
pub const DISCONNECT_RESPONSE: u32 = 6;
pub const PING_REQUEST: u32 = 7;
pub const PING_RESPONSE: u32 = 8;
pub const DEVICE_INFO_REQUEST: u32 = 9;
pub const DEVICE_INFO_RESPONSE: u32 = 10;

pub const LIST_ENTITIES_REQUEST: u32 = 11;
pub const LIST_ENTITIES_BINARY_SENSOR_RESPONSE: u32 = 12;
pub const LIST_ENTITIES_COVER_RESPONSE: u32 = 13;
pub const LIST_ENTITIES_FAN_RESPONSE: u32 = 14;
pub const LIST_ENTITIES_LIGHT_RESPONSE: u32 = 15;
pub const LIST_ENTITIES_SENSOR_RESPONSE: u32 = 16;
pub const LIST_ENTITIES_SWITCH_RESPONSE: u32 = 17;
pub const LIST_ENTITIES_TEXT_SENSOR_RESPONSE: u32 = 18;
pub const LIST_ENTITIES_DONE_RESPONSE: u32 = 19;

pub const SUBSCRIBE_STATES_REQUEST: u32 = 20;
pub const BINARY_SENSOR_STATE_RESPONSE: u32 = 21;
pub const COVER_STATE_RESPONSE: u32 = 22;
pub const FAN_STATE_RESPONSE: u32 = 23;
pub const LIGHT_STATE_RESPONSE: u32 = 24;
pub const SENSOR_STATE_RESPONSE: u32 = 25;
pub const SWITCH_STATE_RESPONSE: u32 = 26;
pub const TEXT_SENSOR_STATE_RESPONSE: u32 = 27;

pub const SUBSCRIBE_LOGS_REQUEST: u32 = 28;
pub const SUBSCRIBE_LOGS_RESPONSE: u32 = 29;

pub const COVER_COMMAND_REQUEST: u32 = 30;
pub const FAN_COMMAND_REQUEST: u32 = 31;
pub const LIGHT_COMMAND_REQUEST: u32 = 32;
pub const SWITCH_COMMAND_REQUEST: u32 = 33;

pub const GET_TIME_REQUEST: u32 = 36;
pub const GET_TIME_RESPONSE: u32 = 37;

pub const LIST_ENTITIES_SERVICES_RESPONSE: u32 = 41;
pub const EXECUTE_SERVICE_REQUEST: u32 = 42;

pub const LIST_ENTITIES_CAMERA_RESPONSE: u32 = 43;
pub const CAMERA_IMAGE_RESPONSE: u32 = 44;

pub const LIST_ENTITIES_CLIMATE_RESPONSE: u32 = 46;
pub const CLIMATE_STATE_RESPONSE: u32 = 47;
pub const CLIMATE_COMMAND_REQUEST: u32 = 48;

pub const LIST_ENTITIES_NUMBER_RESPONSE: u32 = 49;
pub const NUMBER_STATE_RESPONSE: u32 = 50;
pub const NUMBER_COMMAND_REQUEST: u32 = 51;

pub const LIST_ENTITIES_SELECT_RESPONSE: u32 = 52;
pub const SELECT_STATE_RESPONSE: u32 = 53;
pub const SELECT_COMMAND_REQUEST: u32 = 54;

pub const LIST_ENTITIES_LOCK_RESPONSE: u32 = 55;
pub const LOCK_STATE_RESPONSE: u32 = 56;
pub const LOCK_COMMAND_REQUEST: u32 = 57;

pub const LIST_ENTITIES_BUTTON_RESPONSE: u32 = 58;
pub const BUTTON_COMMAND_REQUEST: u32 = 59;

pub const LIST_ENTITIES_MEDIA_PLAYER_RESPONSE: u32 = 60;
pub const MEDIA_PLAYER_STATE_RESPONSE: u32 = 61;
pub const MEDIA_PLAYER_COMMAND_REQUEST: u32 = 62;

pub const LIST_ENTITIES_ALARM_CONTROL_PANEL_RESPONSE: u32 = 94;
pub const ALARM_CONTROL_PANEL_STATE_RESPONSE: u32 = 95;
pub const ALARM_CONTROL_PANEL_COMMAND_REQUEST: u32 = 96;

pub const LIST_ENTITIES_TEXT_RESPONSE: u32 = 97;
pub const TEXT_STATE_RESPONSE: u32 = 98;
pub const TEXT_COMMAND_REQUEST: u32 = 99;

pub const LIST_ENTITIES_DATE_RESPONSE: u32 = 100;
pub const DATE_STATE_RESPONSE: u32 = 101;
pub const DATE_COMMAND_REQUEST: u32 = 102;

pub const LIST_ENTITIES_TIME_RESPONSE: u32 = 103;
pub const TIME_STATE_RESPONSE: u32 = 104;
pub const TIME_COMMAND_REQUEST: u32 = 105;

pub const LIST_ENTITIES_EVENT_RESPONSE: u32 = 107;
pub const EVENT_RESPONSE: u32 = 108;

pub const LIST_ENTITIES_VALVE_RESPONSE: u32 = 109;
pub const VALVE_STATE_RESPONSE: u32 = 110;
pub const VALVE_COMMAND_REQUEST: u32 = 111;

pub const LIST_ENTITIES_DATETIME_RESPONSE: u32 = 112;
pub const DATETIME_STATE_RESPONSE: u32 = 113;
pub const DATETIME_COMMAND_REQUEST: u32 = 114;

pub const LIST_ENTITIES_UPDATE_RESPONSE: u32 = 116;
pub const UPDATE_STATE_RESPONSE: u32 = 117;
pub const UPDATE_COMMAND_REQUEST: u32 = 118;
