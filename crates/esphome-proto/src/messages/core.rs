//! The session-lifecycle messages: hello/connect/disconnect, ping, device
//! info, entity discovery bookends, state subscription, and log streaming.
//! Everything here is a flat struct with one `encode`/`decode` pair.

use crate::codec::{
    write_bool_field, write_string_field, write_varint_field, FieldReader, WireError,
};

macro_rules! empty_message {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
        pub struct $name;

        impl $name {
            pub fn encode(&self) -> Vec<u8> {
                Vec::new()
            }

            pub fn decode(_body: &[u8]) -> Result<Self, WireError> {
                Ok(Self)
            }
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelloRequest {
    pub client_info: String,
    pub api_version_major: u32,
    pub api_version_minor: u32,
}

impl HelloRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if !self.client_info.is_empty() {
            write_string_field(&mut out, 1, &self.client_info);
        }
        write_varint_field(&mut out, 2, self.api_version_major as u64);
        write_varint_field(&mut out, 3, self.api_version_minor as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self { client_info: String::new(), api_version_major: 0, api_version_minor: 0 };
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.client_info = value.as_str().unwrap_or_default().to_string(),
                2 => msg.api_version_major = value.as_u64().unwrap_or(0) as u32,
                3 => msg.api_version_minor = value.as_u64().unwrap_or(0) as u32,
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HelloResponse {
    pub api_version_major: u32,
    pub api_version_minor: u32,
    pub server_info: String,
    pub name: String,
}

impl HelloResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.api_version_major as u64);
        write_varint_field(&mut out, 2, self.api_version_minor as u64);
        if !self.server_info.is_empty() {
            write_string_field(&mut out, 3, &self.server_info);
        }
        if !self.name.is_empty() {
            write_string_field(&mut out, 4, &self.name);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.api_version_major = value.as_u64().unwrap_or(0) as u32,
                2 => msg.api_version_minor = value.as_u64().unwrap_or(0) as u32,
                3 => msg.server_info = value.as_str().unwrap_or_default().to_string(),
                4 => msg.name = value.as_str().unwrap_or_default().to_string(),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ConnectRequest {
    pub password: String,
}

impl ConnectRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if !self.password.is_empty() {
            write_string_field(&mut out, 1, &self.password);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            if field == 1 {
                msg.password = value.as_str().unwrap_or_default().to_string();
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConnectResponse {
    pub invalid_password: bool,
}

impl ConnectResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.invalid_password {
            write_bool_field(&mut out, 1, true);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            if field == 1 {
                msg.invalid_password = value.as_bool().unwrap_or(false);
            }
        }
        Ok(msg)
    }
}

empty_message!(DisconnectRequest);
empty_message!(DisconnectResponse);
empty_message!(PingRequest);
empty_message!(PingResponse);
empty_message!(DeviceInfoRequest);
empty_message!(ListEntitiesRequest);
empty_message!(ListEntitiesDoneResponse);
empty_message!(SubscribeStatesRequest);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceInfoResponse {
    pub uses_password: bool,
    pub name: String,
    pub mac_address: String,
    pub esphome_version: String,
    pub compilation_time: String,
    pub model: String,
    pub has_deep_sleep: bool,
    pub project_name: String,
    pub project_version: String,
    pub webserver_port: u32,
    pub manufacturer: String,
    pub friendly_name: String,
}

impl DeviceInfoResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.uses_password {
            write_bool_field(&mut out, 1, true);
        }
        write_string_field(&mut out, 2, &self.name);
        write_string_field(&mut out, 3, &self.mac_address);
        write_string_field(&mut out, 4, &self.esphome_version);
        write_string_field(&mut out, 5, &self.compilation_time);
        write_string_field(&mut out, 6, &self.model);
        if self.has_deep_sleep {
            write_bool_field(&mut out, 7, true);
        }
        write_string_field(&mut out, 8, &self.project_name);
        write_string_field(&mut out, 9, &self.project_version);
        if self.webserver_port != 0 {
            write_varint_field(&mut out, 10, self.webserver_port as u64);
        }
        write_string_field(&mut out, 11, &self.manufacturer);
        write_string_field(&mut out, 12, &self.friendly_name);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.uses_password = value.as_bool().unwrap_or(false),
                2 => msg.name = value.as_str().unwrap_or_default().to_string(),
                3 => msg.mac_address = value.as_str().unwrap_or_default().to_string(),
                4 => msg.esphome_version = value.as_str().unwrap_or_default().to_string(),
                5 => msg.compilation_time = value.as_str().unwrap_or_default().to_string(),
                6 => msg.model = value.as_str().unwrap_or_default().to_string(),
                7 => msg.has_deep_sleep = value.as_bool().unwrap_or(false),
                8 => msg.project_name = value.as_str().unwrap_or_default().to_string(),
                9 => msg.project_version = value.as_str().unwrap_or_default().to_string(),
                10 => msg.webserver_port = value.as_u64().unwrap_or(0) as u32,
                11 => msg.manufacturer = value.as_str().unwrap_or_default().to_string(),
                12 => msg.friendly_name = value.as_str().unwrap_or_default().to_string(),
                _ => {}
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetTimeRequest;

impl GetTimeRequest {
    pub fn encode(&self) -> Vec<u8> {
        Vec::new()
    }

    pub fn decode(_body: &[u8]) -> Result<Self, WireError> {
        Ok(Self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GetTimeResponse {
    pub epoch_seconds: u32,
}

impl GetTimeResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.epoch_seconds != 0 {
            write_varint_field(&mut out, 1, self.epoch_seconds as u64);
        }
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            if field == 1 {
                msg.epoch_seconds = value.as_u64().unwrap_or(0) as u32;
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubscribeLogsRequest {
    pub level: u32,
}

impl SubscribeLogsRequest {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.level as u64);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            if field == 1 {
                msg.level = value.as_u64().unwrap_or(0) as u32;
            }
        }
        Ok(msg)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubscribeLogsResponse {
    pub level: u32,
    pub message: String,
}

impl SubscribeLogsResponse {
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::new();
        write_varint_field(&mut out, 1, self.level as u64);
        write_string_field(&mut out, 2, &self.message);
        out
    }

    pub fn decode(body: &[u8]) -> Result<Self, WireError> {
        let mut msg = Self::default();
        let mut reader = FieldReader::new(body);
        while let Some((field, value)) = reader.next_field()? {
            match field {
                1 => msg.level = value.as_u64().unwrap_or(0) as u32,
                2 => msg.message = value.as_str().unwrap_or_default().to_string(),
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
    fn hello_request_roundtrip() {
        let msg = HelloRequest {
            client_info: "esphome-client".to_string(),
            api_version_major: 1,
            api_version_minor: 10,
        };
        let decoded = HelloRequest::decode(&msg.encode()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn connect_response_invalid_password_roundtrip() {
        let msg = ConnectResponse { invalid_password: true };
        let decoded = ConnectResponse::decode(&msg.encode()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn device_info_response_roundtrip() {
        let msg = DeviceInfoResponse {
            uses_password: false,
            name: "kitchen".to_string(),
            mac_address: "AA:BB:CC:DD:EE:FF".to_string(),
            esphome_version: "2024.1.0".to_string(),
            compilation_time: "Jan  1 2024".to_string(),
            model: "esp32".to_string(),
            has_deep_sleep: false,
            project_name: String::new(),
            project_version: String::new(),
            webserver_port: 0,
            manufacturer: "Espressif".to_string(),
            friendly_name: "Kitchen Sensor".to_string(),
        };
        let decoded = DeviceInfoResponse::decode(&msg.encode()).unwrap();
        assert_eq!(decoded, msg);
    }

    #[test]
    fn get_time_response_zero_epoch_omits_field_but_decodes_to_zero() {
        let msg = GetTimeResponse { epoch_seconds: 0 };
        assert!(msg.encode().is_empty());
        assert_eq!(GetTimeResponse::decode(&msg.encode()).unwrap(), msg);
    }
}
