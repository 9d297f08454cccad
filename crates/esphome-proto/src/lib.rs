//! esphome-proto — the wire-level building blocks of the ESPHome native API:
//! the schema-less protobuf codec, the Noise handshake, the entity data
//! model, and typed configuration loading.
//!
//! Nothing in this crate touches a socket; `esphome-client` owns framing,
//! the session state machine, and dispatch.

pub mod codec;
pub mod config;
pub mod crypto;
pub mod entity;
pub mod messages;
