//! End-to-end scenarios against an in-process mock device: no real
//! microcontroller, just enough of the wire protocol on a loopback TCP
//! socket to drive the client through discovery, subscription, and control.

mod mock_device;

use std::time::Duration;

use esphome_client::{Client, ClientConfig, ClientEvent, DisconnectReason};
use esphome_proto::entity::{EntityInfo, SensorInfo, SwitchInfo};
use esphome_proto::messages as msg;
use esphome_proto::messages::ids;

fn config_for(port: u16) -> ClientConfig {
    ClientConfig {
        host: "127.0.0.1".to_string(),
        port,
        connection_timeout_ms: 2_000,
        keepalive_interval_ms: 10_000,
        ping_timeout_ms: 5_000,
        ..ClientConfig::default()
    }
}

async fn expect_event(
    events: &mut tokio::sync::broadcast::Receiver<ClientEvent>,
    mut matches: impl FnMut(&ClientEvent) -> bool,
) -> ClientEvent {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let event = events.recv().await.expect("event channel closed early");
            if matches(&event) {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for expected event")
}

#[tokio::test]
async fn plaintext_happy_path_discovers_entities_and_reports_sensor_state() {
    let (listener, port) = mock_device::spawn_listener().await;

    let device = tokio::spawn(async move {
        let mut stream = mock_device::accept(&listener).await;

        let (message_type, body) = mock_device::read_plaintext(&mut stream).await;
        assert_eq!(message_type, ids::HELLO_REQUEST);
        msg::HelloRequest::decode(&body).unwrap();
        let hello = msg::HelloResponse { api_version_major: 1, api_version_minor: 10, ..Default::default() };
        mock_device::send_plaintext(&mut stream, ids::HELLO_RESPONSE, hello.encode()).await;

        let (message_type, body) = mock_device::read_plaintext(&mut stream).await;
        assert_eq!(message_type, ids::CONNECT_REQUEST);
        assert_eq!(msg::ConnectRequest::decode(&body).unwrap().password, "");
        mock_device::send_plaintext(&mut stream, ids::CONNECT_RESPONSE, msg::ConnectResponse::default().encode()).await;

        let (message_type, _) = mock_device::read_plaintext(&mut stream).await;
        assert_eq!(message_type, ids::DEVICE_INFO_REQUEST);
        let info = msg::DeviceInfoResponse { name: "mock-device".to_string(), ..Default::default() };
        mock_device::send_plaintext(&mut stream, ids::DEVICE_INFO_RESPONSE, info.encode()).await;

        let (message_type, _) = mock_device::read_plaintext(&mut stream).await;
        assert_eq!(message_type, ids::LIST_ENTITIES_REQUEST);

        let switch = SwitchInfo {
            info: EntityInfo { key: 10, object_id: "relay".to_string(), name: "Relay".to_string(), ..Default::default() },
            device_class: String::new(),
            assumed_state: false,
        };
        mock_device::send_plaintext(&mut stream, ids::LIST_ENTITIES_SWITCH_RESPONSE, msg::entities::encode_switch(&switch)).await;

        let sensor = SensorInfo {
            info: EntityInfo { key: 11, object_id: "temp".to_string(), name: "Temperature".to_string(), ..Default::default() },
            device_class: String::new(),
            unit_of_measurement: "°C".to_string(),
            accuracy_decimals: 1,
            force_update: false,
            state_class: esphome_proto::entity::StateClass::Measurement,
        };
        mock_device::send_plaintext(&mut stream, ids::LIST_ENTITIES_SENSOR_RESPONSE, msg::entities::encode_sensor(&sensor)).await;

        mock_device::send_plaintext(&mut stream, ids::LIST_ENTITIES_DONE_RESPONSE, Vec::new()).await;

        let (message_type, _) = mock_device::read_plaintext(&mut stream).await;
        assert_eq!(message_type, ids::SUBSCRIBE_STATES_REQUEST);

        let state = msg::SensorState { key: 11, state: 22.5, missing_state: false };
        mock_device::send_plaintext(&mut stream, ids::SENSOR_STATE_RESPONSE, state.encode()).await;

        stream
    });

    let client = Client::connect(config_for(port), None);
    let mut events = client.subscribe();

    let entities_event = expect_event(&mut events, |e| matches!(e, ClientEvent::Entities(_))).await;
    let ClientEvent::Entities(entities) = entities_event else { unreachable!() };
    assert_eq!(entities.len(), 2);
    let summaries = client.entity_summaries();
    assert!(summaries.iter().any(|s| s.key == 10 && s.id == "switch-relay"));
    assert!(summaries.iter().any(|s| s.key == 11 && s.id == "sensor-temp"));

    let telemetry = expect_event(&mut events, |e| matches!(e, ClientEvent::Telemetry(_))).await;
    match telemetry {
        ClientEvent::Telemetry(esphome_client::EntityState::Sensor(state)) => {
            assert_eq!(state.key, 11);
            assert_eq!(state.state, 22.5);
        }
        other => panic!("expected sensor telemetry, got {other:?}"),
    }

    match client.state(11) {
        Some(esphome_client::EntityState::Sensor(state)) => assert_eq!(state.state, 22.5),
        other => panic!("expected cached sensor state, got {other:?}"),
    }
    assert_eq!(client.state(10), None, "switch never reported a state, so it has no cache entry");
    assert_eq!(client.states().len(), 1);

    client.disconnect().await;
    let _ = tokio::time::timeout(Duration::from_secs(5), device).await;
}

#[tokio::test]
async fn encrypted_happy_path_carries_hello_inside_noise_frames() {
    let psk = [0u8; 32];
    let (listener, port) = mock_device::spawn_listener().await;

    let device = tokio::spawn(async move {
        let mut stream = mock_device::accept(&listener).await;
        let (mut send_cipher, mut recv_cipher) = mock_device::complete_responder_handshake(&mut stream, psk).await;

        let (message_type, body) = mock_device::read_encrypted(&mut stream, &mut recv_cipher).await;
        assert_eq!(message_type, ids::HELLO_REQUEST);
        msg::HelloRequest::decode(&body).unwrap();
        let hello = msg::HelloResponse { api_version_major: 1, api_version_minor: 10, ..Default::default() };
        mock_device::send_encrypted(&mut stream, &mut send_cipher, ids::HELLO_RESPONSE, &hello.encode()).await;

        let (message_type, _) = mock_device::read_encrypted(&mut stream, &mut recv_cipher).await;
        assert_eq!(message_type, ids::CONNECT_REQUEST);
        mock_device::send_encrypted(&mut stream, &mut send_cipher, ids::CONNECT_RESPONSE, &msg::ConnectResponse::default().encode()).await;

        let (message_type, _) = mock_device::read_encrypted(&mut stream, &mut recv_cipher).await;
        assert_eq!(message_type, ids::DEVICE_INFO_REQUEST);
        mock_device::send_encrypted(&mut stream, &mut send_cipher, ids::DEVICE_INFO_RESPONSE, &msg::DeviceInfoResponse::default().encode()).await;

        let (message_type, _) = mock_device::read_encrypted(&mut stream, &mut recv_cipher).await;
        assert_eq!(message_type, ids::LIST_ENTITIES_REQUEST);
        mock_device::send_encrypted(&mut stream, &mut send_cipher, ids::LIST_ENTITIES_DONE_RESPONSE, &[]).await;

        let (message_type, _) = mock_device::read_encrypted(&mut stream, &mut recv_cipher).await;
        assert_eq!(message_type, ids::SUBSCRIBE_STATES_REQUEST);

        stream
    });

    let client = Client::connect(config_for(port), Some(psk));
    let mut events = client.subscribe();

    let connected = expect_event(&mut events, |e| matches!(e, ClientEvent::Connected { .. })).await;
    assert!(matches!(connected, ClientEvent::Connected { encrypted: true }));

    expect_event(&mut events, |e| matches!(e, ClientEvent::Entities(_))).await;

    client.disconnect().await;
    let _ = tokio::time::timeout(Duration::from_secs(5), device).await;
}

#[tokio::test]
async fn wrong_psk_fails_the_handshake_and_reconnect_is_bounded() {
    let client_psk = [1u8; 32];
    let device_psk = [2u8; 32];
    let (listener, port) = mock_device::spawn_listener().await;

    let device = tokio::spawn(async move {
        let mut attempts = 0;
        for _ in 0..3 {
            let mut stream = mock_device::accept(&listener).await;
            mock_device::complete_responder_handshake(&mut stream, device_psk).await;
            attempts += 1;
        }
        attempts
    });

    let mut config = config_for(port);
    config.reconnect_interval_ms = 10;
    let client = Client::connect(config, Some(client_psk));
    let mut events = client.subscribe();

    for _ in 0..3 {
        let error = expect_event(&mut events, |e| matches!(e, ClientEvent::Error(_))).await;
        match error {
            ClientEvent::Error(err) => assert!(matches!(&*err, esphome_client::ClientError::Crypto(_))),
            _ => unreachable!(),
        }
    }

    let closed = expect_event(&mut events, |e| matches!(e, ClientEvent::Disconnected { .. })).await;
    assert!(matches!(closed, ClientEvent::Disconnected { reason: DisconnectReason::ProtocolError(_) }));

    let attempts = tokio::time::timeout(Duration::from_secs(5), device).await.unwrap().unwrap();
    assert_eq!(attempts, 3, "crypto reconnect must be bounded at 3 attempts");
}

#[tokio::test]
async fn ping_timeout_disconnects_and_schedules_a_reconnect() {
    let (listener, port) = mock_device::spawn_listener().await;

    let device = tokio::spawn(async move {
        let mut stream = mock_device::accept(&listener).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // HELLO
        let hello = msg::HelloResponse { api_version_major: 1, api_version_minor: 10, ..Default::default() };
        mock_device::send_plaintext(&mut stream, ids::HELLO_RESPONSE, hello.encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // CONNECT
        mock_device::send_plaintext(&mut stream, ids::CONNECT_RESPONSE, msg::ConnectResponse::default().encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // DEVICE_INFO
        mock_device::send_plaintext(&mut stream, ids::DEVICE_INFO_RESPONSE, msg::DeviceInfoResponse::default().encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // LIST_ENTITIES
        mock_device::send_plaintext(&mut stream, ids::LIST_ENTITIES_DONE_RESPONSE, Vec::new()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // SUBSCRIBE_STATES

        // Then go silent — no more reads, no more writes — until the client
        // gives up and reconnects.
        let _second = mock_device::accept(&listener).await;
    });

    let mut config = config_for(port);
    config.keepalive_interval_ms = 60_000;
    config.ping_timeout_ms = 150;
    config.reconnect_interval_ms = 10;
    let client = Client::connect(config, None);
    let mut events = client.subscribe();

    let error = expect_event(&mut events, |e| matches!(e, ClientEvent::Error(_))).await;
    match error {
        ClientEvent::Error(err) => assert!(matches!(&*err, esphome_client::ClientError::Timeout(_))),
        _ => unreachable!(),
    }

    let disconnected = expect_event(&mut events, |e| matches!(e, ClientEvent::Disconnected { .. })).await;
    assert!(matches!(disconnected, ClientEvent::Disconnected { reason: DisconnectReason::SocketError(_) }));

    tokio::time::timeout(Duration::from_secs(5), device).await.expect("reconnect was not attempted in time").unwrap();

    // The second connection never completes its session prelude (the mock
    // device goes silent after accepting it), so there's nothing for a
    // graceful `disconnect()` to shake hands with here — just drop the
    // handle and let the test runtime tear the task down.
    drop(client);
}

#[tokio::test]
async fn unknown_message_id_is_dropped_and_the_next_message_still_decodes() {
    let (listener, port) = mock_device::spawn_listener().await;

    let device = tokio::spawn(async move {
        let mut stream = mock_device::accept(&listener).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // HELLO
        let hello = msg::HelloResponse { api_version_major: 1, api_version_minor: 10, ..Default::default() };
        mock_device::send_plaintext(&mut stream, ids::HELLO_RESPONSE, hello.encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // CONNECT
        mock_device::send_plaintext(&mut stream, ids::CONNECT_RESPONSE, msg::ConnectResponse::default().encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // DEVICE_INFO
        mock_device::send_plaintext(&mut stream, ids::DEVICE_INFO_RESPONSE, msg::DeviceInfoResponse::default().encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // LIST_ENTITIES
        mock_device::send_plaintext(&mut stream, ids::LIST_ENTITIES_DONE_RESPONSE, Vec::new()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // SUBSCRIBE_STATES

        // A message-type id the router has no arm for. Five spare bytes of
        // body so a naive "frame boundary from trailing garbage" bug would
        // actually surface.
        mock_device::send_plaintext(&mut stream, 9_999, vec![1, 2, 3, 4, 5]).await;

        let state = msg::SwitchState { key: 10, state: true };
        mock_device::send_plaintext(&mut stream, ids::SWITCH_STATE_RESPONSE, state.encode()).await;
    });

    let client = Client::connect(config_for(port), None);
    let mut events = client.subscribe();

    let telemetry = expect_event(&mut events, |e| matches!(e, ClientEvent::Telemetry(_))).await;
    match telemetry {
        ClientEvent::Telemetry(esphome_client::EntityState::Switch(state)) => {
            assert_eq!(state.key, 10);
            assert!(state.state);
        }
        other => panic!("expected switch telemetry after the unknown frame, got {other:?}"),
    }

    client.disconnect().await;
    let _ = tokio::time::timeout(Duration::from_secs(5), device).await;
}

#[tokio::test]
async fn state_update_for_a_key_outside_the_registry_is_dropped_not_cached() {
    let (listener, port) = mock_device::spawn_listener().await;

    let device = tokio::spawn(async move {
        let mut stream = mock_device::accept(&listener).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // HELLO
        let hello = msg::HelloResponse { api_version_major: 1, api_version_minor: 10, ..Default::default() };
        mock_device::send_plaintext(&mut stream, ids::HELLO_RESPONSE, hello.encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // CONNECT
        mock_device::send_plaintext(&mut stream, ids::CONNECT_RESPONSE, msg::ConnectResponse::default().encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // DEVICE_INFO
        mock_device::send_plaintext(&mut stream, ids::DEVICE_INFO_RESPONSE, msg::DeviceInfoResponse::default().encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // LIST_ENTITIES
        let switch = SwitchInfo {
            info: EntityInfo { key: 10, object_id: "relay".to_string(), name: "Relay".to_string(), ..Default::default() },
            device_class: String::new(),
            assumed_state: false,
        };
        mock_device::send_plaintext(&mut stream, ids::LIST_ENTITIES_SWITCH_RESPONSE, msg::entities::encode_switch(&switch)).await;
        mock_device::send_plaintext(&mut stream, ids::LIST_ENTITIES_DONE_RESPONSE, Vec::new()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // SUBSCRIBE_STATES

        // A state for a key discovery never advertised, followed by one for
        // a key it did: the first must be dropped silently, the second must
        // still come through so the drop didn't wedge the decode loop.
        let bogus = msg::SwitchState { key: 999, state: true };
        mock_device::send_plaintext(&mut stream, ids::SWITCH_STATE_RESPONSE, bogus.encode()).await;
        let real = msg::SwitchState { key: 10, state: true };
        mock_device::send_plaintext(&mut stream, ids::SWITCH_STATE_RESPONSE, real.encode()).await;
    });

    let client = Client::connect(config_for(port), None);
    let mut events = client.subscribe();
    expect_event(&mut events, |e| matches!(e, ClientEvent::Entities(_))).await;

    let telemetry = expect_event(&mut events, |e| matches!(e, ClientEvent::Telemetry(_))).await;
    match telemetry {
        ClientEvent::Telemetry(esphome_client::EntityState::Switch(state)) => assert_eq!(state.key, 10),
        other => panic!("expected the known-key switch telemetry, got {other:?}"),
    }

    assert_eq!(client.state(999), None, "state for an unregistered key must never be cached");
    assert_eq!(client.states().len(), 1, "only the known-key update should have reached the cache");

    client.disconnect().await;
    let _ = tokio::time::timeout(Duration::from_secs(5), device).await;
}

#[tokio::test]
async fn switch_command_round_trips_to_a_state_event() {
    let (listener, port) = mock_device::spawn_listener().await;

    let device = tokio::spawn(async move {
        let mut stream = mock_device::accept(&listener).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // HELLO
        let hello = msg::HelloResponse { api_version_major: 1, api_version_minor: 10, ..Default::default() };
        mock_device::send_plaintext(&mut stream, ids::HELLO_RESPONSE, hello.encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // CONNECT
        mock_device::send_plaintext(&mut stream, ids::CONNECT_RESPONSE, msg::ConnectResponse::default().encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // DEVICE_INFO
        mock_device::send_plaintext(&mut stream, ids::DEVICE_INFO_RESPONSE, msg::DeviceInfoResponse::default().encode()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // LIST_ENTITIES
        let switch = SwitchInfo {
            info: EntityInfo { key: 10, object_id: "relay".to_string(), name: "Relay".to_string(), ..Default::default() },
            device_class: String::new(),
            assumed_state: false,
        };
        mock_device::send_plaintext(&mut stream, ids::LIST_ENTITIES_SWITCH_RESPONSE, msg::entities::encode_switch(&switch)).await;
        mock_device::send_plaintext(&mut stream, ids::LIST_ENTITIES_DONE_RESPONSE, Vec::new()).await;

        let (_, _) = mock_device::read_plaintext(&mut stream).await; // SUBSCRIBE_STATES

        let (message_type, body) = mock_device::read_plaintext(&mut stream).await;
        assert_eq!(message_type, ids::SWITCH_COMMAND_REQUEST);
        let command = msg::SwitchCommandRequest::decode(&body).unwrap();
        assert_eq!(command, msg::SwitchCommandRequest { key: 10, state: true });

        let state = msg::SwitchState { key: 10, state: true };
        mock_device::send_plaintext(&mut stream, ids::SWITCH_STATE_RESPONSE, state.encode()).await;
    });

    let client = Client::connect(config_for(port), None);
    let mut events = client.subscribe();

    expect_event(&mut events, |e| matches!(e, ClientEvent::Entities(_))).await;

    client.switch_command(msg::SwitchCommandRequest { key: 10, state: true }).unwrap();

    let telemetry = expect_event(&mut events, |e| matches!(e, ClientEvent::Telemetry(_))).await;
    match telemetry {
        ClientEvent::Telemetry(esphome_client::EntityState::Switch(state)) => {
            assert_eq!(state.key, 10);
            assert!(state.state);
        }
        other => panic!("expected switch telemetry, got {other:?}"),
    }

    client.disconnect().await;
    let _ = tokio::time::timeout(Duration::from_secs(5), device).await;
}

#[tokio::test]
async fn command_with_unknown_key_is_rejected_locally() {
    let (listener, port) = mock_device::spawn_listener().await;

    let device = tokio::spawn(async move {
        let mut stream = mock_device::accept(&listener).await;
        let (_, _) = mock_device::read_plaintext(&mut stream).await; // HELLO
        let hello = msg::HelloResponse { api_version_major: 1, api_version_minor: 10, ..Default::default() };
        mock_device::send_plaintext(&mut stream, ids::HELLO_RESPONSE, hello.encode()).await;
        let (_, _) = mock_device::read_plaintext(&mut stream).await; // CONNECT
        mock_device::send_plaintext(&mut stream, ids::CONNECT_RESPONSE, msg::ConnectResponse::default().encode()).await;
        let (_, _) = mock_device::read_plaintext(&mut stream).await; // DEVICE_INFO
        mock_device::send_plaintext(&mut stream, ids::DEVICE_INFO_RESPONSE, msg::DeviceInfoResponse::default().encode()).await;
        let (_, _) = mock_device::read_plaintext(&mut stream).await; // LIST_ENTITIES
        mock_device::send_plaintext(&mut stream, ids::LIST_ENTITIES_DONE_RESPONSE, Vec::new()).await;
        let (_, _) = mock_device::read_plaintext(&mut stream).await; // SUBSCRIBE_STATES
        stream
    });

    let client = Client::connect(config_for(port), None);
    let mut events = client.subscribe();
    expect_event(&mut events, |e| matches!(e, ClientEvent::Entities(_))).await;

    let result = client.switch_command(msg::SwitchCommandRequest { key: 999, state: true });
    assert!(matches!(result, Err(esphome_client::ClientError::UnknownEntity(_))));

    client.disconnect().await;
    let _ = tokio::time::timeout(Duration::from_secs(5), device).await;
}
