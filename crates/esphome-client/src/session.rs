//! The session state machine (C6): connect → optional handshake → hello →
//! connect → discover → subscribe → ready, with keep-alive, reconnect
//! backoff, and graceful shutdown. Runs as a single `tokio::select!` loop —
//! the same shape as this codebase's long-running task loops (a shutdown
//! channel plus one or more interval timers), generalized from "one
//! periodic action" to "several independent wakeup sources feeding one
//! state machine."

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::time::Instant;

use esphome_proto::config::ClientConfig;
use esphome_proto::crypto::{CipherState, HandshakeInitiator};
use esphome_proto::entity::Entity;
use esphome_proto::messages as msg;
use esphome_proto::messages::ids;
use esphome_registry::EntityRegistry;

use crate::commands::Encoded;
use crate::error::ClientError;
use crate::events::{ClientEvent, DisconnectReason, EntityState};
use crate::frame::{self, DecodedFrame, FrameReader, Framing};
use crate::logger::Logger;
use crate::router::{self, DiscoveryItem, RoutedMessage};

/// The client's declared protocol version, sent in `HelloRequest`.
const API_VERSION_MAJOR: u32 = 1;
const API_VERSION_MINOR: u32 = 10;

/// Bounded retry cap for reconnects triggered by `CryptoError` — a wrong
/// PSK is indistinguishable from a transient AEAD failure at the protocol
/// level, so this is the only policy that doesn't retry forever against a
/// permanently misconfigured key (see Open Question (b)).
const MAX_CRYPTO_RECONNECTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    TcpConnecting,
    Handshaking,
    Hello,
    Connect,
    Discovering,
    Subscribing,
    Ready,
    Closing,
    Closed,
}

/// A command enqueued by the public surface. One variant per controllable
/// entity kind, plus a local disconnect request.
#[derive(Debug, Clone)]
pub enum Command {
    Switch(msg::SwitchCommandRequest),
    Light(msg::LightCommandRequest),
    Cover(msg::CoverCommandRequest),
    Fan(msg::FanCommandRequest),
    Lock(msg::LockCommandRequest),
    Button(msg::ButtonCommandRequest),
    Number(msg::NumberCommandRequest),
    Select(msg::SelectCommandRequest),
    Climate(msg::ClimateCommandRequest),
    Text(msg::TextCommandRequest),
    MediaPlayer(msg::MediaPlayerCommandRequest),
    AlarmControlPanel(msg::AlarmControlPanelCommandRequest),
    Date(msg::DateCommandRequest),
    Time(msg::TimeCommandRequest),
    DateTime(msg::DateTimeCommandRequest),
    Valve(msg::ValveCommandRequest),
    Update(msg::UpdateCommandRequest),
    ExecuteService(msg::ExecuteServiceRequest),
    Disconnect,
}

impl Command {
    fn encode(&self) -> Option<Encoded> {
        use crate::commands as enc;
        Some(match self {
            Command::Switch(r) => enc::switch_command(r),
            Command::Light(r) => enc::light_command(r),
            Command::Cover(r) => enc::cover_command(r),
            Command::Fan(r) => enc::fan_command(r),
            Command::Lock(r) => enc::lock_command(r),
            Command::Button(r) => enc::button_command(r),
            Command::Number(r) => enc::number_command(r),
            Command::Select(r) => enc::select_command(r),
            Command::Climate(r) => enc::climate_command(r),
            Command::Text(r) => enc::text_command(r),
            Command::MediaPlayer(r) => enc::media_player_command(r),
            Command::AlarmControlPanel(r) => enc::alarm_control_panel_command(r),
            Command::Date(r) => enc::date_command(r),
            Command::Time(r) => enc::time_command(r),
            Command::DateTime(r) => enc::datetime_command(r),
            Command::Valve(r) => enc::valve_command(r),
            Command::Update(r) => enc::update_command(r),
            Command::ExecuteService(r) => enc::execute_service(r),
            Command::Disconnect => return None,
        })
    }
}

/// Shared, publish-only handles the session loop updates as it runs;
/// `Client` (the public surface) holds the read side of each.
pub struct SessionHandles {
    pub events: broadcast::Sender<ClientEvent>,
    pub device_info: watch::Sender<Option<msg::DeviceInfoResponse>>,
    pub entities: watch::Sender<Vec<Entity>>,
    /// Most recent decoded state per entity `key`, so a subscriber that
    /// joins after a state has already arrived can still read it — the
    /// state cache §3 requires, exposed the same way `entities`/`device_info`
    /// snapshots already are.
    pub states: watch::Sender<HashMap<u32, EntityState>>,
}

pub struct Session {
    config: ClientConfig,
    psk: Option<[u8; 32]>,
    logger: Arc<dyn Logger>,
    command_rx: mpsc::UnboundedReceiver<Command>,
    shutdown_rx: broadcast::Receiver<()>,
    handles: SessionHandles,
    registry: EntityRegistry,
    state_cache: HashMap<u32, EntityState>,
    phase: Phase,
    crypto_failures: u32,
}

/// Per-TCP-connection state, discarded and rebuilt on every (re)connect.
struct Connection {
    stream: TcpStream,
    reader: FrameReader,
    send_cipher: Option<CipherState>,
    recv_cipher: Option<CipherState>,
    pending: VecDeque<(u32, Vec<u8>)>,
    last_traffic: Instant,
}

impl Session {
    pub fn new(
        config: ClientConfig,
        psk: Option<[u8; 32]>,
        logger: Arc<dyn Logger>,
        command_rx: mpsc::UnboundedReceiver<Command>,
        shutdown_rx: broadcast::Receiver<()>,
        handles: SessionHandles,
    ) -> Self {
        Self {
            config,
            psk,
            logger,
            command_rx,
            shutdown_rx,
            handles,
            registry: EntityRegistry::new(),
            state_cache: HashMap::new(),
            phase: Phase::Idle,
            crypto_failures: 0,
        }
    }

    /// Drops every cached entity and state, and publishes the now-empty
    /// state snapshot. Called wherever the registry itself resets (fresh
    /// discovery cycle after a reconnect) — a stale key's last-known state
    /// must not survive past the registry that validated it.
    fn reset_discovery_state(&mut self) {
        self.registry.clear();
        self.state_cache.clear();
        let _ = self.handles.states.send(self.state_cache.clone());
    }

    /// Runs until a disconnect is requested or a permanent error occurs,
    /// reconnecting in between per the configured policy.
    pub async fn run(mut self) {
        loop {
            self.phase = Phase::TcpConnecting;
            match self.connect_and_drive().await {
                Ok(()) => {
                    self.logger.info("session closed cleanly", None);
                    self.phase = Phase::Closed;
                    return;
                }
                Err(err) => {
                    self.logger.error(&format!("session ended: {err}"), None);
                    let _ = self.handles.events.send(ClientEvent::Error(Arc::new(err_clone_for_event(&err))));
                    self.phase = Phase::Closing;

                    if matches!(err, ClientError::Crypto(_)) {
                        self.crypto_failures += 1;
                    } else {
                        self.crypto_failures = 0;
                    }

                    let crypto_exhausted =
                        matches!(err, ClientError::Crypto(_)) && self.crypto_failures >= MAX_CRYPTO_RECONNECTS;

                    if !self.config.reconnect || !err.is_reconnectable() || crypto_exhausted {
                        self.phase = Phase::Closed;
                        let _ = self.handles.events.send(ClientEvent::Disconnected {
                            reason: DisconnectReason::ProtocolError(err.to_string()),
                        });
                        return;
                    }

                    let _ = self.handles.events.send(ClientEvent::Disconnected {
                        reason: DisconnectReason::SocketError(err.to_string()),
                    });

                    self.reset_discovery_state();
                    tokio::select! {
                        _ = tokio::time::sleep(self.config.reconnect_interval()) => {}
                        _ = self.shutdown_rx.recv() => {
                            self.phase = Phase::Closed;
                            return;
                        }
                    }
                }
            }
        }
    }

    async fn connect_and_drive(&mut self) -> Result<(), ClientError> {
        let stream = tokio::time::timeout(
            self.config.connection_timeout(),
            TcpStream::connect((self.config.host.as_str(), self.config.port)),
        )
        .await
        .map_err(|_| ClientError::Timeout("tcp connect"))?
        .map_err(ClientError::Connect)?;

        let framing = if self.psk.is_some() { Framing::Encrypted } else { Framing::Plaintext };
        let mut conn = Connection {
            stream,
            reader: FrameReader::new(framing),
            send_cipher: None,
            recv_cipher: None,
            pending: VecDeque::new(),
            last_traffic: Instant::now(),
        };

        let encrypted = if let Some(psk) = self.psk {
            self.phase = Phase::Handshaking;
            self.run_handshake(&mut conn, psk).await?;
            true
        } else {
            false
        };

        self.phase = Phase::Hello;
        self.say_hello(&mut conn).await?;

        self.phase = Phase::Connect;
        self.connect_request(&mut conn).await?;

        let _ = self.handles.events.send(ClientEvent::Connected { encrypted });
        self.crypto_failures = 0;

        self.device_info_request(&mut conn).await?;

        self.phase = Phase::Discovering;
        self.discover_entities(&mut conn).await?;

        self.phase = Phase::Subscribing;
        self.write_message(&mut conn, ids::SUBSCRIBE_STATES_REQUEST, msg::SubscribeStatesRequest.encode()).await?;

        self.phase = Phase::Ready;
        self.logger.info("session ready", None);
        self.event_loop(&mut conn).await
    }

    async fn run_handshake(&mut self, conn: &mut Connection, psk: [u8; 32]) -> Result<(), ClientError> {
        let mut initiator = HandshakeInitiator::new(psk);
        let message1 = initiator.write_message_1()?;
        conn.stream.write_all(&frame::encode_ciphertext(&message1)?).await.map_err(ClientError::Connect)?;

        let message2 = loop {
            if let Some(frame) = self.next_raw_frame(conn).await? {
                match frame {
                    DecodedFrame::Ciphertext(bytes) => break bytes,
                    DecodedFrame::Plaintext { .. } => return Err(ClientError::Frame(crate::frame::FrameError::EncryptionMismatch)),
                }
            }
        };

        let keys = initiator.read_message_2(&message2)?;
        conn.send_cipher = Some(keys.send);
        conn.recv_cipher = Some(keys.recv);
        Ok(())
    }

    async fn say_hello(&mut self, conn: &mut Connection) -> Result<(), ClientError> {
        let hello = msg::HelloRequest {
            client_info: self.config.client_id.clone(),
            api_version_major: API_VERSION_MAJOR,
            api_version_minor: API_VERSION_MINOR,
        };
        self.write_message(conn, ids::HELLO_REQUEST, hello.encode()).await?;

        match self.next_routed(conn).await? {
            RoutedMessage::Hello(response) => {
                if response.api_version_major != API_VERSION_MAJOR {
                    return Err(ClientError::UnsupportedApiVersion {
                        device_major: response.api_version_major,
                        device_minor: response.api_version_minor,
                        supported_major: API_VERSION_MAJOR,
                    });
                }
                Ok(())
            }
            other => Err(ClientError::ProtocolError(format!("expected HelloResponse, got {other:?}"))),
        }
    }

    async fn connect_request(&mut self, conn: &mut Connection) -> Result<(), ClientError> {
        let request = msg::ConnectRequest { password: self.config.password.clone() };
        self.write_message(conn, ids::CONNECT_REQUEST, request.encode()).await?;

        match self.next_routed(conn).await? {
            RoutedMessage::Connect(response) if response.invalid_password => Err(ClientError::AuthFailure),
            RoutedMessage::Connect(_) => Ok(()),
            other => Err(ClientError::ProtocolError(format!("expected ConnectResponse, got {other:?}"))),
        }
    }

    async fn device_info_request(&mut self, conn: &mut Connection) -> Result<(), ClientError> {
        self.write_message(conn, ids::DEVICE_INFO_REQUEST, msg::DeviceInfoRequest.encode()).await?;
        match self.next_routed(conn).await? {
            RoutedMessage::DeviceInfo(info) => {
                let _ = self.handles.device_info.send(Some(info.clone()));
                let _ = self.handles.events.send(ClientEvent::DeviceInfo(info));
                Ok(())
            }
            other => Err(ClientError::ProtocolError(format!("expected DeviceInfoResponse, got {other:?}"))),
        }
    }

    async fn discover_entities(&mut self, conn: &mut Connection) -> Result<(), ClientError> {
        self.write_message(conn, ids::LIST_ENTITIES_REQUEST, msg::ListEntitiesRequest.encode()).await?;
        loop {
            match self.next_routed(conn).await? {
                RoutedMessage::Discovery(DiscoveryItem::Entity(entity)) => {
                    let key = entity.key();
                    if self.registry.insert(entity) {
                        self.logger.debug(&format!("entity key {key} replaced during discovery"), None);
                    }
                }
                RoutedMessage::Discovery(DiscoveryItem::Done) => {
                    self.registry.seal();
                    let snapshot: Vec<Entity> = self.registry.iter().cloned().collect();
                    let _ = self.handles.entities.send(snapshot.clone());
                    let _ = self.handles.events.send(ClientEvent::Entities(snapshot));
                    return Ok(());
                }
                other => {
                    self.logger.debug(&format!("ignoring {other:?} during discovery"), None);
                }
            }
        }
    }

    async fn event_loop(&mut self, conn: &mut Connection) -> Result<(), ClientError> {
        let mut ping_interval = tokio::time::interval(self.config.keepalive_interval());
        ping_interval.tick().await;
        let mut watchdog = tokio::time::interval(self.config.ping_timeout() / 4);
        watchdog.tick().await;

        loop {
            tokio::select! {
                biased;

                _ = self.shutdown_rx.recv() => {
                    self.graceful_disconnect(conn).await;
                    return Ok(());
                }

                command = self.command_rx.recv() => {
                    match command {
                        Some(Command::Disconnect) | None => {
                            self.graceful_disconnect(conn).await;
                            return Ok(());
                        }
                        Some(command) => {
                            if let Some((message_type, body)) = command.encode() {
                                self.write_message(conn, message_type, body).await?;
                            }
                        }
                    }
                }

                _ = ping_interval.tick() => {
                    self.write_message(conn, ids::PING_REQUEST, msg::PingRequest.encode()).await?;
                }

                _ = watchdog.tick() => {
                    if conn.last_traffic.elapsed() > self.config.ping_timeout() {
                        return Err(ClientError::Timeout("ping"));
                    }
                }

                routed = self.next_routed(conn) => {
                    self.handle_ready_message(conn, routed?).await?;
                }
            }
        }
    }

    async fn handle_ready_message(&mut self, conn: &mut Connection, routed: RoutedMessage) -> Result<(), ClientError> {
        match routed {
            RoutedMessage::Event(event) => {
                if let ClientEvent::Telemetry(state) = &event {
                    let key = state.key();
                    if self.registry.get_by_key(key).is_none() {
                        self.logger.debug(&format!("dropping state update for unknown key {key}"), None);
                        return Ok(());
                    }
                    self.state_cache.insert(key, state.clone());
                    let _ = self.handles.states.send(self.state_cache.clone());
                }
                let _ = self.handles.events.send(event);
            }
            RoutedMessage::Ping => {
                self.write_message(conn, ids::PING_RESPONSE, msg::PingResponse.encode()).await?;
            }
            RoutedMessage::GetTime(_) => {
                let epoch_seconds = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs() as u32)
                    .unwrap_or(0);
                let response = msg::GetTimeResponse { epoch_seconds };
                self.write_message(conn, ids::GET_TIME_RESPONSE, response.encode()).await?;
                let _ = self.handles.events.send(ClientEvent::TimeSync);
            }
            RoutedMessage::Disconnect => {
                self.write_message(conn, ids::DISCONNECT_RESPONSE, msg::DisconnectResponse.encode()).await?;
                return Ok(());
            }
            RoutedMessage::Discovery(item) => {
                self.logger.debug(&format!("late discovery item outside discovery phase: {item:?}"), None);
            }
            RoutedMessage::Hello(_) | RoutedMessage::Connect(_) | RoutedMessage::DeviceInfo(_) => {
                self.logger.debug("ignoring session-lifecycle message while ready", None);
            }
        }
        Ok(())
    }

    async fn graceful_disconnect(&mut self, conn: &mut Connection) {
        let request = msg::DisconnectRequest.encode();
        let _ = self.write_message(conn, ids::DISCONNECT_REQUEST, request).await;
        let _ = self.handles.events.send(ClientEvent::Disconnected { reason: DisconnectReason::Requested });
    }

    /// Frames (and, if encrypted, encrypts) one outbound message and writes
    /// it to the socket.
    async fn write_message(&mut self, conn: &mut Connection, message_type: u32, body: Vec<u8>) -> Result<(), ClientError> {
        let framed = match &mut conn.send_cipher {
            Some(cipher) => {
                let payload = frame::encode_encrypted_payload(message_type, &body);
                let ciphertext = cipher.encrypt_with_ad(&[], &payload)?;
                frame::encode_ciphertext(&ciphertext)?
            }
            None => frame::encode_plaintext(message_type, &body),
        };
        conn.stream.write_all(&framed).await.map_err(ClientError::Connect)?;
        Ok(())
    }

    /// Reads exactly one whole frame off the wire (raw, undecrypted if this
    /// is a ciphertext frame), buffering nothing beyond what `FrameReader`
    /// itself retains. Used only during the handshake, before a cipher
    /// exists to decrypt with.
    async fn next_raw_frame(&mut self, conn: &mut Connection) -> Result<Option<DecodedFrame>, ClientError> {
        let mut buf = [0u8; 4096];
        let n = conn.stream.read(&mut buf).await.map_err(ClientError::Connect)?;
        if n == 0 {
            return Err(ClientError::Connect(std::io::Error::from(std::io::ErrorKind::UnexpectedEof)));
        }
        conn.last_traffic = Instant::now();
        let frames = conn.reader.push(&buf[..n])?;
        Ok(frames.into_iter().next())
    }

    /// Reads and routes the next whole message, decrypting it first if the
    /// connection is encrypted. Buffers any extra frames a single socket
    /// read produced for subsequent calls.
    async fn next_routed(&mut self, conn: &mut Connection) -> Result<RoutedMessage, ClientError> {
        loop {
            if let Some((message_type, body)) = conn.pending.pop_front() {
                match router::route(message_type, &body)? {
                    Some(routed) => return Ok(routed),
                    None => {
                        self.logger.debug(&format!("unknown message id {message_type}, dropping frame"), None);
                        continue;
                    }
                }
            }

            let mut buf = [0u8; 8192];
            let n = conn.stream.read(&mut buf).await.map_err(ClientError::Connect)?;
            if n == 0 {
                return Err(ClientError::Connect(std::io::Error::from(std::io::ErrorKind::UnexpectedEof)));
            }
            conn.last_traffic = Instant::now();

            for decoded in conn.reader.push(&buf[..n])? {
                match decoded {
                    DecodedFrame::Plaintext { message_type, body } => conn.pending.push_back((message_type, body)),
                    DecodedFrame::Ciphertext(ciphertext) => {
                        let cipher = conn.recv_cipher.as_mut().ok_or(ClientError::ProtocolError(
                            "received ciphertext frame with no transport cipher established".to_string(),
                        ))?;
                        let plaintext = cipher.decrypt_with_ad(&[], &ciphertext)?;
                        let (message_type, body) = frame::decode_encrypted_payload(&plaintext)?;
                        conn.pending.push_back((message_type, body));
                    }
                }
            }
        }
    }
}

/// `ClientError` isn't `Clone` (its sources aren't), so a reconnect-loop
/// error that must also go out as a consumer-facing event is re-described
/// as a fresh `ProtocolError` carrying the original's message.
fn err_clone_for_event(err: &ClientError) -> ClientError {
    ClientError::ProtocolError(err.to_string())
}
