//! `esphome-client` — an async client for the ESPHome native API. Connects
//! to a single device, runs the handshake/hello/connect/discover/subscribe
//! session in a background task, and exposes a [`Client`] handle: snapshot
//! accessors for device info, entities, and last-known per-entity state, a
//! broadcast subscription for events, and one typed command method per
//! controllable entity kind.
//!
//! Command methods enqueue and return without waiting for the device to
//! acknowledge; the only errors they surface directly are [`ClientError::UnknownEntity`]
//! (the key isn't in the last discovered entity list) and [`ClientError::Closed`]
//! (the session task has already stopped). Everything else — auth failure,
//! protocol errors, disconnects — arrives later as a [`ClientEvent`].

pub mod commands;
pub mod error;
pub mod events;
pub mod frame;
pub mod logger;
pub mod router;
pub mod session;

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;

pub use esphome_proto::config::{ClientConfig, ConfigError};
pub use esphome_proto::entity::Entity;
pub use esphome_proto::messages as messages;
pub use esphome_registry::RegistryError;

pub use error::ClientError;
pub use events::{ClientEvent, DisconnectReason, EntityState};
pub use logger::{default_logger, Context, Logger, TracingLogger};

use session::{Command, Session, SessionHandles};

/// Backlog for the events broadcast channel. A subscriber that falls this
/// far behind sees a `Lagged` error on its next `recv` rather than stalling
/// the session loop.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// The `{key, id, name, type}` summary the spec's entity listing asks for,
/// derived from the richer per-kind [`Entity`] the registry actually holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySummary {
    pub key: u32,
    pub id: String,
    pub name: String,
    pub type_: String,
}

impl From<&Entity> for EntitySummary {
    fn from(entity: &Entity) -> Self {
        Self {
            key: entity.key(),
            id: entity.string_id(),
            name: entity.info().name.clone(),
            type_: entity.type_tag().to_string(),
        }
    }
}

/// A handle to one device connection. Construction spawns the session loop;
/// dropping the handle without calling [`Client::disconnect`] detaches the
/// task rather than stopping it — call `disconnect` for a clean shutdown.
pub struct Client {
    command_tx: mpsc::UnboundedSender<Command>,
    shutdown_tx: broadcast::Sender<()>,
    events: broadcast::Sender<ClientEvent>,
    device_info: watch::Receiver<Option<messages::DeviceInfoResponse>>,
    entities: watch::Receiver<Vec<Entity>>,
    states: watch::Receiver<HashMap<u32, EntityState>>,
    task: JoinHandle<()>,
}

impl Client {
    /// Connects using the default `tracing`-backed logger.
    pub fn connect(config: ClientConfig, psk: Option<[u8; 32]>) -> Self {
        Self::connect_with_logger(config, psk, default_logger())
    }

    /// Connects with a caller-supplied [`Logger`], for hosts that want the
    /// session's diagnostics routed somewhere other than `tracing`.
    pub fn connect_with_logger(config: ClientConfig, psk: Option<[u8; 32]>, logger: Arc<dyn Logger>) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (device_info_tx, device_info_rx) = watch::channel(None);
        let (entities_tx, entities_rx) = watch::channel(Vec::new());
        let (states_tx, states_rx) = watch::channel(HashMap::new());

        let handles = SessionHandles {
            events: events_tx.clone(),
            device_info: device_info_tx,
            entities: entities_tx,
            states: states_tx,
        };
        let session = Session::new(config, psk, logger, command_rx, shutdown_rx, handles);
        let task = tokio::spawn(session.run());

        Self {
            command_tx,
            shutdown_tx,
            events: events_tx,
            device_info: device_info_rx,
            entities: entities_rx,
            states: states_rx,
            task,
        }
    }

    /// Subscribes to the event stream. Each call returns an independent
    /// receiver; events sent before a given `subscribe()` call are not
    /// visible to that receiver.
    pub fn subscribe(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// The most recent `DeviceInfoResponse`, or `None` before the session
    /// has completed its first connection.
    pub fn device_info(&self) -> Option<messages::DeviceInfoResponse> {
        self.device_info.borrow().clone()
    }

    /// The full entity records from the last completed discovery pass.
    pub fn entities(&self) -> Vec<Entity> {
        self.entities.borrow().clone()
    }

    /// `{key, id, name, type}` summaries for every discovered entity.
    pub fn entity_summaries(&self) -> Vec<EntitySummary> {
        self.entities.borrow().iter().map(EntitySummary::from).collect()
    }

    /// The most recent decoded state for `key`, or `None` if the device
    /// hasn't reported one yet (or `key` isn't a known entity). Lets a
    /// subscriber that joins after the fact read last-known state instead
    /// of only ever seeing states that arrive after it subscribed.
    pub fn state(&self, key: u32) -> Option<EntityState> {
        self.states.borrow().get(&key).cloned()
    }

    /// The full last-known-state cache, one entry per entity `key` that has
    /// reported a state so far this session.
    pub fn states(&self) -> HashMap<u32, EntityState> {
        self.states.borrow().clone()
    }

    /// Requests a graceful disconnect and waits for the session task to
    /// exit. The session still emits a final `Disconnected` event before
    /// this resolves.
    pub async fn disconnect(self) {
        let _ = self.shutdown_tx.send(());
        let _ = self.task.await;
    }

    fn ensure_known(&self, key: u32) -> Result<(), ClientError> {
        if self.entities.borrow().iter().any(|e| e.key() == key) {
            Ok(())
        } else {
            Err(ClientError::UnknownEntity(RegistryError::UnknownKey(key)))
        }
    }

    fn enqueue(&self, command: Command) -> Result<(), ClientError> {
        self.command_tx.send(command).map_err(|_| ClientError::Closed)
    }

    fn dispatch(&self, key: u32, command: Command) -> Result<(), ClientError> {
        self.ensure_known(key)?;
        self.enqueue(command)
    }

    pub fn switch_command(&self, request: messages::SwitchCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Switch(request))
    }

    pub fn light_command(&self, request: messages::LightCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Light(request))
    }

    pub fn cover_command(&self, request: messages::CoverCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Cover(request))
    }

    pub fn fan_command(&self, request: messages::FanCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Fan(request))
    }

    pub fn lock_command(&self, request: messages::LockCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Lock(request))
    }

    pub fn button_command(&self, request: messages::ButtonCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Button(request))
    }

    pub fn number_command(&self, request: messages::NumberCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Number(request))
    }

    pub fn select_command(&self, request: messages::SelectCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Select(request))
    }

    pub fn climate_command(&self, request: messages::ClimateCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Climate(request))
    }

    pub fn text_command(&self, request: messages::TextCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Text(request))
    }

    pub fn media_player_command(&self, request: messages::MediaPlayerCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::MediaPlayer(request))
    }

    pub fn alarm_control_panel_command(
        &self,
        request: messages::AlarmControlPanelCommandRequest,
    ) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::AlarmControlPanel(request))
    }

    pub fn date_command(&self, request: messages::DateCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Date(request))
    }

    pub fn time_command(&self, request: messages::TimeCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Time(request))
    }

    pub fn datetime_command(&self, request: messages::DateTimeCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::DateTime(request))
    }

    pub fn valve_command(&self, request: messages::ValveCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Valve(request))
    }

    pub fn update_command(&self, request: messages::UpdateCommandRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::Update(request))
    }

    pub fn execute_service(&self, request: messages::ExecuteServiceRequest) -> Result<(), ClientError> {
        self.dispatch(request.key, Command::ExecuteService(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use esphome_proto::entity::{Entity, EntityInfo, SwitchInfo};

    fn switch_entity(key: u32) -> Entity {
        Entity::Switch(SwitchInfo {
            info: EntityInfo { key, object_id: "relay".into(), name: "Relay".into(), ..Default::default() },
            device_class: String::new(),
            assumed_state: false,
        })
    }

    fn test_client() -> (Client, watch::Sender<Vec<Entity>>, watch::Sender<HashMap<u32, EntityState>>) {
        let (command_tx, _command_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, _shutdown_rx) = broadcast::channel(1);
        let (events_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (_device_info_tx, device_info_rx) = watch::channel(None);
        let (entities_tx, entities_rx) = watch::channel(vec![switch_entity(10)]);
        let (states_tx, states_rx) = watch::channel(HashMap::new());
        let task = tokio::spawn(async {});
        let client = Client {
            command_tx,
            shutdown_tx,
            events: events_tx,
            device_info: device_info_rx,
            entities: entities_rx,
            states: states_rx,
            task,
        };
        (client, entities_tx, states_tx)
    }

    #[tokio::test]
    async fn switch_command_with_known_key_is_enqueued() {
        let (client, _entities_tx, _states_tx) = test_client();
        let result = client.switch_command(messages::SwitchCommandRequest { key: 10, state: true });
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn command_with_unknown_key_is_rejected_without_touching_the_queue() {
        let (client, _entities_tx, _states_tx) = test_client();
        let result = client.switch_command(messages::SwitchCommandRequest { key: 999, state: true });
        assert!(matches!(result, Err(ClientError::UnknownEntity(RegistryError::UnknownKey(999)))));
    }

    #[tokio::test]
    async fn entity_summaries_expose_key_id_name_type() {
        let (client, _entities_tx, _states_tx) = test_client();
        let summaries = client.entity_summaries();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].key, 10);
        assert_eq!(summaries[0].id, "switch-relay");
        assert_eq!(summaries[0].name, "Relay");
        assert_eq!(summaries[0].type_, "switch");
    }

    #[tokio::test]
    async fn state_is_none_before_any_update_arrives() {
        let (client, _entities_tx, _states_tx) = test_client();
        assert_eq!(client.state(10), None);
        assert!(client.states().is_empty());
    }

    #[tokio::test]
    async fn state_reflects_the_latest_published_snapshot() {
        let (client, _entities_tx, states_tx) = test_client();
        let mut snapshot = HashMap::new();
        snapshot.insert(10, EntityState::Switch(messages::SwitchState { key: 10, state: true }));
        states_tx.send(snapshot).unwrap();

        match client.state(10) {
            Some(EntityState::Switch(state)) => assert!(state.state),
            other => panic!("expected cached switch state, got {other:?}"),
        }
        assert_eq!(client.states().len(), 1);
        assert_eq!(client.state(11), None);
    }
}
