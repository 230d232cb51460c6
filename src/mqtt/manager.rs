use rumqttc::{AsyncClient, ConnectReturnCode, Event, EventLoop, MqttOptions, Packet, QoS};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::config::BrokerConfig;
use crate::error::MqttError;

use super::events::{BrokerEvent, ConnectionState, IncomingMessage};

/// Owns at most one broker connection and relays its lifecycle and incoming
/// messages as [`BrokerEvent`]s on the channel handed out at construction.
///
/// None of the request methods block on broker outcomes: connect, disconnect,
/// subscribe and publish hand the request to the client and return, and the
/// results (if any) arrive later on the event stream. There is no retry; a
/// failed connect is terminal until `connect()` is called again.
pub struct MqttManager {
    config: Option<BrokerConfig>,
    client: Option<AsyncClient>,
    state: Arc<Mutex<ConnectionState>>,
    events: mpsc::UnboundedSender<BrokerEvent>,
    poll_task: Option<JoinHandle<()>>,
}

impl MqttManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BrokerEvent>) {
        let (event_sender, event_receiver) = mpsc::unbounded_channel();
        let manager = Self {
            config: None,
            client: None,
            state: Arc::new(Mutex::new(ConnectionState::Disconnected)),
            events: event_sender,
            poll_task: None,
        };
        (manager, event_receiver)
    }

    /// Replaces any existing connection object with a fresh configuration.
    /// Does not connect; a live connection is torn down without ceremony.
    pub fn configure(&mut self, config: BrokerConfig) {
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
        self.client = None;
        if let Ok(mut state) = self.state.lock() {
            *state = ConnectionState::Disconnected;
        }
        info!("Broker configured: {}:{}", config.host, config.port);
        self.config = Some(config);
    }

    /// Requests a connection to the configured broker. Emits Connecting
    /// immediately; Connected or Failed arrive later on the event stream
    /// depending on the broker's acknowledgment.
    pub fn connect(&mut self) -> Result<(), MqttError> {
        let config = self.config.as_ref().ok_or(MqttError::NotConfigured)?;

        // Each attempt gets a fresh client and event loop.
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }

        let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            options.set_credentials(username, password);
        }
        options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));
        options.set_clean_session(true);

        let (client, eventloop) = AsyncClient::new(options, 100);
        self.client = Some(client);

        info!("Connecting to broker {}:{}", config.host, config.port);
        self.transition(ConnectionState::Connecting);

        let state = Arc::clone(&self.state);
        let events = self.events.clone();
        self.poll_task = Some(tokio::spawn(run_event_loop(eventloop, state, events)));
        Ok(())
    }

    /// Requests connection teardown. Disconnected is emitted once the event
    /// loop confirms it. No-op when nothing was ever connected.
    pub async fn disconnect(&self) -> Result<(), MqttError> {
        if let Some(client) = &self.client {
            info!("Disconnecting from broker...");
            client.disconnect().await?;
        }
        Ok(())
    }

    /// Requests a topic subscription at QoS 0. The broker's acknowledgment is
    /// logged but not surfaced.
    pub async fn subscribe(&self, topic: &str) -> Result<(), MqttError> {
        let client = self.connected_client()?;
        info!("Subscribing to topic '{}'", topic);
        client.subscribe(topic, QoS::AtMostOnce).await?;
        Ok(())
    }

    /// Publishes a non-retained QoS 0 message. No delivery confirmation is
    /// surfaced.
    pub async fn publish(&self, topic: &str, payload: &str) -> Result<(), MqttError> {
        let client = self.connected_client()?;
        debug!("Publishing {} bytes to topic '{}'", payload.len(), topic);
        client
            .publish(topic, QoS::AtMostOnce, false, payload.as_bytes().to_vec())
            .await?;
        Ok(())
    }

    /// Snapshot of the current connection state for callers that poll
    /// instead of consuming the event stream.
    pub fn state(&self) -> ConnectionState {
        self.state
            .lock()
            .map(|state| state.clone())
            .unwrap_or(ConnectionState::Disconnected)
    }

    fn connected_client(&self) -> Result<&AsyncClient, MqttError> {
        if self.state() != ConnectionState::Connected {
            return Err(MqttError::NotConnected);
        }
        self.client.as_ref().ok_or(MqttError::NotConnected)
    }

    fn transition(&self, new_state: ConnectionState) {
        if let Ok(mut state) = self.state.lock() {
            *state = new_state.clone();
        }
        if self.events.send(BrokerEvent::StateChanged(new_state)).is_err() {
            warn!("Event receiver dropped, state change not delivered");
        }
    }
}

impl Drop for MqttManager {
    fn drop(&mut self) {
        if let Some(task) = self.poll_task.take() {
            task.abort();
        }
    }
}

async fn run_event_loop(
    mut eventloop: EventLoop,
    state: Arc<Mutex<ConnectionState>>,
    events: mpsc::UnboundedSender<BrokerEvent>,
) {
    let mut tracker = ConnectionTracker::new();
    loop {
        let emitted = match eventloop.poll().await {
            Ok(event) => tracker.observe(&event),
            Err(e) => tracker.observe_error(&e).into_iter().collect(),
        };
        for event in emitted {
            if let BrokerEvent::StateChanged(new_state) = &event {
                if let Ok(mut guard) = state.lock() {
                    *guard = new_state.clone();
                }
            }
            if events.send(event).is_err() {
                error!("Event receiver dropped, stopping event loop");
                return;
            }
        }
        if tracker.is_terminal() {
            break;
        }
    }
    debug!("Broker event loop finished");
}

/// Maps raw transport events onto the connection lifecycle. Once a terminal
/// state (Disconnected or Failed) is reached the event loop stops; a new
/// `connect()` starts over with a fresh tracker.
struct ConnectionTracker {
    terminal: bool,
}

impl ConnectionTracker {
    fn new() -> Self {
        Self { terminal: false }
    }

    fn is_terminal(&self) -> bool {
        self.terminal
    }

    fn observe(&mut self, event: &Event) -> Vec<BrokerEvent> {
        match event {
            Event::Incoming(Packet::ConnAck(ack)) => {
                if ack.code == ConnectReturnCode::Success {
                    info!("Broker accepted connection");
                    vec![BrokerEvent::StateChanged(ConnectionState::Connected)]
                } else {
                    warn!("Broker rejected connection: {:?}", ack.code);
                    self.terminal = true;
                    vec![BrokerEvent::StateChanged(ConnectionState::Failed(format!(
                        "connection refused: {:?}",
                        ack.code
                    )))]
                }
            }
            Event::Incoming(Packet::Publish(publish)) => {
                debug!("Received message on topic: {}", publish.topic);
                vec![BrokerEvent::Message(IncomingMessage {
                    topic: publish.topic.clone(),
                    payload: String::from_utf8_lossy(&publish.payload).to_string(),
                })]
            }
            Event::Incoming(Packet::Disconnect) => {
                warn!("Broker closed the connection");
                self.terminal = true;
                vec![BrokerEvent::StateChanged(ConnectionState::Disconnected)]
            }
            Event::Outgoing(rumqttc::Outgoing::Disconnect) => {
                info!("Disconnect request sent to broker");
                self.terminal = true;
                vec![BrokerEvent::StateChanged(ConnectionState::Disconnected)]
            }
            Event::Incoming(Packet::SubAck(suback)) => {
                // Fire-and-forget subscribe: acknowledgment is logged only.
                debug!("Subscription acknowledged for packet ID: {}", suback.pkid);
                vec![]
            }
            other => {
                debug!("Other MQTT event: {:?}", other);
                vec![]
            }
        }
    }

    fn observe_error(&mut self, error: &rumqttc::ConnectionError) -> Option<BrokerEvent> {
        if self.terminal {
            // Teardown already reported; the trailing transport error is noise.
            debug!("Event loop error after teardown: {}", error);
            return None;
        }
        error!("MQTT event loop error: {}", error);
        self.terminal = true;
        Some(BrokerEvent::StateChanged(ConnectionState::Failed(
            error.to_string(),
        )))
    }
}
