use std::fmt;

/// Broker connection lifecycle as observed from the event loop. The
/// presentation shell never sets this directly; it only requests
/// connect/disconnect and watches the transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Failed(String),
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "Disconnected"),
            ConnectionState::Connecting => write!(f, "Connecting..."),
            ConnectionState::Connected => write!(f, "Connected"),
            ConnectionState::Failed(reason) => write!(f, "Connection failed: {}", reason),
        }
    }
}

/// A publish received from the broker, before parsing and storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncomingMessage {
    pub topic: String,
    pub payload: String,
}

/// Events relayed from the transport to the owner task. This is the
/// subscription seam between the manager and whoever renders or stores:
/// one stream carrying both state changes and incoming messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerEvent {
    StateChanged(ConnectionState),
    Message(IncomingMessage),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_display_carries_failure_reason() {
        let state = ConnectionState::Failed("bad credentials".to_string());
        assert_eq!(state.to_string(), "Connection failed: bad credentials");
        assert_eq!(ConnectionState::Connected.to_string(), "Connected");
    }
}
