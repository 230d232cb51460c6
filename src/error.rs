use thiserror::Error;

/// Errors surfaced by manager calls. Connection failures are not here on
/// purpose: they arrive as a `ConnectionState::Failed` transition on the
/// event stream, and parse failures never surface at all.
#[derive(Debug, Error)]
pub enum MqttError {
    #[error("no broker configured; call configure() first")]
    NotConfigured,

    #[error("not connected to broker")]
    NotConnected,

    #[error("mqtt client error: {0}")]
    Client(#[from] rumqttc::ClientError),
}
