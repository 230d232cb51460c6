use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Topic the original deployment publishes occupancy updates on.
pub const DEFAULT_TOPIC: &str = "Muhendislik";

/// Broker connection parameters. Immutable once a connect attempt starts;
/// changing them means `configure` followed by a fresh `connect`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BrokerConfig {
    pub host: String,
    pub port: u16,
    pub client_id: String,
    pub username: Option<String>,
    pub password: Option<String>,
    pub keep_alive_secs: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1883,
            client_id: format!("parkdash_{}", &Uuid::new_v4().simple().to_string()[..8]),
            username: None,
            password: None,
            keep_alive_secs: 60,
        }
    }
}

impl BrokerConfig {
    pub fn new(host: impl Into<String>, port: u16, client_id: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            client_id: client_id.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }
}
