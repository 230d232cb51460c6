//! Core of a parking-lot occupancy dashboard backed by MQTT.
//!
//! The crate wires three pieces together: an [`mqtt::MqttManager`] that owns
//! a single broker connection and relays its lifecycle and incoming publishes
//! as [`mqtt::BrokerEvent`]s, a best-effort [`parser`] that pulls the
//! occupancy fields out of JSON payloads, and an append-only
//! [`store::MessageStore`] written by the [`mqtt::MessageHandler`] task and
//! read by whatever shell renders the dashboard.
//!
//! ```no_run
//! use parkdash::{BrokerConfig, MessageHandler, MessageStore, MqttManager, DEFAULT_TOPIC};
//!
//! # async fn dashboard() -> Result<(), parkdash::MqttError> {
//! let store = MessageStore::shared();
//! let (mut manager, events) = MqttManager::new();
//! let mut handler = MessageHandler::new(store.clone(), events);
//! tokio::spawn(async move { handler.run().await });
//!
//! manager.configure(BrokerConfig::new("broker.hivemq.com", 1883, "dashboard"));
//! manager.connect()?;
//! // ...once the state stream reports Connected:
//! manager.subscribe(DEFAULT_TOPIC).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod mqtt;
pub mod parser;
pub mod store;

pub use config::{BrokerConfig, DEFAULT_TOPIC};
pub use error::MqttError;
pub use mqtt::{BrokerEvent, ConnectionState, IncomingMessage, MessageHandler, MqttManager};
pub use store::{Message, MessageStore, SharedMessageStore};
