pub mod events;
pub mod handler;
pub mod manager;

pub use events::{BrokerEvent, ConnectionState, IncomingMessage};
pub use handler::MessageHandler;
pub use manager::MqttManager;
