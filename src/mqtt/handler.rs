use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::store::{Message, SharedMessageStore};

use super::events::BrokerEvent;

/// Owner-task side of the transport handoff: consumes the manager's event
/// stream and is the only writer to the shared store. The transport callbacks
/// never touch the store directly; everything crosses this channel first.
pub struct MessageHandler {
    store: SharedMessageStore,
    receiver: mpsc::UnboundedReceiver<BrokerEvent>,
}

impl MessageHandler {
    pub fn new(store: SharedMessageStore, receiver: mpsc::UnboundedReceiver<BrokerEvent>) -> Self {
        Self { store, receiver }
    }

    /// Runs until the event channel closes (manager dropped).
    pub async fn run(&mut self) {
        info!("Starting message handler...");
        while let Some(event) = self.receiver.recv().await {
            match event {
                BrokerEvent::Message(incoming) => {
                    debug!("Handling message on topic: {}", incoming.topic);
                    let message = Message::new(incoming.topic, incoming.payload);
                    if let Ok(mut store) = self.store.lock() {
                        store.append(message);
                    }
                }
                BrokerEvent::StateChanged(state) => {
                    info!("Broker connection state: {}", state);
                }
            }
        }
        info!("Event channel closed, shutting down message handler");
    }
}
